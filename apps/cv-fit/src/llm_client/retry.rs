//! Bounded retry decorator around a `CompletionClient`.
//!
//! Off by default. Enabled when the configuration sets `max_retries > 0`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{CompletionClient, CompletionRequest, LlmError};

const BASE_DELAY: Duration = Duration::from_millis(1000);

pub struct RetryingClient<C> {
    inner: C,
    max_retries: u32,
    base_delay: Duration,
}

impl<C: CompletionClient> RetryingClient<C> {
    pub fn new(inner: C, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            base_delay: BASE_DELAY,
        }
    }

    /// Delay before retry number `attempt` (1-based): base, 2×base, 4×base, ...
    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * (1u32 << (attempt - 1).min(16))
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for RetryingClient<C> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let mut attempt = 0;
        loop {
            match self.inner.complete(request).await {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.backoff(attempt);
                    warn!(
                        "Completion attempt {} failed ({}), retrying after {}ms...",
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedClient;

    fn server_error() -> LlmError {
        LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_errors_until_success() {
        let inner = ScriptedClient::new(vec![
            Err(server_error()),
            Err(server_error()),
            Ok("done".to_string()),
        ]);
        let client = RetryingClient::new(inner.clone(), 3);

        let text = client.complete(&CompletionRequest::new("p")).await.unwrap();
        assert_eq!(text, "done");
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries_with_last_error() {
        let inner = ScriptedClient::new(vec![
            Err(server_error()),
            Err(server_error()),
            Err(LlmError::Api {
                status: 429,
                message: "slow down".to_string(),
            }),
        ]);
        let client = RetryingClient::new(inner.clone(), 2);

        let err = client.complete(&CompletionRequest::new("p")).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 429, .. }));
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_does_not_retry_authentication_errors() {
        let inner = ScriptedClient::new(vec![Err(LlmError::Api {
            status: 401,
            message: "bad key".to_string(),
        })]);
        let client = RetryingClient::new(inner.clone(), 5);

        let err = client.complete(&CompletionRequest::new("p")).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 401, .. }));
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_waits_between_attempts() {
        let inner = ScriptedClient::new(vec![Err(server_error()), Ok("ok".to_string())]);
        let client = RetryingClient::new(inner, 1);

        let started = tokio::time::Instant::now();
        client.complete(&CompletionRequest::new("p")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[test]
    fn test_backoff_doubles() {
        let client = RetryingClient::new(ScriptedClient::new(vec![]), 3);
        assert_eq!(client.backoff(1), Duration::from_millis(1000));
        assert_eq!(client.backoff(2), Duration::from_millis(2000));
        assert_eq!(client.backoff(3), Duration::from_millis(4000));
    }
}
