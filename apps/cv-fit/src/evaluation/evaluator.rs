//! Fit evaluation, the second pipeline stage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::assessment::FitAssessment;
use crate::extraction::profile::CandidateProfile;
use crate::llm_client::prompts::{build_prompt, TemplateName};
use crate::llm_client::{CompletionClient, CompletionRequest};

/// Scores a candidate profile against a job description.
///
/// Returns whatever the model produced; callers that need structure use
/// `FitAssessment::parse`.
#[async_trait]
pub trait FitEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        job_description: &str,
        profile: &CandidateProfile,
    ) -> Result<FitAssessment, AppError>;
}

pub struct LlmFitEvaluator {
    llm: Arc<dyn CompletionClient>,
}

impl LlmFitEvaluator {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl FitEvaluator for LlmFitEvaluator {
    async fn evaluate(
        &self,
        job_description: &str,
        profile: &CandidateProfile,
    ) -> Result<FitAssessment, AppError> {
        let values = HashMap::from([
            ("job_description", job_description),
            ("parsed_cv_info", profile.as_str()),
        ]);
        let prompt = build_prompt(TemplateName::Fit, &values)?;

        let text = self.llm.complete(&CompletionRequest::new(prompt)).await?;
        info!("Fit evaluation complete ({} chars)", text.len());

        Ok(FitAssessment::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::test_support::ScriptedClient;

    #[tokio::test]
    async fn test_evaluate_sends_fit_prompt_and_returns_text_unvalidated() {
        let client = ScriptedClient::new(vec![Ok("I think they are fine.".to_string())]);
        let evaluator = LlmFitEvaluator::new(Arc::new(client.clone()));

        let assessment = evaluator
            .evaluate(
                "Rust engineer, 3+ years",
                &CandidateProfile::new("Name: Jane Doe\nKey Skills: Rust"),
            )
            .await
            .unwrap();

        assert_eq!(assessment.as_str(), "I think they are fine.");
        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        let prompt = &requests[0].prompt;
        assert!(prompt.contains("Job Description:\nRust engineer, 3+ years"));
        assert!(prompt.contains("Candidate CV Information:\nName: Jane Doe\nKey Skills: Rust"));
        assert_eq!(requests[0].max_output_tokens, 300);
    }

    #[tokio::test]
    async fn test_authentication_error_propagates() {
        let client = ScriptedClient::new(vec![Err(LlmError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        })]);
        let evaluator = LlmFitEvaluator::new(Arc::new(client));

        let err = evaluator
            .evaluate("jd", &CandidateProfile::new("profile"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }
}
