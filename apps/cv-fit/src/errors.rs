use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type shared by every pipeline stage.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to load configuration from {path}: {reason}")]
    ConfigLoad { path: String, reason: String },

    #[error("Configuration does not contain an `api_key`")]
    MissingCredential,

    #[error("Failed to open document {path}: {reason}")]
    DocumentOpen { path: String, reason: String },

    #[error("Document {0} contains no extractable text")]
    EmptyDocument(String),

    #[error("Prompt template '{template}' requires slot '{slot}'")]
    MissingSlot {
        template: &'static str,
        slot: &'static str,
    },

    #[error("Authentication with the completion provider failed: {0}")]
    Authentication(String),

    #[error("Completion provider error{}: {message}", status_suffix(.status))]
    Provider { status: Option<u16>, message: String },

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredential => {
                AppError::Authentication("no API key configured".to_string())
            }
            LlmError::Api { status, message } if status == 401 || status == 403 => {
                AppError::Authentication(message)
            }
            LlmError::Api { status, message } => AppError::Provider {
                status: Some(status),
                message,
            },
            LlmError::InvalidRequest(msg) => {
                AppError::Internal(anyhow::anyhow!("invalid completion request: {msg}"))
            }
            other => AppError::Provider {
                status: None,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::DocumentOpen { reason, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DOCUMENT_OPEN_ERROR",
                format!("The uploaded document could not be read: {reason}"),
            ),
            AppError::EmptyDocument(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_DOCUMENT",
                "The uploaded document contains no extractable text".to_string(),
            ),
            AppError::MalformedResponse(msg) => {
                tracing::warn!("Malformed model response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_RESPONSE",
                    "The language model returned an unexpected format".to_string(),
                )
            }
            AppError::Authentication(msg) => {
                tracing::error!("Provider authentication failed: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AUTHENTICATION_ERROR",
                    "The completion provider rejected the configured credential".to_string(),
                )
            }
            AppError::Provider { .. } => {
                tracing::error!("{self}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    "The completion provider returned an error".to_string(),
                )
            }
            AppError::ConfigLoad { .. }
            | AppError::MissingCredential
            | AppError::MissingSlot { .. } => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "The service is misconfigured".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_status_maps_to_authentication() {
        let err: AppError = LlmError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Authentication(m) if m.contains("Incorrect")));
    }

    #[test]
    fn test_rate_limit_maps_to_provider_with_status() {
        let err: AppError = LlmError::Api {
            status: 429,
            message: "Rate limit reached".to_string(),
        }
        .into();
        match err {
            AppError::Provider { status, message } => {
                assert_eq!(status, Some(429));
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_content_maps_to_provider_without_status() {
        let err: AppError = LlmError::EmptyContent.into();
        assert!(matches!(err, AppError::Provider { status: None, .. }));
    }

    #[test]
    fn test_provider_display_includes_status() {
        let err = AppError::Provider {
            status: Some(500),
            message: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Completion provider error (status 500): boom"
        );
    }

    #[test]
    fn test_validation_renders_bad_request() {
        let response = AppError::Validation("job_description cannot be empty".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_provider_renders_bad_gateway() {
        let response = AppError::Provider {
            status: Some(503),
            message: "overloaded".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
