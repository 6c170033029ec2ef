use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure of one unit of pipeline work (a JD analysis or one resume).
///
/// Nothing here is fatal to the polling loop: the orchestrator logs the error
/// and moves on to the next resume or campaign.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Transient completion failures exhausted the retry budget.
    #[error("Model unavailable after {attempts} attempts: {last}")]
    ModelUnavailable { attempts: u32, last: String },

    /// The completion backend rejected the request for a non-retryable reason.
    #[error("Model error: {0}")]
    Model(String),

    #[error("{agent} returned an unparseable response: {detail}")]
    UnparseableResponse { agent: &'static str, detail: String },

    #[error("Document is empty: {0}")]
    EmptyDocument(String),

    #[error("Document source error: {0}")]
    Source(String),

    #[error("Idempotency store error: {0}")]
    Idempotency(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<LlmError> for PipelineError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Unavailable { attempts, last } => {
                PipelineError::ModelUnavailable { attempts, last }
            }
            other => PipelineError::Model(other.to_string()),
        }
    }
}

/// Dashboard API error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
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
    fn test_unavailable_maps_to_model_unavailable() {
        let err: PipelineError = LlmError::Unavailable {
            attempts: 8,
            last: "rate limited".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            PipelineError::ModelUnavailable { attempts: 8, .. }
        ));
    }

    #[test]
    fn test_rejection_maps_to_model_error() {
        let err: PipelineError = LlmError::Rejected {
            status: 401,
            message: "bad key".to_string(),
        }
        .into();
        assert!(matches!(err, PipelineError::Model(_)));
        assert!(err.to_string().contains("bad key"));
    }

    #[test]
    fn test_not_found_response_status() {
        let response = AppError::NotFound("campaign x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_response_status() {
        let response = AppError::Validation("bad id".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
