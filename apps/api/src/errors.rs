use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as a JSON body carrying at least `message`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Model is loading")]
    ModelLoading,

    #[error("Upstream error (status {status}): {error}")]
    Upstream { status: u16, error: Value },

    #[error("No content generated")]
    EmptyContent,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredential => {
                AppError::Configuration("GitHub token not configured".to_string())
            }
            LlmError::ModelLoading => AppError::ModelLoading,
            LlmError::Api { status, error } => AppError::Upstream { status, error },
            LlmError::EmptyContent => AppError::EmptyContent,
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, detail) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                    None,
                )
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed".to_string(),
                None,
            ),
            AppError::ModelLoading => {
                tracing::warn!("Upstream model is loading");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MODEL_LOADING",
                    "AI model is loading, please try again in a few moments".to_string(),
                    None,
                )
            }
            AppError::Upstream { status, error } => {
                tracing::error!("Upstream error (status {status}): {error}");
                (
                    upstream_status(*status),
                    "UPSTREAM_ERROR",
                    "AI generation failed".to_string(),
                    Some(error.clone()),
                )
            }
            AppError::EmptyContent => {
                tracing::error!("Model returned no content");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EMPTY_CONTENT",
                    "No content generated".to_string(),
                    Some(Value::String("Empty response from AI model".to_string())),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "message": message,
            "code": code,
        });
        if let Some(detail) = detail {
            body["error"] = detail;
        }

        (status, Json(body)).into_response()
    }
}

/// Mirrors the upstream status when it is a real error code, otherwise 500.
fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
