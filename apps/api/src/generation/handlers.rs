//! Axum route handlers for the generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{generate, GenerationRequest, GenerationResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub result: GenerationResult,
}

/// POST /api/generate-application
///
/// Generates either a cover letter (`{result: string}`) or exactly seven CV
/// bullets (`{result: string[]}`) depending on the request `type`.
#[tracing::instrument(
    name = "generate_application",
    skip_all,
    fields(request_id = %Uuid::new_v4(), kind = tracing::field::Empty)
)]
pub async fn handle_generate_application(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    if !state.llm.has_credential() {
        return Err(AppError::Configuration(
            "GitHub token not configured".to_string(),
        ));
    }

    let Json(request) = payload.map_err(|rejection| {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;
    let request = request.validate()?;

    tracing::Span::current().record("kind", request.kind.as_str());
    info!(
        resume_chars = request.resume.chars().count(),
        job_description_chars = request.job_description.chars().count(),
        "Generation requested"
    );

    let result = generate(state.llm.as_ref(), &request).await?;

    Ok(Json(GenerationResponse { result }))
}

/// Any method other than POST/OPTIONS on the generation route.
pub async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
