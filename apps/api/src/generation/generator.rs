//! Application generation: validates the request, builds the prompt and
//! dispatches to the cover letter or bullet pipeline.
//!
//! Flow: validate → build_prompt → upstream call(s) → post-process → result.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::bullets::finalize_bullets;
use crate::generation::cover_letter::generate_cover_letter;
use crate::generation::prompts::build_prompt;
use crate::generation::{GenerationKind, UnknownKind};
use crate::llm_client::{CompletionBackend, CompletionRequest};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body as sent by the client. Every field is optional on the wire so
/// that missing fields surface as validation errors rather than parse errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRequest {
    pub resume: String,
    pub job_description: String,
    pub kind: GenerationKind,
}

/// A single cleaned letter, or exactly seven bullets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationResult {
    CoverLetter(String),
    Bullets(Vec<String>),
}

impl GenerationRequest {
    /// Checks required fields first, then the generation type.
    pub fn validate(self) -> Result<ValidRequest, AppError> {
        let fields = (non_empty(self.resume), non_empty(self.job_description));
        let (resume, job_description) = match fields {
            (Some(resume), Some(job_description)) => (resume, job_description),
            _ => {
                return Err(AppError::Validation(
                    "Resume and job description are required".to_string(),
                ))
            }
        };

        let kind = self
            .kind
            .as_deref()
            .unwrap_or_default()
            .parse::<GenerationKind>()
            .map_err(|UnknownKind(kind)| {
                warn!("Rejected unknown generation type {kind:?}");
                AppError::Validation(
                    r#"Invalid type. Use "cover-letter" or "bullets""#.to_string(),
                )
            })?;

        Ok(ValidRequest {
            resume,
            job_description,
            kind,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one generation against the backend.
pub async fn generate(
    backend: &dyn CompletionBackend,
    request: &ValidRequest,
) -> Result<GenerationResult, AppError> {
    let prompt = build_prompt(request.kind, &request.resume, &request.job_description);

    match request.kind {
        GenerationKind::CoverLetter => {
            let outcome = generate_cover_letter(backend, &prompt).await?;
            info!(
                retried = outcome.retried,
                used_retry = outcome.used_retry,
                "Cover letter ready"
            );
            Ok(GenerationResult::CoverLetter(outcome.letter))
        }
        GenerationKind::Bullets => {
            let raw = backend
                .complete(&CompletionRequest::new(prompt, request.kind.max_tokens()))
                .await?;
            let bullets = finalize_bullets(raw.trim());
            info!(count = bullets.len(), "Bullet points ready");
            Ok(GenerationResult::Bullets(bullets))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
