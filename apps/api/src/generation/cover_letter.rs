//! Cover letter generation with a single best-effort completeness retry.
//!
//! Stage transitions:
//!
//! ```text
//! Pending ──call──▶ Evaluated{Complete}   ──▶ Final
//!                   Evaluated{Incomplete} ──retry call──▶ Retried ──▶ Final
//! ```
//!
//! `Retried` can only move to `Final`, so at most one retry is ever issued.
//! A failed or empty retry keeps the original letter.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::cleanup::clean_cover_letter;
use crate::generation::completeness::{assess, Completeness};
use crate::generation::prompts::build_retry_prompt;
use crate::generation::{COVER_LETTER_MAX_TOKENS, COVER_LETTER_RETRY_MAX_TOKENS};
use crate::llm_client::{CompletionBackend, CompletionRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum LetterStage {
    Pending,
    Evaluated {
        letter: String,
        completeness: Completeness,
    },
    Retried {
        original: String,
        retry: Option<String>,
    },
    Final(CoverLetterOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverLetterOutcome {
    pub letter: String,
    /// Whether a completeness retry was issued.
    pub retried: bool,
    /// Whether the returned letter came from the retry.
    pub used_retry: bool,
}

/// Drives a cover letter from `Pending` to `Final`.
///
/// Only the first call may fail the request; retry failures are absorbed.
pub async fn generate_cover_letter(
    backend: &dyn CompletionBackend,
    prompt: &str,
) -> Result<CoverLetterOutcome, AppError> {
    let mut stage = LetterStage::Pending;

    loop {
        stage = match stage {
            LetterStage::Pending => {
                let raw = backend
                    .complete(&CompletionRequest::new(prompt, COVER_LETTER_MAX_TOKENS))
                    .await?;
                let letter = clean_cover_letter(raw.trim());
                let completeness = assess(&letter);
                info!(?completeness, chars = letter.len(), "Cover letter evaluated");
                LetterStage::Evaluated {
                    letter,
                    completeness,
                }
            }
            LetterStage::Evaluated {
                letter,
                completeness: Completeness::Complete,
            } => LetterStage::Final(CoverLetterOutcome {
                letter,
                retried: false,
                used_retry: false,
            }),
            LetterStage::Evaluated {
                letter,
                completeness: Completeness::Incomplete,
            } => {
                warn!("Cover letter appears incomplete, retrying with a larger token budget");
                let retry = retry_letter(backend, prompt).await;
                LetterStage::Retried {
                    original: letter,
                    retry,
                }
            }
            LetterStage::Retried { original, retry } => {
                let outcome = match retry {
                    Some(letter) => CoverLetterOutcome {
                        letter,
                        retried: true,
                        used_retry: true,
                    },
                    None => CoverLetterOutcome {
                        letter: original,
                        retried: true,
                        used_retry: false,
                    },
                };
                LetterStage::Final(outcome)
            }
            LetterStage::Final(outcome) => return Ok(outcome),
        };
    }
}

/// Issues the one retry call. `None` means keep the original letter.
async fn retry_letter(backend: &dyn CompletionBackend, prompt: &str) -> Option<String> {
    let request = CompletionRequest::new(build_retry_prompt(prompt), COVER_LETTER_RETRY_MAX_TOKENS);

    match backend.complete(&request).await {
        Ok(raw) if !raw.trim().is_empty() => {
            let letter = clean_cover_letter(raw.trim());
            info!(
                completeness = ?assess(&letter),
                "Retry produced a replacement cover letter"
            );
            Some(letter)
        }
        Ok(_) => {
            warn!("Retry returned empty content, keeping original letter");
            None
        }
        Err(e) => {
            warn!("Retry failed, keeping original letter: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::prompts::COMPLETE_LETTER_INSTRUCTION;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::llm_client::LlmError;

    const COMPLETE: &str = "Dear Hiring Manager,\nI am excited to apply.\nSincerely,\nJane Doe.";
    const NO_CLOSING: &str = "Dear Hiring Manager,\nI am excited to apply.\nI know Rust well.";
    const RETRY_COMPLETE: &str =
        "Dear Hiring Manager,\nI am excited to apply.\nBest regards,\nJane Doe.";

    #[tokio::test]
    async fn test_complete_letter_makes_single_call() {
        let backend = ScriptedBackend::replying(&[COMPLETE]);

        let outcome = generate_cover_letter(&backend, "PROMPT").await.unwrap();

        assert_eq!(backend.call_count(), 1);
        assert_eq!(outcome.letter, COMPLETE);
        assert!(!outcome.retried);
        assert_eq!(backend.requests()[0].max_tokens, 1200);
        assert_eq!(backend.requests()[0].prompt, "PROMPT");
    }

    #[tokio::test]
    async fn test_missing_closing_triggers_exactly_one_retry() {
        let backend = ScriptedBackend::replying(&[NO_CLOSING, RETRY_COMPLETE]);

        let outcome = generate_cover_letter(&backend, "PROMPT").await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].max_tokens, 1500);
        assert_eq!(
            requests[1].prompt,
            format!("PROMPT{COMPLETE_LETTER_INSTRUCTION}")
        );
        assert_eq!(outcome.letter, RETRY_COMPLETE);
        assert!(outcome.retried && outcome.used_retry);
    }

    #[tokio::test]
    async fn test_incomplete_retry_is_still_final() {
        let backend = ScriptedBackend::replying(&[NO_CLOSING, NO_CLOSING, COMPLETE]);

        let outcome = generate_cover_letter(&backend, "PROMPT").await.unwrap();

        assert_eq!(backend.call_count(), 2);
        assert_eq!(outcome.letter, NO_CLOSING);
        assert!(outcome.used_retry);
    }

    #[tokio::test]
    async fn test_failed_retry_keeps_original() {
        let backend = ScriptedBackend::new(vec![
            Ok(NO_CLOSING.to_string()),
            Err(LlmError::ModelLoading),
        ]);

        let outcome = generate_cover_letter(&backend, "PROMPT").await.unwrap();

        assert_eq!(backend.call_count(), 2);
        assert_eq!(outcome.letter, NO_CLOSING);
        assert!(outcome.retried);
        assert!(!outcome.used_retry);
    }

    #[tokio::test]
    async fn test_blank_retry_keeps_original() {
        let backend = ScriptedBackend::replying(&[NO_CLOSING, "  \n "]);

        let outcome = generate_cover_letter(&backend, "PROMPT").await.unwrap();

        assert_eq!(outcome.letter, NO_CLOSING);
        assert!(!outcome.used_retry);
    }

    #[tokio::test]
    async fn test_retry_output_is_cleaned() {
        let backend = ScriptedBackend::replying(&[
            NO_CLOSING,
            "<think>plan the letter</think>\nOkay, here it is.\nDear Hiring Manager,\nI am excited to apply.\nBest regards,\nJane Doe.",
        ]);

        let outcome = generate_cover_letter(&backend, "PROMPT").await.unwrap();

        assert_eq!(outcome.letter, RETRY_COMPLETE);
    }

    #[tokio::test]
    async fn test_first_call_failure_propagates_without_retry() {
        let backend = ScriptedBackend::new(vec![Err(LlmError::ModelLoading)]);

        let result = generate_cover_letter(&backend, "PROMPT").await;

        assert!(matches!(result, Err(AppError::ModelLoading)));
        assert_eq!(backend.call_count(), 1);
    }
}
