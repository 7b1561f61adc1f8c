// Application generation: prompt building, upstream call orchestration and
// post-processing of the model's free text into cover letters and CV bullets.
// All LLM calls go through llm_client, no direct HTTP calls here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod bullets;
pub mod cleanup;
pub mod completeness;
pub mod cover_letter;
pub mod generator;
pub mod handlers;
pub mod prompts;

/// Token budget for the first cover-letter attempt.
pub const COVER_LETTER_MAX_TOKENS: u32 = 1200;
/// Token budget for the single completeness retry.
pub const COVER_LETTER_RETRY_MAX_TOKENS: u32 = 1500;
pub const BULLETS_MAX_TOKENS: u32 = 600;

/// What the caller asked the handler to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationKind {
    CoverLetter,
    Bullets,
}

impl GenerationKind {
    pub fn max_tokens(self) -> u32 {
        match self {
            GenerationKind::CoverLetter => COVER_LETTER_MAX_TOKENS,
            GenerationKind::Bullets => BULLETS_MAX_TOKENS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GenerationKind::CoverLetter => "cover-letter",
            GenerationKind::Bullets => "bullets",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl FromStr for GenerationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cover-letter" => Ok(GenerationKind::CoverLetter),
            "bullets" => Ok(GenerationKind::Bullets),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}
