use std::fmt;

use anyhow::{Context, Result};

pub const DEFAULT_INFERENCE_ENDPOINT: &str = "https://models.github.ai/inference";

/// Application configuration loaded from environment variables.
///
/// The upstream credential is optional at startup: a missing token is reported
/// per request as a configuration error instead of aborting the process.
#[derive(Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub inference_endpoint: String,
    pub port: u16,
    pub rust_log: String,
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            github_token: optional_env("GITHUB_TOKEN"),
            inference_endpoint: optional_env("INFERENCE_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_INFERENCE_ENDPOINT.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

// Hand-written so the token never reaches a log line, not even a prefix of it.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "<redacted>"),
            )
            .field("inference_endpoint", &self.inference_endpoint)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}

/// Reads an env var, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
