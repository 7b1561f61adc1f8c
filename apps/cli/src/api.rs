//! HTTP client for the generation endpoint.
//!
//! A full application is two POSTs, one per generation type, issued
//! concurrently. If either fails the whole application fails.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GENERATE_PATH: &str = "/api/generate-application";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{what} generation failed (status {status}): {message}")]
    Generation {
        what: &'static str,
        status: u16,
        message: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    resume: &'a str,
    job_description: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResultBody<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Both halves of a generated application.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub cover_letter: String,
    pub cv_bullets: Vec<String>,
}

#[derive(Clone)]
pub struct TailorClient {
    http: Client,
    endpoint: String,
}

impl TailorClient {
    pub fn new(server: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!("{}{}", server.trim_end_matches('/'), GENERATE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn generate_application(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<Application, ClientError> {
        let (cover_letter, cv_bullets) = tokio::try_join!(
            self.generate::<String>(resume, job_description, "cover-letter", "Cover letter"),
            self.generate::<Vec<String>>(resume, job_description, "bullets", "Bullets"),
        )?;

        Ok(Application {
            cover_letter,
            cv_bullets,
        })
    }

    async fn generate<T: DeserializeOwned>(
        &self,
        resume: &str,
        job_description: &str,
        kind: &str,
        what: &'static str,
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GenerateBody {
                resume,
                job_description,
                kind,
            })
            .send()
            .await?;

        let status = response.status();
        debug!("{kind} request answered with {status}");

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(ClientError::Generation {
                what,
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ResultBody<T>>().await?.result)
    }
}
