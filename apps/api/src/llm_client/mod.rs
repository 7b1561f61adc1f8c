/// LLM Client: the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the inference API directly.
/// All LLM interactions go through the `CompletionBackend` trait, which
/// `LlmClient` implements for the hosted endpoint.
///
/// Model: openai/gpt-4.1 (hardcoded, not configurable)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(test)]
pub mod testing;

/// The model used for every generation call.
pub const MODEL: &str = "openai/gpt-4.1";
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 1.0;
const COMPLETIONS_PATH: &str = "/chat/completions";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("No upstream credential configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model is loading (status 503)")]
    ModelLoading,

    #[error("API error (status {status}): {error}")]
    Api { status: u16, error: Value },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One upstream call: a single user message plus its token budget.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// Seam between the generation pipeline and the hosted model.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Whether a credential is available for upstream calls.
    fn has_credential(&self) -> bool;

    /// Sends the prompt and returns the raw, non-empty message content.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, if the model produced any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

/// Client for the hosted chat-completion endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl LlmClient {
    pub fn new(endpoint: &str, token: Option<String>, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: completions_url(endpoint),
            token,
        })
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    fn has_credential(&self) -> bool {
        self.token.is_some()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let token = self.token.as_deref().ok_or(LlmError::MissingCredential)?;

        let body = ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            model: MODEL,
            temperature: TEMPERATURE,
            max_tokens: request.max_tokens,
            top_p: TOP_P,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        debug!("Upstream responded with status {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("Inference API returned {}: {}", status, text);
            if status.as_u16() == 503 {
                return Err(LlmError::ModelLoading);
            }
            return Err(LlmError::Api {
                status: status.as_u16(),
                error: upstream_error_body(&text),
            });
        }

        let text = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&text)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        parsed
            .content()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Joins the configured base endpoint with the completions path.
fn completions_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), COMPLETIONS_PATH)
}

/// Pulls the `error` object out of an upstream failure body.
/// Bodies that are not JSON are kept verbatim as a string.
fn upstream_error_body(text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(mut map)) => map
            .remove("error")
            .unwrap_or(Value::Object(map)),
        Ok(other) => other,
        Err(_) => Value::String(text.to_string()),
    }
}
