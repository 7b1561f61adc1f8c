use std::sync::Arc;

use crate::llm_client::CompletionBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Upstream chat-completion backend. `LlmClient` in production.
    pub llm: Arc<dyn CompletionBackend>,
}
