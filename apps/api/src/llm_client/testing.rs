//! Scripted in-memory backend for exercising the generation pipeline in tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionBackend, CompletionRequest, LlmError};

/// Replays queued outcomes in order and records every request it receives.
/// Once the script runs dry every further call fails with `EmptyContent`.
pub struct ScriptedBackend {
    credential: bool,
    outcomes: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub fn new(outcomes: Vec<Result<String, LlmError>>) -> Self {
        Self {
            credential: true,
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn without_credential() -> Self {
        Self {
            credential: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}
