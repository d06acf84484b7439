use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::ports::{
    ChatCompletionBackend, CompletionBackendError, CompletionRequest,
};

enum Behavior {
    Fixed(String),
    Echo,
    Empty,
    Failing(String),
}

/// Test double for the completion backend, with a call counter for the
/// no-network assertions.
pub struct MockChatBackend {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockChatBackend {
    pub fn returning(reply: &str) -> Self {
        Self {
            behavior: Behavior::Fixed(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Replies with the user prompt wrapped, so tests can tell the
    /// completion output from the raw transcript.
    pub fn echoing() -> Self {
        Self {
            behavior: Behavior::Echo,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty_choices() -> Self {
        Self {
            behavior: Behavior::Empty,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            behavior: Behavior::Failing(detail.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatCompletionBackend for MockChatBackend {
    async fn send(
        &self,
        request: &CompletionRequest,
        _api_key: &str,
    ) -> Result<Option<String>, CompletionBackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Fixed(reply) => Ok(Some(reply.clone())),
            Behavior::Echo => Ok(Some(format!("You said: {}", request.user_prompt))),
            Behavior::Empty => Ok(None),
            Behavior::Failing(detail) => {
                Err(CompletionBackendError::ApiRequestFailed(detail.clone()))
            }
        }
    }
}
