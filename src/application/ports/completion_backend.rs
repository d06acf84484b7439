use async_trait::async_trait;

/// One chat completion call: a system instruction plus the user prompt,
/// against a single configured model.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
}

#[async_trait]
pub trait ChatCompletionBackend: Send + Sync {
    /// Returns the first completion choice's text, or `None` when the choice
    /// list is empty or absent.
    async fn send(
        &self,
        request: &CompletionRequest,
        api_key: &str,
    ) -> Result<Option<String>, CompletionBackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionBackendError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
