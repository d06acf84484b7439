use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    ChatCompletionBackend, CompletionBackendError, CompletionRequest,
};

/// OpenAI-compatible chat-completions client.
pub struct OpenAiChatBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiChatBackend {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionPayload<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl ChatCompletionBackend for OpenAiChatBackend {
    async fn send(
        &self,
        request: &CompletionRequest,
        api_key: &str,
    ) -> Result<Option<String>, CompletionBackendError> {
        let payload = ChatCompletionPayload {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
        };

        tracing::debug!(model = %request.model, "Sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CompletionBackendError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(CompletionBackendError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionBackendError::InvalidResponse(format!("parse: {}", e)))?;

        Ok(parsed.choices.into_iter().next().map(|c| c.message.content))
    }
}
