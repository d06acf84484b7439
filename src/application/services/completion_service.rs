use std::sync::Arc;

use crate::application::ports::{ChatCompletionBackend, CompletionRequest};

/// Reply used when the inbound message carries no usable prompt text.
pub const NO_PROMPT_REPLY: &str = "No prompt provided.";
/// Reply used when the completion service returns an empty choice list.
pub const NO_RESPONSE_REPLY: &str = "No response from completion service.";

/// Sends a prompt to the completion service and always produces reply text:
/// fixed fallbacks for blank prompts and empty replies, and an error-carrying
/// diagnostic string on transport failure.
pub struct CompletionService {
    backend: Arc<dyn ChatCompletionBackend>,
    model: String,
    system_prompt: String,
    temperature: f32,
}

impl CompletionService {
    pub fn new(
        backend: Arc<dyn ChatCompletionBackend>,
        model: String,
        system_prompt: String,
        temperature: f32,
    ) -> Self {
        Self {
            backend,
            model,
            system_prompt,
            temperature,
        }
    }

    pub async fn complete(&self, prompt: &str, api_key: &str) -> String {
        if prompt.trim().is_empty() {
            tracing::debug!("Blank prompt, skipping completion call");
            return NO_PROMPT_REPLY.to_string();
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            system_prompt: self.system_prompt.clone(),
            user_prompt: prompt.to_string(),
            temperature: self.temperature,
        };

        match self.backend.send(&request, api_key).await {
            Ok(Some(reply)) if !reply.trim().is_empty() => {
                tracing::info!(chars = reply.len(), "Completion received");
                reply
            }
            Ok(_) => {
                tracing::warn!("Completion returned no usable choice");
                NO_RESPONSE_REPLY.to_string()
            }
            Err(e) => {
                tracing::error!(error = %e, "Completion call failed");
                format!("Error calling completion service: {}", e)
            }
        }
    }
}
