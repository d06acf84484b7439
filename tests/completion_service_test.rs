use std::sync::Arc;

use voxrelay::application::services::{CompletionService, NO_PROMPT_REPLY, NO_RESPONSE_REPLY};
use voxrelay::infrastructure::llm::MockChatBackend;

fn service(backend: Arc<MockChatBackend>) -> CompletionService {
    CompletionService::new(
        backend,
        "gpt-3.5-turbo".to_string(),
        "You are a helpful assistant replying to text messages.".to_string(),
        0.7,
    )
}

#[tokio::test]
async fn given_blank_prompt_when_completing_then_fixed_reply_and_no_network_call() {
    let backend = Arc::new(MockChatBackend::returning("should not be used"));
    let service = service(Arc::clone(&backend));

    assert_eq!(service.complete("", "key").await, NO_PROMPT_REPLY);
    assert_eq!(service.complete("   ", "key").await, NO_PROMPT_REPLY);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn given_valid_prompt_when_completing_then_backend_reply_is_returned() {
    let backend = Arc::new(MockChatBackend::returning("Hi there"));
    let service = service(Arc::clone(&backend));

    assert_eq!(service.complete("Hello", "key").await, "Hi there");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn given_empty_choice_list_when_completing_then_no_response_fallback() {
    let backend = Arc::new(MockChatBackend::empty_choices());
    let service = service(backend);

    assert_eq!(service.complete("Hello", "key").await, NO_RESPONSE_REPLY);
}

#[tokio::test]
async fn given_backend_failure_when_completing_then_reply_carries_error_detail() {
    let backend = Arc::new(MockChatBackend::failing("connection refused"));
    let service = service(backend);

    let reply = service.complete("Hello", "key").await;

    assert!(reply.starts_with("Error calling completion service:"));
    assert!(reply.contains("connection refused"));
}
