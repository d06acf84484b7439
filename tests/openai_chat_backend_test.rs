use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use voxrelay::application::ports::{
    ChatCompletionBackend, CompletionBackendError, CompletionRequest,
};
use voxrelay::infrastructure::llm::OpenAiChatBackend;

async fn start_mock_completion_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let endpoint = format!("http://{}/v1/chat/completions", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (endpoint, shutdown_tx)
}

fn request() -> CompletionRequest {
    CompletionRequest {
        model: "gpt-3.5-turbo".to_string(),
        system_prompt: "You are a helpful assistant.".to_string(),
        user_prompt: "Hello".to_string(),
        temperature: 0.7,
    }
}

#[tokio::test]
async fn given_valid_response_when_sending_then_first_choice_content_is_extracted() {
    let response_body =
        r#"{"choices": [{"message": {"role": "assistant", "content": "Hi there"}}]}"#;
    let (endpoint, shutdown_tx) = start_mock_completion_server(200, response_body).await;

    let backend = OpenAiChatBackend::new(reqwest::Client::new(), &endpoint);
    let result = backend.send(&request(), "test-key").await;

    assert_eq!(result.unwrap(), Some("Hi there".to_string()));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_choice_list_when_sending_then_none_is_returned() {
    let response_body = r#"{"choices": []}"#;
    let (endpoint, shutdown_tx) = start_mock_completion_server(200, response_body).await;

    let backend = OpenAiChatBackend::new(reqwest::Client::new(), &endpoint);
    let result = backend.send(&request(), "test-key").await;

    assert_eq!(result.unwrap(), None);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_sending_then_api_request_failed() {
    let response_body = r#"{"error": {"message": "invalid api key"}}"#;
    let (endpoint, shutdown_tx) = start_mock_completion_server(401, response_body).await;

    let backend = OpenAiChatBackend::new(reqwest::Client::new(), &endpoint);
    let result = backend.send(&request(), "bad-key").await;

    match result {
        Err(CompletionBackendError::ApiRequestFailed(detail)) => {
            assert!(detail.contains("invalid api key"));
        }
        other => panic!("expected ApiRequestFailed, got {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unparseable_body_when_sending_then_invalid_response() {
    let (endpoint, shutdown_tx) = start_mock_completion_server(200, "not json").await;

    let backend = OpenAiChatBackend::new(reqwest::Client::new(), &endpoint);
    let result = backend.send(&request(), "test-key").await;

    assert!(matches!(
        result,
        Err(CompletionBackendError::InvalidResponse(_))
    ));
    shutdown_tx.send(()).ok();
}
