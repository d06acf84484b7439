use std::time::Duration;

use axum::extract::{Form, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::domain::IncomingMessage;
use crate::presentation::state::AppState;

/// Reply used when the completion API key cannot be resolved. Distinct from
/// the audio-failure reply.
pub const KEY_UNAVAILABLE_REPLY: &str = "Error: API key unavailable.";

/// Twilio-style form payload. Only the fields the pipeline consumes are
/// modeled; the rest of the form is ignored.
#[derive(Debug, Deserialize)]
pub struct WebhookForm {
    #[serde(rename = "From", default)]
    pub from: String,
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "MediaUrl0")]
    pub media_url: Option<String>,
}

#[tracing::instrument(skip(state, form))]
pub async fn webhook_handler(
    State(state): State<AppState>,
    Form(form): Form<WebhookForm>,
) -> Response {
    let message = IncomingMessage::new(form.from, form.body, form.media_url);
    tracing::info!(
        from = %message.from,
        has_media = message.has_media(),
        "Inbound message"
    );

    let api_key = state
        .credentials
        .get(&state.settings.secrets.completion_key_name)
        .await
        .unwrap_or_default();
    if api_key.trim().is_empty() {
        tracing::error!("Completion API key unavailable");
        return xml_reply(StatusCode::INTERNAL_SERVER_ERROR, KEY_UNAVAILABLE_REPLY);
    }

    if message.has_media() {
        return handle_audio(&state, &message, &api_key).await;
    }

    let reply = state.completion.complete(&message.body, &api_key).await;
    xml_reply(StatusCode::OK, &reply)
}

async fn handle_audio(state: &AppState, message: &IncomingMessage, api_key: &str) -> Response {
    let cancel = CancellationToken::new();
    let deadline = Duration::from_secs(state.settings.server.request_deadline_secs);
    let deadline_guard = cancel.clone();
    let timer = tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        deadline_guard.cancel();
    });

    let outcome = state.audio_pipeline.process(message, api_key, &cancel).await;
    timer.abort();

    let status = if outcome.degraded && state.settings.policy.audio_failure_is_server_error {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    if outcome.degraded {
        tracing::warn!(trace = %outcome.trace.render(), "Audio pipeline degraded");
        if state.settings.policy.echo_trace {
            let reply = format!("{} [{}]", outcome.reply, outcome.trace.render());
            return xml_reply(status, &reply);
        }
    } else {
        tracing::debug!(trace = %outcome.trace.render(), "Audio pipeline trace");
    }

    xml_reply(status, &outcome.reply)
}

fn xml_reply(status: StatusCode, text: &str) -> Response {
    let body = format!(
        "<Response><Message>{}</Message></Response>",
        xml_escape(text)
    );
    (
        status,
        [(header::CONTENT_TYPE, "application/xml")],
        body,
    )
        .into_response()
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
