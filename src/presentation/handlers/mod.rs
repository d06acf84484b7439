mod health;
mod webhook;

pub use health::health_handler;
pub use webhook::{webhook_handler, WebhookForm, KEY_UNAVAILABLE_REPLY};
