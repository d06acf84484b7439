use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

use crate::application::ports::{SecretError, SecretSource};

/// Process-lifetime secret cache. Each name gets a publish-once slot: the
/// first successful fetch wins, concurrent first callers share one underlying
/// fetch, and fetch failures leave the slot empty so a later call may retry.
///
/// The map lock only guards slot lookup; it is never held across the
/// network call.
pub struct CredentialCache {
    source: Arc<dyn SecretSource>,
    slots: Mutex<HashMap<String, Arc<OnceCell<String>>>>,
}

impl CredentialCache {
    pub fn new(source: Arc<dyn SecretSource>) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a secret. A value structured as a keyed JSON document is
    /// unwrapped by the field named like the secret; an unstructured value is
    /// returned verbatim.
    pub async fn get(&self, name: &str) -> Result<String, SecretError> {
        let raw = self.raw(name).await?;
        if let Some(doc) = parse_keyed_document(&raw) {
            if let Some(value) = doc.get(name).and_then(|v| v.as_str()) {
                return Ok(value.to_string());
            }
        }
        Ok(raw)
    }

    /// Resolve one named field of a keyed secret document.
    pub async fn get_field(&self, name: &str, field: &str) -> Result<String, SecretError> {
        let raw = self.raw(name).await?;
        let doc = parse_keyed_document(&raw).ok_or_else(|| {
            SecretError::Unavailable(name.to_string(), "not a keyed document".to_string())
        })?;
        doc.get(field)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| SecretError::MissingField(name.to_string(), field.to_string()))
    }

    async fn raw(&self, name: &str) -> Result<String, SecretError> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|poisoned| {
                // The map holds only Arc handles, so a poisoned lock is still
                // structurally sound.
                poisoned.into_inner()
            });
            Arc::clone(slots.entry(name.to_string()).or_default())
        };

        slot.get_or_try_init(|| async {
            let value = self.source.fetch_secret(name).await?;
            tracing::debug!(secret = name, "Secret fetched and cached");
            Ok::<_, SecretError>(value)
        })
        .await
        .cloned()
    }
}

fn parse_keyed_document(raw: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    if !raw.trim_start().starts_with('{') {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => Some(map),
        _ => None,
    }
}
