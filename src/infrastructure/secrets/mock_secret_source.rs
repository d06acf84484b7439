use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{SecretError, SecretSource};

/// Test double with a fetch counter and an optional artificial delay, so
/// cache tests can widen the concurrent first-access window.
pub struct MockSecretSource {
    values: Mutex<HashMap<String, String>>,
    delay: Duration,
    fail_once: Mutex<HashMap<String, bool>>,
    fetches: AtomicUsize,
}

impl MockSecretSource {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            delay: Duration::ZERO,
            fail_once: Mutex::new(HashMap::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_secret(self, name: &str, value: &str) -> Self {
        self.values
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make the first fetch of `name` fail; later fetches succeed.
    pub fn failing_once(self, name: &str) -> Self {
        self.fail_once
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(name.to_string(), true);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Default for MockSecretSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretSource for MockSecretSource {
    async fn fetch_secret(&self, name: &str) -> Result<String, SecretError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.delay > Duration::ZERO {
            tokio::time::sleep(self.delay).await;
        }

        let should_fail = {
            let mut fail_once = self.fail_once.lock().unwrap_or_else(|p| p.into_inner());
            match fail_once.get_mut(name) {
                Some(pending @ true) => {
                    *pending = false;
                    true
                }
                _ => false,
            }
        };
        if should_fail {
            return Err(SecretError::Unavailable(
                name.to_string(),
                "scripted failure".to_string(),
            ));
        }

        self.values
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(name)
            .cloned()
            .ok_or_else(|| SecretError::Unavailable(name.to_string(), "no such secret".to_string()))
    }
}
