use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::Clock;

/// Returns immediately from every sleep and counts them, so poll-loop tests
/// simulate elapsed attempts without real waits.
pub struct ManualClock {
    sleeps: AtomicU32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            sleeps: AtomicU32::new(0),
        }
    }

    pub fn sleeps(&self) -> u32 {
        self.sleeps.load(Ordering::SeqCst)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    async fn sleep(&self, _duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        // Yield so a cancelled token can still win the select.
        tokio::task::yield_now().await;
    }
}
