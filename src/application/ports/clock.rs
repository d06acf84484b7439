use std::time::Duration;

use async_trait::async_trait;

/// Sleep primitive behind the poll loop, abstracted so tests can simulate
/// elapsed attempts without real waits.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
