use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::Clock;

pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
