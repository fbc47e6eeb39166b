//! Pacing policies for calls to the lexical service

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// Decides how long to wait between consecutive lookups
#[async_trait]
pub trait PacingPolicy: Send + Sync {
    /// Suspend until the next call may be issued
    async fn pause(&self);
}

/// Constant delay between calls
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl PacingPolicy for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}
