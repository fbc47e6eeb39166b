//! Runner configuration

use std::time::Duration;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Words selected per batch
    pub batch_size: usize,

    /// Pause between lookups within a batch
    pub per_call_delay: Duration,

    /// Pause between batches, and before retrying a failed selection
    pub inter_batch_delay: Duration,

    /// Consecutive selection failures tolerated before giving up (None = retry forever)
    pub max_selection_retries: Option<u32>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            per_call_delay: Duration::from_millis(200),
            inter_batch_delay: Duration::from_millis(5000),
            max_selection_retries: None,
        }
    }
}

impl RunnerConfig {
    /// Create a new config builder
    pub fn builder() -> RunnerConfigBuilder {
        RunnerConfigBuilder::default()
    }
}

/// Builder for RunnerConfig
#[derive(Default)]
pub struct RunnerConfigBuilder {
    config: RunnerConfig,
}

impl RunnerConfigBuilder {
    /// Set batch size
    pub fn batch_size(mut self, size: usize) -> Self {
        self.config.batch_size = size;
        self
    }

    /// Set per-call delay
    pub fn per_call_delay(mut self, duration: Duration) -> Self {
        self.config.per_call_delay = duration;
        self
    }

    /// Set per-call delay in milliseconds
    pub fn per_call_delay_ms(mut self, ms: u64) -> Self {
        self.config.per_call_delay = Duration::from_millis(ms);
        self
    }

    /// Set inter-batch delay
    pub fn inter_batch_delay(mut self, duration: Duration) -> Self {
        self.config.inter_batch_delay = duration;
        self
    }

    /// Set inter-batch delay in milliseconds
    pub fn inter_batch_delay_ms(mut self, ms: u64) -> Self {
        self.config.inter_batch_delay = Duration::from_millis(ms);
        self
    }

    /// Cap consecutive selection retries
    pub fn max_selection_retries(mut self, retries: Option<u32>) -> Self {
        self.config.max_selection_retries = retries;
        self
    }

    /// Build the config
    pub fn build(self) -> RunnerConfig {
        self.config
    }
}
