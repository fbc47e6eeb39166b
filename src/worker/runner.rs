//! Continuous runner - batch loop until no pending words remain

use crate::db::WordStore;
use crate::error::{BackfillError, Result};
use crate::lookup::FrequencyLookup;
use crate::worker::pacing::{FixedDelay, PacingPolicy};
use crate::worker::processor::{BatchProcessor, BatchResult};
use crate::worker::RunnerConfig;
use tokio::time::sleep;
use tracing::{error, info};

/// Totals across every batch of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub batches: usize,
    pub processed: usize,
    pub success: usize,
    pub error: usize,
    pub unresolved: usize,
    pub selection_failures: usize,
}

impl RunSummary {
    fn add_batch(&mut self, batch: &BatchResult) {
        self.batches += 1;
        self.processed += batch.processed;
        self.success += batch.success;
        self.error += batch.error;
        self.unresolved += batch.unresolved;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    Done,
}

/// Runs batches until the pending set is exhausted
pub struct ContinuousRunner<S, L> {
    processor: BatchProcessor<S, L>,
    config: RunnerConfig,
    pacing: Box<dyn PacingPolicy>,
}

impl<S: WordStore, L: FrequencyLookup> ContinuousRunner<S, L> {
    /// Create a runner pacing lookups with a fixed `per_call_delay`
    pub fn new(processor: BatchProcessor<S, L>, config: RunnerConfig) -> Self {
        let pacing = Box::new(FixedDelay::new(config.per_call_delay));
        Self::with_pacing(processor, config, pacing)
    }

    /// Create a runner with a custom pacing policy
    pub fn with_pacing(
        processor: BatchProcessor<S, L>,
        config: RunnerConfig,
        pacing: Box<dyn PacingPolicy>,
    ) -> Self {
        Self {
            processor,
            config,
            pacing,
        }
    }

    /// Main loop
    ///
    /// Returns once a batch comes back empty or short. A failed selection
    /// is retried after `inter_batch_delay`; without `max_selection_retries`
    /// it is retried indefinitely.
    pub async fn run(&self) -> Result<RunSummary> {
        info!("Starting frequency backfill...");
        info!("Batch size: {}", self.config.batch_size);
        info!("Per-call delay: {:?}", self.config.per_call_delay);
        info!("Inter-batch delay: {:?}", self.config.inter_batch_delay);

        let mut summary = RunSummary::default();
        let mut consecutive_failures: u32 = 0;
        let mut state = RunState::Running;

        while state == RunState::Running {
            match self
                .processor
                .run_batch(self.config.batch_size, self.pacing.as_ref())
                .await
            {
                Ok(batch) => {
                    consecutive_failures = 0;

                    if batch.is_empty() {
                        info!("No pending words left");
                        state = RunState::Done;
                        continue;
                    }

                    summary.add_batch(&batch);
                    info!(
                        "Batch {} complete: {} processed so far ({} success, {} error)",
                        summary.batches, summary.processed, summary.success, summary.error
                    );

                    if batch.processed < self.config.batch_size {
                        info!("Last page reached");
                        state = RunState::Done;
                    } else {
                        sleep(self.config.inter_batch_delay).await;
                    }
                }
                Err(e) => {
                    summary.selection_failures += 1;
                    consecutive_failures += 1;
                    error!("Batch selection failed: {}", e);

                    if let Some(max) = self.config.max_selection_retries {
                        if consecutive_failures > max {
                            return Err(BackfillError::RetryExhausted {
                                attempts: consecutive_failures,
                                last_error: e.to_string(),
                            });
                        }
                    }

                    info!("Retrying in {:?}", self.config.inter_batch_delay);
                    sleep(self.config.inter_batch_delay).await;
                }
            }
        }

        info!(
            "Backfill finished: {} batches, {} processed, {} success, {} error, {} unresolved",
            summary.batches, summary.processed, summary.success, summary.error, summary.unresolved
        );
        Ok(summary)
    }

    /// Run a single batch and exit
    pub async fn run_once(&self) -> Result<BatchResult> {
        info!("Running a single batch...");
        self.processor
            .run_batch(self.config.batch_size, self.pacing.as_ref())
            .await
    }
}
