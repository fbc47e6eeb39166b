//! Batch processor: one selection, sequential lookups, write-back

use crate::db::WordStore;
use crate::error::Result;
use crate::lookup::FrequencyLookup;
use crate::worker::pacing::PacingPolicy;
use tracing::{debug, info, warn};

/// Tally for a single batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Words attempted
    pub processed: usize,
    /// Words whose info was written
    pub success: usize,
    /// Words whose write failed or matched no row
    pub error: usize,
    /// Written words whose info records a lookup error (subset of `success`)
    pub unresolved: usize,
}

impl BatchResult {
    pub fn is_empty(&self) -> bool {
        self.processed == 0
    }
}

/// Processes batches of pending words
pub struct BatchProcessor<S, L> {
    store: S,
    lookup: L,
}

impl<S: WordStore, L: FrequencyLookup> BatchProcessor<S, L> {
    /// Create a new batch processor
    pub fn new(store: S, lookup: L) -> Self {
        Self { store, lookup }
    }

    /// Process up to `batch_size` pending words
    ///
    /// Only a failure to select the batch is returned as an error; lookup
    /// and write failures for individual words are counted in the result.
    pub async fn run_batch(
        &self,
        batch_size: usize,
        pacing: &dyn PacingPolicy,
    ) -> Result<BatchResult> {
        let mut words = self.store.select_pending(batch_size).await?;
        words.truncate(batch_size);

        let mut result = BatchResult::default();
        if words.is_empty() {
            return Ok(result);
        }

        info!("Processing batch of {} words", words.len());
        let last = words.len() - 1;

        for (index, word) in words.iter().enumerate() {
            let lookup = self.lookup.lookup(word).await;
            let info = lookup.to_info();

            match self.store.update_info(word, &info).await {
                Ok(true) => {
                    result.success += 1;
                    if lookup.is_unresolved() {
                        result.unresolved += 1;
                    }
                    debug!("Stored frequency info for '{}'", word);
                }
                Ok(false) => {
                    result.error += 1;
                    warn!("No row updated for '{}'", word);
                }
                Err(e) => {
                    result.error += 1;
                    warn!("Failed to store frequency info for '{}': {}", word, e);
                }
            }
            result.processed += 1;

            if index < last {
                pacing.pause().await;
            }
        }

        info!(
            "Batch done: processed={}, success={}, error={}, unresolved={}",
            result.processed, result.success, result.error, result.unresolved
        );
        Ok(result)
    }
}
