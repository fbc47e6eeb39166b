//! Frequency Backfill - fills missing word-frequency metadata in the dictionary store
//!
//! Pending rows of the `words` table (english / wiktionary, `info IS NULL`)
//! are looked up one by one against a lexical frequency service and the
//! result is stored back as JSON. The stored `info` column is the only
//! checkpoint: rows that have it are never selected again.

pub mod db;
pub mod error;
pub mod frequency;
pub mod lookup;
pub mod worker;

pub use error::{BackfillError, Result};
pub use frequency::{FrequencyInfo, FrequencyResult, LookupOutcome};
pub use lookup::{FrequencyLookup, FrequencyLookupClient, LookupConfig};
pub use worker::{BatchProcessor, BatchResult, ContinuousRunner, RunSummary, RunnerConfig};
