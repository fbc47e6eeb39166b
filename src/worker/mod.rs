//! Worker module for backfilling word frequency metadata
//!
//! This module provides:
//! - BatchProcessor: Processes one batch of pending words
//! - ContinuousRunner: Loops batches until no pending words remain
//! - PacingPolicy: Rate limit between lookups
//! - RunnerConfig: Configuration for the runner

pub mod config;
pub mod pacing;
pub mod processor;
pub mod runner;

pub use config::RunnerConfig;
pub use pacing::{FixedDelay, PacingPolicy};
pub use processor::{BatchProcessor, BatchResult};
pub use runner::{ContinuousRunner, RunSummary};
