//! Database models for the dictionary `words` table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Language handled by this backfill
pub const LANGUAGE: &str = "english";

/// Source handled by this backfill
pub const SOURCE: &str = "wiktionary";

/// WordRecord - Matches words table
///
/// Identified by `(word, language, source)`. Rows are created by the
/// ingestion pipeline; the backfill only writes `info`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub language: String,
    pub source: String,
    pub info: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl WordRecord {
    /// Eligible for backfill iff no frequency metadata has been stored yet
    pub fn is_pending(&self) -> bool {
        self.info.is_none()
    }
}
