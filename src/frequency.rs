//! Frequency lookup results and their persisted form

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Error recorded for words the lexical service has no entry for
pub const NOT_FOUND_MESSAGE: &str = "Word not found in lexical service";

/// Outcome of a single lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found {
        frequency: Option<String>,
        score: Option<f64>,
    },
    NotFound,
    TransportError {
        message: String,
    },
}

/// Result of looking up one word, as handed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResult {
    pub outcome: LookupOutcome,
    pub fetched_at: DateTime<Utc>,
}

impl FrequencyResult {
    pub fn found(frequency: Option<String>, score: Option<f64>) -> Self {
        Self::at(LookupOutcome::Found { frequency, score })
    }

    pub fn not_found() -> Self {
        Self::at(LookupOutcome::NotFound)
    }

    pub fn transport_error(message: impl Into<String>) -> Self {
        Self::at(LookupOutcome::TransportError {
            message: message.into(),
        })
    }

    fn at(outcome: LookupOutcome) -> Self {
        Self {
            outcome,
            fetched_at: Utc::now(),
        }
    }

    /// True when the lookup produced no usable frequency data
    pub fn is_unresolved(&self) -> bool {
        !matches!(self.outcome, LookupOutcome::Found { .. })
    }

    /// Flatten into the JSON shape stored in `words.info`
    pub fn to_info(&self) -> FrequencyInfo {
        let (frequency, score, error) = match &self.outcome {
            LookupOutcome::Found { frequency, score } => (frequency.clone(), *score, None),
            LookupOutcome::NotFound => (None, None, Some(NOT_FOUND_MESSAGE.to_string())),
            LookupOutcome::TransportError { message } => (None, None, Some(message.clone())),
        };

        FrequencyInfo {
            frequency,
            score,
            fetched_at: self.fetched_at,
            error,
        }
    }
}

/// Persisted frequency metadata (`words.info`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyInfo {
    pub frequency: Option<String>,
    pub score: Option<f64>,
    pub fetched_at: DateTime<Utc>,
    pub error: Option<String>,
}

/// Extract the value of the first `f:<number>` tag
pub fn extract_frequency_tag<S: AsRef<str>>(tags: &[S]) -> Option<String> {
    static FREQ_TAG_RE: OnceLock<Regex> = OnceLock::new();
    let re = FREQ_TAG_RE.get_or_init(|| {
        Regex::new(r"^f:(\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)$").expect("valid frequency tag regex")
    });

    for tag in tags {
        let tag: &str = tag.as_ref();
        if let Some(caps) = re.captures(tag) {
            return Some(caps[1].to_string());
        }
        if tag.starts_with("f:") {
            debug!("Ignoring malformed frequency tag '{}'", tag);
        }
    }
    None
}
