//! In-memory fakes for the store and lookup seams

#![allow(dead_code)]

use async_trait::async_trait;
use frequency_backfill::db::WordStore;
use frequency_backfill::error::{BackfillError, Result};
use frequency_backfill::frequency::{FrequencyInfo, FrequencyResult};
use frequency_backfill::lookup::FrequencyLookup;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Row {
    word: String,
    info: Option<FrequencyInfo>,
    deleted: bool,
}

#[derive(Default)]
struct StoreState {
    rows: Vec<Row>,
    failing_updates: HashSet<String>,
    select_failures_left: usize,
    select_calls: usize,
    oversized_selects: bool,
}

/// Word store kept in insertion (creation) order
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn with_words(words: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            state.rows = words
                .iter()
                .map(|w| Row {
                    word: w.to_string(),
                    info: None,
                    deleted: false,
                })
                .collect();
        }
        store
    }

    pub fn numbered(count: usize) -> Self {
        let words: Vec<String> = (0..count).map(|i| format!("word{:03}", i)).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        Self::with_words(&refs)
    }

    /// Writes for `word` fail with a database error
    pub fn fail_updates_for(self, word: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_updates
            .insert(word.to_string());
        self
    }

    /// `word` is still selected but its row is gone when written
    pub fn delete_on_update(self, word: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            if let Some(row) = state.rows.iter_mut().find(|r| r.word == word) {
                row.deleted = true;
            }
        }
        self
    }

    /// The next `count` selections fail
    pub fn fail_selects(self, count: usize) -> Self {
        self.state.lock().unwrap().select_failures_left = count;
        self
    }

    /// Selections ignore the limit and return every pending row
    pub fn ignore_limit(self) -> Self {
        self.state.lock().unwrap().oversized_selects = true;
        self
    }

    pub fn info(&self, word: &str) -> Option<FrequencyInfo> {
        let state = self.state.lock().unwrap();
        state
            .rows
            .iter()
            .find(|r| r.word == word)
            .and_then(|r| r.info.clone())
    }

    pub fn pending_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.rows.iter().filter(|r| r.info.is_none()).count()
    }

    pub fn select_calls(&self) -> usize {
        self.state.lock().unwrap().select_calls
    }
}

#[async_trait]
impl WordStore for InMemoryStore {
    async fn select_pending(&self, limit: usize) -> Result<Vec<String>> {
        let mut state = self.state.lock().unwrap();
        state.select_calls += 1;

        if state.select_failures_left > 0 {
            state.select_failures_left -= 1;
            return Err(BackfillError::Database(sqlx::Error::PoolTimedOut));
        }

        let take = if state.oversized_selects {
            usize::MAX
        } else {
            limit
        };
        Ok(state
            .rows
            .iter()
            .filter(|r| r.info.is_none())
            .take(take)
            .map(|r| r.word.clone())
            .collect())
    }

    async fn update_info(&self, word: &str, info: &FrequencyInfo) -> Result<bool> {
        let mut state = self.state.lock().unwrap();

        if state.failing_updates.contains(word) {
            return Err(BackfillError::Database(sqlx::Error::PoolClosed));
        }

        match state.rows.iter_mut().find(|r| r.word == word) {
            Some(row) if row.deleted => Ok(false),
            Some(row) => {
                row.info = Some(info.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Scripted lookup; words without a script resolve to a found result
#[derive(Clone, Default)]
pub struct ScriptedLookup {
    not_found: HashSet<String>,
    failures: HashMap<String, String>,
    fail_all: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLookup {
    pub fn not_found(mut self, word: &str) -> Self {
        self.not_found.insert(word.to_string());
        self
    }

    pub fn transport_error(mut self, word: &str, message: &str) -> Self {
        self.failures.insert(word.to_string(), message.to_string());
        self
    }

    pub fn always_failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FrequencyLookup for ScriptedLookup {
    async fn lookup(&self, word: &str) -> FrequencyResult {
        self.calls.lock().unwrap().push(word.to_string());

        if self.fail_all {
            return FrequencyResult::transport_error("connection refused");
        }
        if let Some(message) = self.failures.get(word) {
            return FrequencyResult::transport_error(message.clone());
        }
        if self.not_found.contains(word) {
            return FrequencyResult::not_found();
        }
        FrequencyResult::found(Some("42.5".to_string()), Some(1000.0))
    }
}
