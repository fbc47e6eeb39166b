//! Lexical frequency service client (Datamuse `/words`)

use crate::error::{BackfillError, Result};
use crate::frequency::{extract_frequency_tag, FrequencyResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default lexical service endpoint
pub const DEFAULT_LOOKUP_URL: &str = "https://api.datamuse.com/words";

/// Word used to probe the service at startup
const PROBE_WORD: &str = "test";

/// Anything that can resolve a word to a frequency result.
///
/// Implementations must not fail: every failure mode is reported through
/// the returned [`FrequencyResult`].
#[async_trait]
pub trait FrequencyLookup: Send + Sync {
    async fn lookup(&self, word: &str) -> FrequencyResult;
}

/// Configuration for the lookup client
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Endpoint of the `/words` API
    pub base_url: String,
    /// Request timeout (default: 10 seconds)
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOOKUP_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl LookupConfig {
    /// Default config with the endpoint overridden by `LEXICAL_SERVICE_URL` if set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("LEXICAL_SERVICE_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}

/// One candidate entry in the service response
#[derive(Debug, Deserialize)]
struct LexicalEntry {
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    tags: Vec<String>,
}

/// HTTP client for the lexical frequency service
pub struct FrequencyLookupClient {
    client: Client,
    base_url: Url,
}

impl FrequencyLookupClient {
    /// Create a client with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(LookupConfig::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(config: LookupConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(BackfillError::HttpClient)?;

        Ok(Self { client, base_url })
    }

    /// Verify the service answers before a run starts
    pub async fn check_connection(&self) -> Result<()> {
        self.fetch_entries(PROBE_WORD)
            .await
            .map(|_| ())
            .map_err(|reason| BackfillError::LookupUnavailable {
                url: self.base_url.to_string(),
                reason,
            })
    }

    /// Build the exact-spelling, frequency-tagged, single-result query URL
    fn query_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("sp", word)
            .append_pair("md", "f")
            .append_pair("max", "1");
        url
    }

    async fn fetch_entries(&self, word: &str) -> std::result::Result<Vec<LexicalEntry>, String> {
        let response = self
            .client
            .get(self.query_url(word))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP error {}", status.as_u16()));
        }

        response
            .json::<Vec<LexicalEntry>>()
            .await
            .map_err(|e| format!("Invalid response body: {}", e))
    }
}

#[async_trait]
impl FrequencyLookup for FrequencyLookupClient {
    async fn lookup(&self, word: &str) -> FrequencyResult {
        if word.trim().is_empty() {
            warn!("Refusing to look up an empty word");
            return FrequencyResult::transport_error("empty word");
        }

        match self.fetch_entries(word).await {
            Ok(entries) => match entries.into_iter().next() {
                Some(entry) => {
                    let frequency = extract_frequency_tag(entry.tags.as_slice());
                    debug!(
                        "Found '{}': frequency={:?}, score={:?}",
                        word, frequency, entry.score
                    );
                    FrequencyResult::found(frequency, entry.score)
                }
                None => {
                    warn!("No lexical entry for '{}'", word);
                    FrequencyResult::not_found()
                }
            },
            Err(message) => {
                warn!("Lookup failed for '{}': {}", word, message);
                FrequencyResult::transport_error(message)
            }
        }
    }
}
