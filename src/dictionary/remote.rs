//! Remote dictionary lookups.

use super::DictionaryError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Definitions returned per lookup, at most.
const MAX_DEFINITIONS: usize = 5;

/// Upper bound on one dictionary request, connect to last byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// An external source that knows whether a word exists.
#[async_trait::async_trait]
pub trait WordOracle: Send + Sync {
    /// Looks up one exact form.
    ///
    /// Returns `Ok(None)` when the source does not know the word, and the
    /// word's definitions otherwise.
    async fn lookup(&self, word: &str) -> Result<Option<Vec<String>>, DictionaryError>;
}

/// A word with its definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// The requested word, uppercase.
    pub word: String,
    /// Up to five definitions.
    pub definitions: Vec<String>,
}

/// Singular form of a simple plural: the word minus a trailing "S".
pub fn singular_form(word: &str) -> Option<&str> {
    word.strip_suffix('S')
        .or_else(|| word.strip_suffix('s'))
        .filter(|stem| !stem.is_empty())
}

/// Looks `word` up, retrying the singular form of a trailing-S miss.
///
/// # Errors
///
/// Returns [`DictionaryError`] if the oracle fails.
#[instrument(skip(oracle))]
pub async fn define(
    oracle: &dyn WordOracle,
    word: &str,
) -> Result<Option<Definition>, DictionaryError> {
    let word = word.trim();
    if word.is_empty() {
        return Ok(None);
    }

    let mut found = oracle.lookup(word).await?;
    if found.is_none() {
        if let Some(singular) = singular_form(word) {
            debug!(singular, "Exact form unknown, trying singular");
            found = oracle.lookup(singular).await?;
        }
    }

    Ok(found.map(|definitions| Definition {
        word: word.to_ascii_uppercase(),
        definitions,
    }))
}

/// Client for a dictionaryapi.dev style service: `GET {base}/{word}`.
#[derive(Debug, Clone)]
pub struct RemoteDictionary {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteDictionary {
    /// Creates a client for the service at `base_url`.
    ///
    /// Requests give up after [`REQUEST_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if the HTTP client cannot be built.
    #[instrument(skip(base_url))]
    pub fn new(base_url: impl Into<String>) -> Result<Self, DictionaryError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Creates a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if the HTTP client cannot be built.
    #[instrument(skip(base_url))]
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DictionaryError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(base_url = %base_url, timeout_ms = timeout.as_millis() as u64, "Creating remote dictionary client");
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl WordOracle for RemoteDictionary {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn lookup(&self, word: &str) -> Result<Option<Vec<String>>, DictionaryError> {
        let url = format!("{}/{}", self.base_url, word.to_ascii_lowercase());
        debug!(url = %url, "Sending dictionary request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = ?e, "Dictionary request failed");
            DictionaryError::new(format!("Dictionary request failed: {}", e))
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!("Word unknown to remote dictionary");
            return Ok(None);
        }

        let body = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read dictionary response");
            DictionaryError::new(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, "Dictionary API error");
            return Err(DictionaryError::new(format!(
                "Dictionary API error {}: {}",
                status, body
            )));
        }

        let definitions = parse_definitions(&body)?;
        info!(count = definitions.len(), "Word confirmed by remote dictionary");
        Ok(Some(definitions))
    }
}

#[derive(Debug, Deserialize)]
struct ApiEntry {
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Deserialize)]
struct ApiMeaning {
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    definition: String,
}

/// Extracts up to five definitions from the first entry of a response.
///
/// # Errors
///
/// Returns [`DictionaryError`] if the body is not an array of entries.
pub(crate) fn parse_definitions(body: &str) -> Result<Vec<String>, DictionaryError> {
    let entries: Vec<ApiEntry> = serde_json::from_str(body)?;
    Ok(entries
        .into_iter()
        .next()
        .map(|entry| {
            entry
                .meanings
                .into_iter()
                .flat_map(|m| m.definitions)
                .map(|d| d.definition)
                .take(MAX_DEFINITIONS)
                .collect()
        })
        .unwrap_or_default())
}
