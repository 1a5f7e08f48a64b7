//! Dictionary error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Dictionary error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Dictionary error: {} at {}:{}", message, file, line)]
pub struct DictionaryError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DictionaryError {
    /// Creates a new dictionary error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for DictionaryError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for DictionaryError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for DictionaryError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("Request error: {}", err))
    }
}
