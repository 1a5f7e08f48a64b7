//! Validated word and player-name value types.
//!
//! A [`Word`] can only be built through [`Word::parse`], so every word
//! that reaches the chain is already uppercase ASCII and within the
//! playable length bounds.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use tracing::instrument;

/// Trims surrounding whitespace and uppercases ASCII letters.
///
/// Non-ASCII characters pass through unchanged so that validation can
/// report them.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// A playable word: 4 to 8 uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    /// Shortest playable word.
    pub const MIN_LEN: usize = 4;
    /// Longest playable word.
    pub const MAX_LEN: usize = 8;

    /// Normalizes and validates a raw string.
    ///
    /// Checks run in a fixed order: emptiness, then length, then
    /// characters.
    ///
    /// # Errors
    ///
    /// Returns [`WordError`] describing the first check that failed.
    #[instrument(level = "trace")]
    pub fn parse(raw: &str) -> Result<Self, WordError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(WordError::Empty);
        }

        let count = normalized.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&count) {
            return Err(WordError::BadLength(count));
        }

        if let Some(bad) = normalized.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(WordError::InvalidCharacter(bad));
        }

        Ok(Self(normalized))
    }

    /// Returns the word as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters in the word.
    pub fn letter_count(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Word {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Word {
    type Error = WordError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

/// Reason a raw string is not a [`Word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum WordError {
    /// Nothing left after trimming.
    #[display("Word is empty")]
    Empty,

    /// Letter count outside `Word::MIN_LEN..=Word::MAX_LEN`.
    #[display("Word must be {}-{} letters, got {}", Word::MIN_LEN, Word::MAX_LEN, _0)]
    BadLength(usize),

    /// A character that is not an ASCII letter.
    #[display("Word contains a non-letter character {:?}", _0)]
    InvalidCharacter(char),
}

impl std::error::Error for WordError {}

/// Display name shown on leaderboards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Shortest accepted name.
    pub const MIN_LEN: usize = 2;
    /// Longest accepted name.
    pub const MAX_LEN: usize = 16;

    /// Trims and validates a display name.
    ///
    /// # Errors
    ///
    /// Returns [`NameError`] if the trimmed name is too short or too long.
    #[instrument(level = "trace")]
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let trimmed = raw.trim();
        let count = trimmed.chars().count();
        if count < Self::MIN_LEN {
            return Err(NameError::TooShort(count));
        }
        if count > Self::MAX_LEN {
            return Err(NameError::TooLong(count));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

/// Reason a display name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum NameError {
    /// Fewer than `PlayerName::MIN_LEN` characters.
    #[display("Name needs at least {} characters, got {}", PlayerName::MIN_LEN, _0)]
    TooShort(usize),

    /// More than `PlayerName::MAX_LEN` characters.
    #[display("Name allows at most {} characters, got {}", PlayerName::MAX_LEN, _0)]
    TooLong(usize),
}

impl std::error::Error for NameError {}
