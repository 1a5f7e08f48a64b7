//! The bundled dictionary word list.

use super::DictionaryError;
use lexit_chain::{DictionaryLookup, Word};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Words used when the bundled list cannot be loaded.
pub const FALLBACK_WORDS: [&str; 6] = ["STONE", "ALONE", "CRANE", "LIGHT", "WATER", "CROWN"];

/// Sorted, de-duplicated set of playable words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: BTreeSet<Word>,
}

impl WordList {
    /// Builds a list from raw strings.
    ///
    /// Entries are normalized to uppercase; anything that is not a 4 to 8
    /// letter alphabetic word is skipped.
    #[instrument(skip_all)]
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skipped = 0usize;
        let words = raw
            .into_iter()
            .filter_map(|entry| match Word::parse(entry.as_ref()) {
                Ok(word) => Some(word),
                Err(_) => {
                    skipped += 1;
                    None
                }
            })
            .collect::<BTreeSet<_>>();

        debug!(kept = words.len(), skipped, "Word list built");
        Self { words }
    }

    /// The six-word list used when nothing else is available.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_WORDS)
    }

    /// Loads a JSON array of strings.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if the file cannot be read or is not a
    /// JSON array of strings.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let raw: Vec<String> = serde_json::from_str(&content)?;
        let list = Self::new(raw);
        info!(words = list.len(), "Word list loaded");
        Ok(list)
    }

    /// Loads a JSON word list, falling back to [`FALLBACK_WORDS`].
    ///
    /// An unreadable file or an empty list both fall back.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        match Self::from_json_file(path) {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => {
                warn!("Word list is empty, using fallback words");
                Self::fallback()
            }
            Err(e) => {
                warn!(error = %e, "Word list unavailable, using fallback words");
                Self::fallback()
            }
        }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    /// Words in ascending order, as an owned vector.
    pub fn to_vec(&self) -> Vec<Word> {
        self.words.iter().cloned().collect()
    }

    /// Adds a word; returns whether it was new.
    pub fn insert(&mut self, word: Word) -> bool {
        self.words.insert(word)
    }
}

impl DictionaryLookup for WordList {
    fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }
}

impl FromIterator<Word> for WordList {
    fn from_iter<T: IntoIterator<Item = Word>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_new_normalizes_and_filters() {
        let list = WordList::new(["stone", "STONE", "cat", "toolongword", "st0ne", " crane "]);
        let words: Vec<&str> = list.iter().map(Word::as_str).collect();
        assert_eq!(words, vec!["CRANE", "STONE"]);
    }

    #[test]
    fn test_fallback_has_six_words() {
        let list = WordList::fallback();
        assert_eq!(list.len(), 6);
        assert!(list.contains(&Word::parse("CROWN").unwrap()));
    }

    #[test]
    fn test_load_or_fallback_on_missing_file() {
        let list = WordList::load_or_fallback("/nonexistent/words.json");
        assert_eq!(list, WordList::fallback());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"["tone", "tones", "stone"]"#).unwrap();
        let list = WordList::from_json_file(file.path()).unwrap();
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(WordList::from_json_file(file.path()).is_err());
        assert_eq!(WordList::load_or_fallback(file.path()), WordList::fallback());
    }
}
