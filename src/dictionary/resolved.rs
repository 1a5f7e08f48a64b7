//! Dictionary answers resolved ahead of the engine.

use super::{DictionaryError, WordList, WordOracle, define};
use lexit_chain::{DictionaryLookup, Word};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// The bundled word list plus words confirmed by a remote oracle.
///
/// The engine asks [`DictionaryLookup::contains`], which never does I/O.
/// Callers run [`resolve`](Self::resolve) first for words the list lacks.
#[derive(Debug, Clone, Default)]
pub struct ResolvedDictionary {
    list: WordList,
    confirmed: HashSet<Word>,
}

impl ResolvedDictionary {
    /// Wraps a word list with no remote confirmations yet.
    pub fn new(list: WordList) -> Self {
        Self {
            list,
            confirmed: HashSet::new(),
        }
    }

    /// The bundled list.
    pub fn list(&self) -> &WordList {
        &self.list
    }

    /// Words accepted through the oracle.
    pub fn confirmed(&self) -> &HashSet<Word> {
        &self.confirmed
    }

    /// Records a word as known.
    pub fn confirm(&mut self, word: Word) {
        self.confirmed.insert(word);
    }

    /// Decides whether `word` is a dictionary word.
    ///
    /// Checks the list, then the oracle for the exact form, then the
    /// singular form. Positive remote answers are remembered.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if the oracle fails.
    #[instrument(skip(self, oracle), fields(word = %word))]
    pub async fn resolve(
        &mut self,
        word: &Word,
        oracle: &dyn WordOracle,
    ) -> Result<bool, DictionaryError> {
        if self.contains(word) {
            debug!("Word known locally");
            return Ok(true);
        }

        let known = define(oracle, word.as_str()).await?.is_some();
        if known {
            info!("Word confirmed remotely");
            self.confirmed.insert(word.clone());
        } else {
            debug!("Word unknown");
        }
        Ok(known)
    }
}

impl DictionaryLookup for ResolvedDictionary {
    fn contains(&self, word: &Word) -> bool {
        self.list.contains(word) || self.confirmed.contains(word)
    }
}
