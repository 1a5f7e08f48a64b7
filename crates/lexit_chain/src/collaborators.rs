//! Capabilities the chain engine consumes from its surroundings.
//!
//! Both are synchronous: any network or disk work happens before the
//! engine is asked a question.

use super::summary::{DayKey, GameMode};
use super::word::Word;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Dictionary membership, already resolved.
pub trait DictionaryLookup {
    /// Whether `word` is an accepted dictionary word.
    fn contains(&self, word: &Word) -> bool;
}

impl<T: DictionaryLookup + ?Sized> DictionaryLookup for &T {
    fn contains(&self, word: &Word) -> bool {
        (**self).contains(word)
    }
}

impl<T: DictionaryLookup + ?Sized> DictionaryLookup for Box<T> {
    fn contains(&self, word: &Word) -> bool {
        (**self).contains(word)
    }
}

impl<T: DictionaryLookup + ?Sized> DictionaryLookup for Arc<T> {
    fn contains(&self, word: &Word) -> bool {
        (**self).contains(word)
    }
}

impl DictionaryLookup for HashSet<Word> {
    fn contains(&self, word: &Word) -> bool {
        HashSet::contains(self, word)
    }
}

impl DictionaryLookup for BTreeSet<Word> {
    fn contains(&self, word: &Word) -> bool {
        BTreeSet::contains(self, word)
    }
}

/// Source of starting words and scramble words.
pub trait SeedProvider {
    /// Starting word for a new session.
    ///
    /// Daily mode is deterministic in `day_key`; other modes pick at random.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if no seed can be produced.
    fn next_seed(&mut self, mode: GameMode, day_key: Option<&DayKey>) -> Result<Word, SeedError>;

    /// Uniformly random word that is not in `exclude`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Exhausted`] if every candidate is excluded.
    fn random_word(&mut self, exclude: &HashSet<Word>) -> Result<Word, SeedError>;
}

impl<T: SeedProvider + ?Sized> SeedProvider for Box<T> {
    fn next_seed(&mut self, mode: GameMode, day_key: Option<&DayKey>) -> Result<Word, SeedError> {
        (**self).next_seed(mode, day_key)
    }

    fn random_word(&mut self, exclude: &HashSet<Word>) -> Result<Word, SeedError> {
        (**self).random_word(exclude)
    }
}

/// Failure to produce a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SeedError {
    /// Daily seeds need a day key.
    #[display("Daily seed requested without a day key")]
    MissingDayKey,

    /// The candidate list is empty.
    #[display("Seed list is empty")]
    EmptyList,

    /// Every candidate is already used.
    #[display("Every seed candidate is already used")]
    Exhausted,
}

impl std::error::Error for SeedError {}
