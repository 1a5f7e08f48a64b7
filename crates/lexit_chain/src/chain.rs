//! The ordered word chain of one session.

use super::word::Word;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a word entered the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Submitted by the player and accepted.
    Played,
    /// Drawn with a scramble token.
    Scrambled,
}

/// One word appended after the seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainEntry {
    /// The word.
    pub word: Word,
    /// How it got here.
    pub kind: EntryKind,
}

/// Seed followed by every word appended since, in play order.
///
/// Played entries are one edit from the entry before them. Scrambled
/// entries are exempt and reset the current word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    seed: Word,
    entries: Vec<ChainEntry>,
}

impl Chain {
    /// Starts a chain at `seed`.
    pub fn new(seed: Word) -> Self {
        Self {
            seed,
            entries: Vec::new(),
        }
    }

    /// The starting word.
    pub fn seed(&self) -> &Word {
        &self.seed
    }

    /// Every entry after the seed.
    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    /// Words accepted through play, in order.
    pub fn history(&self) -> impl Iterator<Item = &Word> {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Played)
            .map(|e| &e.word)
    }

    /// Most recent word: the one the next submission must chain from.
    pub fn current(&self) -> &Word {
        self.entries.last().map(|e| &e.word).unwrap_or(&self.seed)
    }

    /// Whether `word` is the seed or any later entry.
    pub fn contains(&self, word: &Word) -> bool {
        self.seed == *word || self.entries.iter().any(|e| e.word == *word)
    }

    /// Seed and every entry as a set.
    pub fn used_words(&self) -> HashSet<Word> {
        std::iter::once(&self.seed)
            .chain(self.entries.iter().map(|e| &e.word))
            .cloned()
            .collect()
    }

    /// Number of played entries.
    pub fn played_count(&self) -> usize {
        self.history().count()
    }

    /// Seed followed by each entry's word.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        std::iter::once(&self.seed).chain(self.entries.iter().map(|e| &e.word))
    }

    pub(crate) fn push(&mut self, word: Word, kind: EntryKind) {
        self.entries.push(ChainEntry { word, kind });
    }

    #[cfg(test)]
    pub(crate) fn entries_mut(&mut self) -> &mut Vec<ChainEntry> {
        &mut self.entries
    }
}
