//! Deterministic daily seeds.

use crate::dictionary::WordList;
use lexit_chain::{DayKey, SeedError, Word};
use sha1::{Digest, Sha1};
use tracing::{debug, instrument};

/// First four bytes of the SHA-1 of `day_key`, big-endian.
pub fn day_hash(day_key: &DayKey) -> u32 {
    hash_prefix(&day_key.to_string())
}

fn hash_prefix(text: &str) -> u32 {
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    let out = hasher.finalize();
    u32::from_be_bytes([out[0], out[1], out[2], out[3]])
}

/// The curated seed list, sorted, indexed by day hash.
///
/// Every player gets the same seed for the same day key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySeeds {
    seeds: Vec<Word>,
}

impl DailySeeds {
    /// Builds the list; words are sorted and de-duplicated.
    pub fn new(seeds: impl IntoIterator<Item = Word>) -> Self {
        let mut seeds: Vec<Word> = seeds.into_iter().collect();
        seeds.sort();
        seeds.dedup();
        Self { seeds }
    }

    /// Curated seeds in ascending order.
    pub fn seeds(&self) -> &[Word] {
        &self.seeds
    }

    /// Seed for `day_key`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::EmptyList`] if the list is empty.
    #[instrument(skip(self), fields(day_key = %day_key, seeds = self.seeds.len()))]
    pub fn seed_for(&self, day_key: &DayKey) -> Result<Word, SeedError> {
        if self.seeds.is_empty() {
            return Err(SeedError::EmptyList);
        }
        let index = day_hash(day_key) as usize % self.seeds.len();
        debug!(index, "Daily seed index");
        Ok(self.seeds[index].clone())
    }
}

impl From<WordList> for DailySeeds {
    fn from(list: WordList) -> Self {
        Self::new(list.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(words: &[&str]) -> DailySeeds {
        DailySeeds::new(words.iter().map(|w| Word::parse(w).unwrap()))
    }

    #[test]
    fn test_hash_prefix_matches_sha1() {
        // SHA-1("abc") = a9993e36...
        assert_eq!(hash_prefix("abc"), 0xa999_3e36);
    }

    #[test]
    fn test_same_day_same_seed() {
        let list = seeds(&["STONE", "CRANE", "LIGHT", "WATER"]);
        let key = DayKey::parse("2025-06-01").unwrap();
        assert_eq!(list.seed_for(&key).unwrap(), list.seed_for(&key).unwrap());
    }

    #[test]
    fn test_index_uses_sorted_order() {
        let unsorted = seeds(&["WATER", "CRANE", "STONE", "LIGHT"]);
        let sorted = seeds(&["CRANE", "LIGHT", "STONE", "WATER"]);
        let key = DayKey::parse("2025-06-01").unwrap();
        assert_eq!(unsorted.seed_for(&key), sorted.seed_for(&key));

        let expected = day_hash(&key) as usize % 4;
        assert_eq!(sorted.seed_for(&key).unwrap(), sorted.seeds()[expected]);
    }

    #[test]
    fn test_empty_list_is_error() {
        let key = DayKey::parse("2025-06-01").unwrap();
        assert_eq!(DailySeeds::new(Vec::new()).seed_for(&key), Err(SeedError::EmptyList));
    }
}
