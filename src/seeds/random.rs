//! Uniform random seeds.

use lexit_chain::{SeedError, Word};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Picks words uniformly at random from a fixed list.
#[derive(Debug, Clone)]
pub struct RandomSeeds {
    words: Vec<Word>,
    rng: fastrand::Rng,
}

impl RandomSeeds {
    /// Creates a picker over `words` with an entropy-seeded generator.
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates a picker with a fixed generator seed, for reproducible runs.
    pub fn with_seed(words: Vec<Word>, seed: u64) -> Self {
        Self {
            words,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Candidate words.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Uniformly random word outside `exclude`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::EmptyList`] for an empty list and
    /// [`SeedError::Exhausted`] when every word is excluded.
    #[instrument(skip_all, fields(words = self.words.len(), excluded = exclude.len()))]
    pub fn pick(&mut self, exclude: &HashSet<Word>) -> Result<Word, SeedError> {
        if self.words.is_empty() {
            return Err(SeedError::EmptyList);
        }

        let candidates: Vec<&Word> = self.words.iter().filter(|w| !exclude.contains(*w)).collect();
        if candidates.is_empty() {
            debug!("Every candidate excluded");
            return Err(SeedError::Exhausted);
        }

        let word = candidates[self.rng.usize(..candidates.len())].clone();
        debug!(word = %word, "Random word picked");
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::parse(w).unwrap()).collect()
    }

    #[test]
    fn test_pick_skips_excluded() {
        let mut seeds = RandomSeeds::with_seed(words(&["STONE", "CRANE", "LIGHT"]), 7);
        let exclude: HashSet<Word> = words(&["STONE", "CRANE"]).into_iter().collect();
        for _ in 0..20 {
            assert_eq!(seeds.pick(&exclude).unwrap().as_str(), "LIGHT");
        }
    }

    #[test]
    fn test_pick_exhausted() {
        let mut seeds = RandomSeeds::with_seed(words(&["STONE"]), 7);
        let exclude: HashSet<Word> = words(&["STONE"]).into_iter().collect();
        assert_eq!(seeds.pick(&exclude), Err(SeedError::Exhausted));
    }

    #[test]
    fn test_pick_empty() {
        let mut seeds = RandomSeeds::new(Vec::new());
        assert_eq!(seeds.pick(&HashSet::new()), Err(SeedError::EmptyList));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let list = words(&["STONE", "CRANE", "LIGHT", "WATER", "CROWN", "ALONE"]);
        let mut a = RandomSeeds::with_seed(list.clone(), 42);
        let mut b = RandomSeeds::with_seed(list, 42);
        for _ in 0..10 {
            assert_eq!(a.pick(&HashSet::new()), b.pick(&HashSet::new()));
        }
    }
}
