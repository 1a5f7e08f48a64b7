//! The seed provider handed to the chain engine.

use super::{DailySeeds, RandomSeeds};
use crate::dictionary::WordList;
use lexit_chain::{DayKey, GameMode, SeedError, SeedProvider, Word};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Daily seeds from the curated list, everything else at random from the
/// dictionary.
#[derive(Debug, Clone)]
pub struct LexitSeeds {
    daily: DailySeeds,
    random: RandomSeeds,
}

impl LexitSeeds {
    /// Combines a daily list with a random picker.
    pub fn new(daily: DailySeeds, random: RandomSeeds) -> Self {
        Self { daily, random }
    }

    /// Builds a provider from the dictionary and the curated seed file.
    ///
    /// A missing or empty seed file falls back to the dictionary itself.
    #[instrument(skip(dictionary, seeds_path), fields(seeds_path = %seeds_path.as_ref().display()))]
    pub fn load(dictionary: &WordList, seeds_path: impl AsRef<Path>) -> Self {
        let daily = match WordList::from_json_file(seeds_path) {
            Ok(list) if !list.is_empty() => DailySeeds::from(list),
            Ok(_) => {
                warn!("Seed file is empty, using dictionary for daily seeds");
                DailySeeds::from(dictionary.clone())
            }
            Err(e) => {
                warn!(error = %e, "Seed file unavailable, using dictionary for daily seeds");
                DailySeeds::from(dictionary.clone())
            }
        };
        info!(daily = daily.seeds().len(), random = dictionary.len(), "Seed provider ready");
        Self::new(daily, RandomSeeds::new(dictionary.to_vec()))
    }

    /// The daily list.
    pub fn daily(&self) -> &DailySeeds {
        &self.daily
    }
}

impl SeedProvider for LexitSeeds {
    #[instrument(skip(self))]
    fn next_seed(&mut self, mode: GameMode, day_key: Option<&DayKey>) -> Result<Word, SeedError> {
        match mode {
            GameMode::Daily => {
                let key = day_key.ok_or(SeedError::MissingDayKey)?;
                self.daily.seed_for(key)
            }
            GameMode::Endless | GameMode::Group => self.random.pick(&HashSet::new()),
        }
    }

    #[instrument(skip_all, fields(excluded = exclude.len()))]
    fn random_word(&mut self, exclude: &HashSet<Word>) -> Result<Word, SeedError> {
        self.random.pick(exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> LexitSeeds {
        let list = WordList::fallback();
        LexitSeeds::new(
            DailySeeds::from(list.clone()),
            RandomSeeds::with_seed(list.to_vec(), 1),
        )
    }

    #[test]
    fn test_daily_needs_day_key() {
        assert_eq!(
            provider().next_seed(GameMode::Daily, None),
            Err(SeedError::MissingDayKey)
        );
    }

    #[test]
    fn test_daily_matches_daily_list() {
        let mut seeds = provider();
        let key = DayKey::parse("2025-02-02").unwrap();
        let expected = seeds.daily().seed_for(&key).unwrap();
        assert_eq!(seeds.next_seed(GameMode::Daily, Some(&key)).unwrap(), expected);
    }

    #[test]
    fn test_endless_seed_comes_from_dictionary() {
        let mut seeds = provider();
        let seed = seeds.next_seed(GameMode::Endless, None).unwrap();
        assert!(WordList::fallback().iter().any(|w| *w == seed));
    }

    #[test]
    fn test_load_falls_back_to_dictionary() {
        let dictionary = WordList::new(["TONE", "TONES"]);
        let seeds = LexitSeeds::load(&dictionary, "/nonexistent/seeds.json");
        assert_eq!(seeds.daily().seeds().len(), 2);
    }
}
