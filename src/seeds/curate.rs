//! Curation of the daily seed list.
//!
//! A seed is worth a day only if it leaves room to move: it must have at
//! least `threshold` one-edit neighbours in the dictionary.

use crate::dictionary::WordList;
use lexit_chain::{Word, one_edit_neighbors};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// A seed that passed curation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuratedSeed {
    /// The seed word.
    pub word: Word,
    /// Dictionary words one edit away.
    pub neighbours: usize,
}

/// Number of dictionary words one edit from `seed`.
pub fn neighbour_count(seed: &Word, dictionary: &WordList) -> usize {
    one_edit_neighbors(seed.as_str(), dictionary.iter()).len()
}

/// Keeps the candidates with at least `threshold` neighbours, sorted.
#[instrument(skip(candidates, dictionary), fields(dictionary = dictionary.len()))]
pub fn curate_seeds<'a, I>(candidates: I, dictionary: &WordList, threshold: usize) -> Vec<CuratedSeed>
where
    I: IntoIterator<Item = &'a Word>,
{
    let mut examined = 0usize;
    let mut kept: Vec<CuratedSeed> = candidates
        .into_iter()
        .inspect(|_| examined += 1)
        .filter_map(|word| {
            let neighbours = neighbour_count(word, dictionary);
            if neighbours >= threshold {
                Some(CuratedSeed {
                    word: word.clone(),
                    neighbours,
                })
            } else {
                debug!(word = %word, neighbours, "Seed below threshold");
                None
            }
        })
        .collect();

    kept.sort_by(|a, b| a.word.cmp(&b.word));
    kept.dedup_by(|a, b| a.word == b.word);
    info!(examined, kept = kept.len(), threshold, "Seeds curated");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbour_count() {
        let dictionary = WordList::new(["TONE", "STORE", "STONY", "STONES", "CRANE", "STONE"]);
        let stone = Word::parse("STONE").unwrap();
        assert_eq!(neighbour_count(&stone, &dictionary), 4);
    }

    #[test]
    fn test_curate_applies_threshold() {
        let dictionary = WordList::new(["TONE", "STORE", "STONY", "STONES", "CRANE", "CRANK"]);
        let candidates = WordList::new(["STONE", "CRANE"]);
        let kept = curate_seeds(candidates.iter(), &dictionary, 2);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].word.as_str(), "STONE");
        assert_eq!(kept[0].neighbours, 4);
    }
}
