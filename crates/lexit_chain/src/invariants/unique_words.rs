//! Unique words invariant: no word appears twice in a chain.

use super::Invariant;
use crate::Session;
use std::collections::HashSet;

/// Invariant: the seed and every later entry are pairwise distinct.
///
/// Words are normalized on construction, so equality is already
/// case-insensitive.
pub struct UniqueWordsInvariant;

impl Invariant<Session> for UniqueWordsInvariant {
    fn holds(session: &Session) -> bool {
        let mut seen = HashSet::new();
        session.chain().words().all(|w| seen.insert(w))
    }

    fn description() -> &'static str {
        "No word appears twice in the chain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{ChainEntry, EntryKind};
    use crate::invariants::fixtures::{session, word};

    #[test]
    fn test_fresh_session_holds() {
        assert!(UniqueWordsInvariant::holds(&session("STONE")));
    }

    #[test]
    fn test_repeated_seed_violates() {
        let mut s = session("STONE");
        s.chain.entries_mut().push(ChainEntry {
            word: word("stone"),
            kind: EntryKind::Played,
        });
        assert!(!UniqueWordsInvariant::holds(&s));
    }
}
