//! Linked chain invariant: each played word is one edit from its predecessor.

use super::Invariant;
use crate::chain::EntryKind;
use crate::{Session, is_one_edit};

/// Invariant: every played entry is exactly one edit from the entry
/// before it (or the seed).
///
/// Scrambled entries have no predecessor requirement.
pub struct LinkedChainInvariant;

impl Invariant<Session> for LinkedChainInvariant {
    fn holds(session: &Session) -> bool {
        let chain = session.chain();
        let mut previous = chain.seed();

        for entry in chain.entries() {
            if entry.kind == EntryKind::Played && !is_one_edit(previous.as_str(), entry.word.as_str())
            {
                return false;
            }
            previous = &entry.word;
        }

        true
    }

    fn description() -> &'static str {
        "Every played word is one edit from the word before it"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::fixtures::{session, word};

    #[test]
    fn test_linked_plays_hold() {
        let mut s = session("STONE");
        s.record_play(word("TONE"));
        s.record_play(word("TONES"));
        assert!(LinkedChainInvariant::holds(&s));
    }

    #[test]
    fn test_scramble_breaks_no_link() {
        let mut s = session("STONE");
        s.record_scramble(word("CRANE"));
        s.record_play(word("CRANES"));
        assert!(LinkedChainInvariant::holds(&s));
    }

    #[test]
    fn test_unlinked_play_violates() {
        let mut s = session("STONE");
        s.record_play(word("PLANE"));
        assert!(!LinkedChainInvariant::holds(&s));
    }
}
