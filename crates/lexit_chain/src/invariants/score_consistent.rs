//! Score consistency invariant: the score is derived from played words.

use super::Invariant;
use crate::Session;

/// Invariant: the score equals the scoring rule summed over played words.
///
/// Scrambled words never score.
pub struct ScoreConsistentInvariant;

impl Invariant<Session> for ScoreConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let expected: u32 = session
            .chain()
            .history()
            .map(|w| session.scoring().points(w))
            .sum();
        session.score() == expected
    }

    fn description() -> &'static str {
        "Score matches the points of every played word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::fixtures::{session, word};

    #[test]
    fn test_plays_and_scrambles_hold() {
        let mut s = session("STONE");
        s.record_play(word("TONE"));
        s.record_scramble(word("CRANE"));
        assert_eq!(s.score(), 4);
        assert!(ScoreConsistentInvariant::holds(&s));
    }

    #[test]
    fn test_tampered_score_violates() {
        let mut s = session("STONE");
        s.record_play(word("TONE"));
        s.score += 1;
        assert!(!ScoreConsistentInvariant::holds(&s));
    }
}
