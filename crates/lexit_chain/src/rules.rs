//! Scoring and milestone-token policies.
//!
//! Both are configuration, not hard-coded constants: the scoring rule
//! decides how many points an accepted word is worth, and the token
//! policy decides how many scramble tokens a given amount of progress
//! has earned.

use super::word::Word;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::instrument;

/// Milestones at which a scramble token is earned.
pub const DEFAULT_MILESTONES: [u32; 5] = [5, 12, 21, 32, 45];

/// Points awarded per accepted word.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScoringRule {
    /// One point per letter of the accepted word.
    #[default]
    WordLength,
    /// One point per accepted word.
    WordCount,
}

impl ScoringRule {
    /// Points the given word is worth under this rule.
    pub fn points(self, word: &Word) -> u32 {
        match self {
            ScoringRule::WordLength => word.letter_count() as u32,
            ScoringRule::WordCount => 1,
        }
    }
}

/// Snapshot of the counters a token policy looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Current score.
    pub score: u32,
    /// Words accepted through play (scrambles excluded).
    pub words_played: u32,
    /// Tokens already spent.
    pub scrambles_used: u32,
}

/// Decides how many scramble tokens a session has earned.
///
/// `tokens_earned` must be non-decreasing in `score` and
/// `words_played`; the engine derives the available count as
/// `tokens_earned - scrambles_used`.
pub trait TokenPolicy: Debug + Send + Sync {
    /// Total tokens earned so far, spent or not.
    fn tokens_earned(&self, progress: &Progress) -> u32;

    /// Whether moving from `before` to `after` earned at least one token.
    fn should_award_token(&self, before: &Progress, after: &Progress) -> bool {
        self.tokens_earned(after) > self.tokens_earned(before)
    }
}

/// Which counter milestones are measured against.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MilestoneBasis {
    /// Milestones count points.
    #[default]
    Score,
    /// Milestones count accepted words.
    WordCount,
}

/// Token policy backed by an increasing list of thresholds.
///
/// One token per threshold reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneTokens {
    thresholds: Vec<u32>,
    basis: MilestoneBasis,
}

impl MilestoneTokens {
    /// Builds a policy; thresholds are sorted and de-duplicated.
    #[instrument]
    pub fn new(mut thresholds: Vec<u32>, basis: MilestoneBasis) -> Self {
        thresholds.sort_unstable();
        thresholds.dedup();
        Self { thresholds, basis }
    }

    /// Thresholds in ascending order.
    pub fn thresholds(&self) -> &[u32] {
        &self.thresholds
    }

    /// Counter the thresholds apply to.
    pub fn basis(&self) -> MilestoneBasis {
        self.basis
    }

    /// Next threshold not yet reached, if any.
    pub fn next_milestone(&self, progress: &Progress) -> Option<u32> {
        let value = self.measure(progress);
        self.thresholds.iter().copied().find(|t| *t > value)
    }

    fn measure(&self, progress: &Progress) -> u32 {
        match self.basis {
            MilestoneBasis::Score => progress.score,
            MilestoneBasis::WordCount => progress.words_played,
        }
    }
}

impl Default for MilestoneTokens {
    fn default() -> Self {
        Self::new(DEFAULT_MILESTONES.to_vec(), MilestoneBasis::Score)
    }
}

impl TokenPolicy for MilestoneTokens {
    fn tokens_earned(&self, progress: &Progress) -> u32 {
        let value = self.measure(progress);
        self.thresholds.iter().filter(|t| **t <= value).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_score(score: u32) -> Progress {
        Progress {
            score,
            ..Progress::default()
        }
    }

    #[test]
    fn test_word_length_scoring() {
        let word = Word::parse("TONES").unwrap();
        assert_eq!(ScoringRule::WordLength.points(&word), 5);
        assert_eq!(ScoringRule::WordCount.points(&word), 1);
    }

    #[test]
    fn test_tokens_follow_default_milestones() {
        let policy = MilestoneTokens::default();
        assert_eq!(policy.tokens_earned(&at_score(4)), 0);
        assert_eq!(policy.tokens_earned(&at_score(5)), 1);
        assert_eq!(policy.tokens_earned(&at_score(12)), 2);
        assert_eq!(policy.tokens_earned(&at_score(100)), 5);
    }

    #[test]
    fn test_award_only_on_crossing() {
        let policy = MilestoneTokens::default();
        assert!(policy.should_award_token(&at_score(4), &at_score(9)));
        assert!(!policy.should_award_token(&at_score(5), &at_score(9)));
        assert!(policy.should_award_token(&at_score(9), &at_score(13)));
    }

    #[test]
    fn test_word_count_basis() {
        let policy = MilestoneTokens::new(vec![3, 1, 3], MilestoneBasis::WordCount);
        assert_eq!(policy.thresholds(), &[1, 3]);
        let progress = Progress {
            score: 40,
            words_played: 2,
            scrambles_used: 0,
        };
        assert_eq!(policy.tokens_earned(&progress), 1);
        assert_eq!(policy.next_milestone(&progress), Some(3));
    }
}
