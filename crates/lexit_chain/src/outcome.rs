//! Typed results of engine operations.
//!
//! Gameplay refusals are [`Rejection`] values returned as data. Calling
//! the engine in the wrong phase is an [`EngineError`].

use super::collaborators::SeedError;
use super::edit::Edit;
use super::word::{Word, WordError};
use serde::{Deserialize, Serialize};

/// Why a submitted word was refused.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Rejection {
    /// Nothing left after trimming.
    Empty,
    /// Fewer than 4 or more than 8 letters.
    BadLength,
    /// Already the seed or an earlier word in this session.
    Duplicate,
    /// Not in the dictionary.
    NotAWord,
    /// Not exactly one edit from the current word.
    NotOneEdit,
}

impl From<WordError> for Rejection {
    fn from(err: WordError) -> Self {
        match err {
            WordError::Empty => Rejection::Empty,
            WordError::BadLength(_) => Rejection::BadLength,
            // Non-letters can never be dictionary words.
            WordError::InvalidCharacter(_) => Rejection::NotAWord,
        }
    }
}

/// An accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accepted {
    /// The word now at the head of the chain.
    pub word: Word,
    /// Score after the word was counted.
    pub score: u32,
    /// Whether this word reached a new milestone.
    pub token_awarded: bool,
    /// How the word differs from the previous one.
    pub edit: Edit,
}

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum SubmitOutcome {
    /// Word appended to the chain.
    Accepted(Accepted),
    /// Word refused; session unchanged.
    Rejected {
        /// Why.
        reason: Rejection,
    },
}

impl SubmitOutcome {
    /// Wraps a rejection.
    pub fn rejected(reason: Rejection) -> Self {
        SubmitOutcome::Rejected { reason }
    }

    /// Rejection reason, if refused.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            SubmitOutcome::Accepted(_) => None,
            SubmitOutcome::Rejected { reason } => Some(*reason),
        }
    }

    /// Whether the word was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// Result of spending a scramble token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ScrambleOutcome {
    /// A fresh word now heads the chain.
    Scrambled {
        /// The new current word.
        word: Word,
        /// Tokens left after this one.
        tokens_remaining: u32,
    },
    /// No unspent token; session unchanged.
    NoTokensAvailable,
}

/// Lifecycle phase of a [`ChainEngine`](crate::ChainEngine).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum EnginePhase {
    /// No session yet.
    Idle,
    /// Accepting submissions.
    InProgress,
    /// Frozen; summary available.
    Ended,
}

/// Misuse of the engine or failure of a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Operation requires a session in progress.
    #[display("Operation requires a session in progress, engine is {}", _0)]
    NotInProgress(EnginePhase),

    /// A session is already running.
    #[display("A session is already in progress")]
    AlreadyInProgress,

    /// Daily sessions need a day key.
    #[display("Daily session started without a day key")]
    MissingDayKey,

    /// Seed provider could not supply a word.
    #[display("Seed provider failed: {}", _0)]
    Seed(SeedError),

    /// A postcondition check failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for EngineError {}

impl From<SeedError> for EngineError {
    fn from(err: SeedError) -> Self {
        EngineError::Seed(err)
    }
}
