//! First-class invariants for word-chain sessions.
//!
//! Invariants are logical properties that hold after every transition.
//! They are testable on their own and are checked as postconditions in
//! debug builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of one to four invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns every violated invariant, not only the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<InvariantViolation> = [$(($inv::holds(state), $inv::description())),+]
                    .into_iter()
                    .filter(|(holds, _)| !holds)
                    .map(|(_, description)| InvariantViolation::new(description))
                    .collect();
                if violations.is_empty() { Ok(()) } else { Err(violations) }
            }
        }
    };
}

impl_invariant_set!(A);
impl_invariant_set!(A, B);
impl_invariant_set!(A, B, C);
impl_invariant_set!(A, B, C, D);

pub mod linked_chain;
pub mod score_consistent;
pub mod unique_words;

pub use linked_chain::LinkedChainInvariant;
pub use score_consistent::ScoreConsistentInvariant;
pub use unique_words::UniqueWordsInvariant;

/// Every session invariant as a composable set.
pub type ChainInvariants = (
    UniqueWordsInvariant,
    LinkedChainInvariant,
    ScoreConsistentInvariant,
);

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::{GameMode, PlayerName, ScoringRule, Session, Word};

    pub fn word(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    pub fn session(seed: &str) -> Session {
        Session::new(
            PlayerName::parse("Tester").unwrap(),
            GameMode::Endless,
            None,
            ScoringRule::WordLength,
            word(seed),
        )
    }
}
