//! Contract-based validation for submissions.
//!
//! Each rule is a precondition struct with a `check` method. They are
//! composed in a fixed order so a candidate is always refused for the
//! first rule it breaks: length, uniqueness, dictionary, edit distance.
//! Postconditions re-check the session invariants after a transition.

use super::collaborators::DictionaryLookup;
use super::edit::{Edit, edit_between};
use super::invariants::{ChainInvariants, InvariantSet};
use super::outcome::{EngineError, Rejection};
use super::session::Session;
use super::word::Word;
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
///
/// - Precondition: `{P(state, action)}` must hold before the action
/// - Postcondition: `{Q(before, after)}` must hold after it
pub trait Contract<S, A> {
    /// Checks preconditions, returning the gameplay rejection on failure.
    fn pre(state: &S, action: &A) -> Result<(), Rejection>;

    /// Checks postconditions after the action was applied.
    fn post(before: &S, after: &S) -> Result<(), EngineError>;
}

/// A normalized candidate together with the dictionary that judges it.
pub struct Submission<'a> {
    /// The candidate word.
    pub word: &'a Word,
    /// Dictionary membership capability.
    pub dictionary: &'a dyn DictionaryLookup,
}

// ─────────────────────────────────────────────────────────────
//  Submission Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the raw candidate normalizes to a playable word.
pub struct WellFormed;

impl WellFormed {
    /// Parses the candidate, mapping parse failures to rejections.
    #[instrument]
    pub fn check(raw: &str) -> Result<Word, Rejection> {
        Word::parse(raw).map_err(|err| {
            debug!(%err, "Candidate is not a playable word");
            Rejection::from(err)
        })
    }
}

/// Precondition: the word is not already in the chain.
pub struct NotYetUsed;

impl NotYetUsed {
    /// Refuses words already in the chain with [`Rejection::Duplicate`].
    #[instrument(skip(session))]
    pub fn check(word: &Word, session: &Session) -> Result<(), Rejection> {
        if session.chain().contains(word) {
            Err(Rejection::Duplicate)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the dictionary accepts the word.
pub struct InDictionary;

impl InDictionary {
    /// Refuses unknown words with [`Rejection::NotAWord`].
    #[instrument(skip(dictionary))]
    pub fn check(word: &Word, dictionary: &dyn DictionaryLookup) -> Result<(), Rejection> {
        if dictionary.contains(word) {
            Ok(())
        } else {
            Err(Rejection::NotAWord)
        }
    }
}

/// Precondition: the word is one edit from the current word.
pub struct OneEditFromCurrent;

impl OneEditFromCurrent {
    /// Returns the edit, or [`Rejection::NotOneEdit`].
    #[instrument]
    pub fn check(current: &Word, word: &Word) -> Result<Edit, Rejection> {
        edit_between(current.as_str(), word.as_str()).ok_or(Rejection::NotOneEdit)
    }
}

/// Composite precondition for a move that ignores session history.
///
/// Used where only the previous word is known, such as stateless
/// validation requests.
pub struct LegalLink;

impl LegalLink {
    /// Validates `raw` as a move from `current`.
    #[instrument(skip(dictionary))]
    pub fn check(
        current: &Word,
        raw: &str,
        dictionary: &dyn DictionaryLookup,
    ) -> Result<(Word, Edit), Rejection> {
        let word = WellFormed::check(raw)?;
        if word == *current {
            return Err(Rejection::Duplicate);
        }
        InDictionary::check(&word, dictionary)?;
        let edit = OneEditFromCurrent::check(current, &word)?;
        Ok((word, edit))
    }
}

/// Composite precondition for a submission inside a session.
pub struct LegalSubmission;

impl LegalSubmission {
    /// Validates a parsed word against the session and dictionary.
    #[instrument(skip(session, dictionary))]
    pub fn check(
        word: &Word,
        session: &Session,
        dictionary: &dyn DictionaryLookup,
    ) -> Result<Edit, Rejection> {
        NotYetUsed::check(word, session)?;
        InDictionary::check(word, dictionary)?;
        OneEditFromCurrent::check(session.current(), word)
    }
}

// ─────────────────────────────────────────────────────────────
//  Submission Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for submit actions.
///
/// Preconditions:
/// - Word not yet used
/// - Word in dictionary
/// - Word one edit from the current word
///
/// Postconditions:
/// - Words stay unique
/// - Played words stay linked
/// - Score matches played words, and never decreases
pub struct SubmitContract;

impl<'a> Contract<Session, Submission<'a>> for SubmitContract {
    fn pre(session: &Session, action: &Submission<'a>) -> Result<(), Rejection> {
        LegalSubmission::check(action.word, session, action.dictionary).map(|_| ())
    }

    fn post(before: &Session, after: &Session) -> Result<(), EngineError> {
        if after.score() < before.score() {
            return Err(EngineError::InvariantViolation(format!(
                "Postcondition failed: score decreased from {} to {}",
                before.score(),
                after.score()
            )));
        }

        ChainInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            EngineError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
