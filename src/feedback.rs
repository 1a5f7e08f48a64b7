//! Player-facing text for engine outcomes.

use lexit_chain::{Edit, Rejection, ScrambleOutcome};

/// Message shown for a refused word.
pub fn rejection_message(reason: Rejection) -> &'static str {
    match reason {
        Rejection::Empty => "Type a word first.",
        Rejection::BadLength => "Words must be 4 to 8 letters.",
        Rejection::Duplicate => "You already used that word.",
        Rejection::NotAWord => "Not a valid English word.",
        Rejection::NotOneEdit => "Invalid move! Must be exactly one edit away.",
    }
}

/// One-line description of how a word changed.
///
/// Positions are 1-based.
pub fn describe_edit(edit: &Edit) -> String {
    match edit {
        Edit::Substitution { index, from, to } => {
            format!("changed {} to {} at position {}", from, to, index + 1)
        }
        Edit::Insertion { index, letter } => {
            format!("added {} at position {}", letter, index + 1)
        }
        Edit::Deletion { index, letter } => {
            format!("removed {} from position {}", letter, index + 1)
        }
    }
}

/// Message shown after a scramble request.
pub fn scramble_message(outcome: &ScrambleOutcome) -> String {
    match outcome {
        ScrambleOutcome::Scrambled {
            word,
            tokens_remaining,
        } => format!("Scrambled to {} ({} tokens left)", word, tokens_remaining),
        ScrambleOutcome::NoTokensAvailable => "No scramble tokens yet.".to_string(),
    }
}
