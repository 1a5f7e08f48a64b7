//! One-edit validation.
//!
//! Two words chain when they are exactly one primitive edit apart:
//! a single insertion, deletion, or substitution (Levenshtein distance 1).
//! Because the distance is bounded to one, a linear two-cursor walk
//! replaces the full dynamic-programming matrix.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The single edit turning one word into another.
///
/// Indices refer to character positions, counted in the longer word for
/// insertions and deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Edit {
    /// One letter replaced in place.
    Substitution {
        /// Position of the replaced letter.
        index: usize,
        /// Letter in the source word.
        from: char,
        /// Letter in the target word.
        to: char,
    },
    /// One letter added to the source word.
    Insertion {
        /// Position of the new letter in the target word.
        index: usize,
        /// The added letter.
        letter: char,
    },
    /// One letter removed from the source word.
    Deletion {
        /// Position of the removed letter in the source word.
        index: usize,
        /// The removed letter.
        letter: char,
    },
}

impl Edit {
    /// Position the edit applies to.
    pub fn index(&self) -> usize {
        match self {
            Edit::Substitution { index, .. }
            | Edit::Insertion { index, .. }
            | Edit::Deletion { index, .. } => *index,
        }
    }
}

/// Returns `true` iff `a` and `b` are exactly one edit apart.
///
/// Comparison is case-insensitive. Identical words are zero edits apart
/// and return `false`.
#[instrument(level = "trace")]
pub fn is_one_edit(a: &str, b: &str) -> bool {
    edit_between(a, b).is_some()
}

/// Finds the single edit turning `from` into `to`, if there is exactly one.
///
/// Walks both words with two cursors. On a mismatch, equal-length words
/// advance both cursors (substitution) while unequal lengths advance
/// only the longer word (insertion or deletion). A second mismatch
/// aborts. Letters left over once the shorter word is exhausted count as
/// further edits, so the total must come to exactly one.
#[instrument(level = "trace")]
pub fn edit_between(from: &str, to: &str) -> Option<Edit> {
    let source: Vec<char> = from.chars().map(|c| c.to_ascii_uppercase()).collect();
    let target: Vec<char> = to.chars().map(|c| c.to_ascii_uppercase()).collect();

    let len_diff = source.len().abs_diff(target.len());
    if len_diff > 1 {
        return None;
    }

    let (short, long) = if source.len() <= target.len() {
        (&source, &target)
    } else {
        (&target, &source)
    };

    let mut i = 0;
    let mut j = 0;
    let mut mismatch = None;

    while i < short.len() && j < long.len() {
        if short[i] == long[j] {
            i += 1;
            j += 1;
            continue;
        }

        if mismatch.is_some() {
            return None;
        }
        mismatch = Some(j);

        if len_diff == 0 {
            i += 1;
        }
        j += 1;
    }

    let trailing = (short.len() - i) + (long.len() - j);
    let index = match (mismatch, trailing) {
        (Some(index), 0) => index,
        // Only the final letter of the longer word is unmatched.
        (None, 1) => j,
        _ => return None,
    };

    let edit = if len_diff == 0 {
        Edit::Substitution {
            index,
            from: source[index],
            to: target[index],
        }
    } else if source.len() < target.len() {
        Edit::Insertion {
            index,
            letter: target[index],
        }
    } else {
        Edit::Deletion {
            index,
            letter: source[index],
        }
    };

    Some(edit)
}

/// Filters `candidates` down to the words one edit away from `word`.
#[instrument(level = "trace", skip(candidates))]
pub fn one_edit_neighbors<'a, I, S>(word: &str, candidates: I) -> Vec<&'a S>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    candidates
        .into_iter()
        .filter(|candidate| is_one_edit(word, candidate.as_ref()))
        .collect()
}
