//! Lexit chain rules: one-edit word validation and the session state machine.
//!
//! A run starts from a seed word. Each submission must be a dictionary
//! word of 4 to 8 letters, unused in the run, and exactly one letter
//! substitution, insertion or deletion away from the current word.
//!
//! # Architecture
//!
//! - **Edit**: the one-edit relation ([`is_one_edit`], [`edit_between`])
//! - **Typestate**: [`ChainSetup`] → [`ChainInProgress`] → [`ChainFinished`]
//! - **Engine**: [`ChainEngine`], the same lifecycle behind runtime phase checks
//! - **Collaborators**: [`DictionaryLookup`] and [`SeedProvider`] are injected,
//!   so nothing here performs I/O
//!
//! # Example
//!
//! ```
//! use lexit_chain::{ChainSetup, GameMode, GameRules, PlayerName, Word};
//! use std::collections::HashSet;
//!
//! let dictionary: HashSet<Word> = ["TONE", "TONES"]
//!     .iter()
//!     .map(|w| Word::parse(w).unwrap())
//!     .collect();
//!
//! let mut game = ChainSetup::new(
//!     PlayerName::parse("Ada").unwrap(),
//!     GameMode::Endless,
//!     None,
//!     GameRules::default(),
//! )
//! .start(Word::parse("STONE").unwrap())
//! .unwrap();
//!
//! assert!(game.submit("tone", &dictionary).unwrap().is_accepted());
//! assert_eq!(game.session().score(), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod chain;
mod collaborators;
mod contracts;
mod edit;
mod engine;
mod outcome;
mod rules;
mod session;
mod summary;
mod typestate;
mod word;

/// Invariants checked after every state transition.
pub mod invariants;

// Crate-level exports - Words
pub use word::{NameError, PlayerName, Word, WordError, normalize};

// Crate-level exports - Edit relation
pub use edit::{Edit, edit_between, is_one_edit, one_edit_neighbors};

// Crate-level exports - Chain and session state
pub use chain::{Chain, ChainEntry, EntryKind};
pub use session::Session;

// Crate-level exports - Scoring and tokens
pub use rules::{
    DEFAULT_MILESTONES, MilestoneBasis, MilestoneTokens, Progress, ScoringRule, TokenPolicy,
};

// Crate-level exports - Collaborator capabilities
pub use collaborators::{DictionaryLookup, SeedError, SeedProvider};

// Crate-level exports - Outcomes and errors
pub use outcome::{
    Accepted, EngineError, EnginePhase, Rejection, ScrambleOutcome, SubmitOutcome,
};

// Crate-level exports - Summaries
pub use summary::{DayKey, DayKeyError, GameMode, SessionSummary};

// Crate-level exports - Contracts
pub use contracts::{
    Contract, InDictionary, LegalLink, LegalSubmission, NotYetUsed, OneEditFromCurrent,
    SubmitContract, Submission, WellFormed,
};

// Crate-level exports - Typestate phases and engine
pub use engine::ChainEngine;
pub use typestate::{ChainFinished, ChainInProgress, ChainSetup, GameRules};
