//! Lexit library - word chains with daily seeds and leaderboards
//!
//! The chain rules live in [`lexit_chain`]. This crate supplies the
//! collaborators and outer surfaces around them.
//!
//! # Architecture
//!
//! - **Dictionary**: bundled word list, remote definitions, resolved lookups
//! - **Seeds**: day-key clock, deterministic daily seeds, random seeds, curation
//! - **Leaderboard**: score sink and ranking capabilities backed by SQLite
//! - **Play**: line-oriented terminal run with a timer
//! - **Server**: JSON HTTP API
//!
//! # Example
//!
//! ```no_run
//! use lexit::{LexitConfig, LexitSeeds, ResolvedDictionary, WordList};
//! use lexit_chain::{ChainEngine, DayKey, GameMode, PlayerName, SeedProvider};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = LexitConfig::default();
//! let words = WordList::load_or_fallback(config.dictionary_path());
//! let seeds = LexitSeeds::load(&words, config.seeds_path());
//! let mut engine = ChainEngine::new(ResolvedDictionary::new(words), seeds, config.game_rules());
//!
//! let day = DayKey::parse("2025-06-01")?;
//! let seed = engine.seeds_mut().next_seed(GameMode::Daily, Some(&day))?;
//! engine.start_session(PlayerName::parse("ada")?, GameMode::Daily, seed, Some(day))?;
//! let outcome = engine.submit("tone")?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod dictionary;
mod feedback;
mod leaderboard;
mod play;
mod seeds;
mod server;

// Crate-level exports - Configuration
pub use config::{ConfigError, LexitConfig};

// Crate-level exports - Database
pub use db::{
    DbError, GroupCreation, GroupRow, MIGRATIONS, NewGroup, NewScore, ScoreRepository, ScoreRow,
};

// Crate-level exports - Dictionary
pub use dictionary::{
    Definition, DictionaryError, FALLBACK_WORDS, RemoteDictionary, ResolvedDictionary, WordList,
    WordOracle, define, singular_form,
};

// Crate-level exports - Player feedback
pub use feedback::{describe_edit, rejection_message, scramble_message};

// Crate-level exports - Leaderboards
pub use leaderboard::{
    GroupName, GroupNameError, LeaderboardEntry, LeaderboardScope, LeaderboardSource, ScopeError,
    ScoreSink,
};

// Crate-level exports - Terminal play
pub use play::{
    PlayOptions, QUIT_COMMAND, RunEnd, RunReport, SCRAMBLE_COMMAND, SUBMIT_COMMAND, play_run,
};

// Crate-level exports - Seeds
pub use seeds::{
    CuratedSeed, DailySeeds, DayClock, LexitSeeds, RandomSeeds, curate_seeds, day_hash,
    neighbour_count,
};

// Crate-level exports - HTTP API
pub use server::{
    ApiError, AppState, CreateGroupRequest, DefineQuery, LeaderboardQuery, SeedQuery, SeedResponse,
    StatsResponse, SubmitScoreRequest, ValidateRequest, ValidateResponse, router, serve,
};
