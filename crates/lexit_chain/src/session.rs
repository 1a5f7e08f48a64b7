//! Mutable per-run state wrapped around a chain.

use super::chain::{Chain, EntryKind};
use super::rules::{Progress, ScoringRule};
use super::summary::{DayKey, GameMode, SessionSummary};
use super::word::{PlayerName, Word};
use serde::{Deserialize, Serialize};

/// One play session: the chain plus score and token bookkeeping.
///
/// Only the engine mutates a session, and only on accepted submissions
/// and spent tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) player: PlayerName,
    pub(crate) mode: GameMode,
    pub(crate) day_key: Option<DayKey>,
    pub(crate) scoring: ScoringRule,
    pub(crate) chain: Chain,
    pub(crate) score: u32,
    pub(crate) scrambles_used: u32,
}

impl Session {
    pub(crate) fn new(
        player: PlayerName,
        mode: GameMode,
        day_key: Option<DayKey>,
        scoring: ScoringRule,
        seed: Word,
    ) -> Self {
        Self {
            player,
            mode,
            day_key: day_key.filter(|_| mode.uses_day_key()),
            scoring,
            chain: Chain::new(seed),
            score: 0,
            scrambles_used: 0,
        }
    }

    /// Player the session belongs to.
    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    /// Mode the session was started in.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Day key of a daily session.
    pub fn day_key(&self) -> Option<&DayKey> {
        self.day_key.as_ref()
    }

    /// Scoring rule in effect.
    pub fn scoring(&self) -> ScoringRule {
        self.scoring
    }

    /// The word chain.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Starting word.
    pub fn seed(&self) -> &Word {
        self.chain.seed()
    }

    /// Word the next submission must be one edit from.
    pub fn current(&self) -> &Word {
        self.chain.current()
    }

    /// Points so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Scramble tokens spent.
    pub fn scrambles_used(&self) -> u32 {
        self.scrambles_used
    }

    /// Counters for token policies.
    pub fn progress(&self) -> Progress {
        Progress {
            score: self.score,
            words_played: self.chain.played_count() as u32,
            scrambles_used: self.scrambles_used,
        }
    }

    /// Terminal summary of the session as it stands.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(
            self.player.clone(),
            self.mode,
            self.score,
            self.chain.seed().clone(),
            self.chain.current().clone(),
            self.day_key,
        )
    }

    pub(crate) fn record_play(&mut self, word: Word) {
        self.score += self.scoring.points(&word);
        self.chain.push(word, EntryKind::Played);
    }

    pub(crate) fn record_scramble(&mut self, word: Word) {
        self.chain.push(word, EntryKind::Scrambled);
        self.scrambles_used += 1;
    }
}
