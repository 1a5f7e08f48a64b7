//! Phase-specific typestate structs for a word-chain session.
//!
//! Each phase is its own type. Only [`ChainInProgress`] accepts
//! submissions, and a [`ChainFinished`] always carries its summary.

use super::collaborators::{DictionaryLookup, SeedProvider};
#[cfg(debug_assertions)]
use super::contracts::{Contract, SubmitContract};
use super::contracts::{LegalSubmission, WellFormed};
use super::outcome::{Accepted, EngineError, ScrambleOutcome, SubmitOutcome};
use super::rules::{MilestoneTokens, ScoringRule, TokenPolicy};
use super::session::Session;
use super::summary::{DayKey, GameMode, SessionSummary};
use super::word::{PlayerName, Word};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Scoring and token policies shared by every session of an engine.
#[derive(Debug, Clone)]
pub struct GameRules {
    /// Points per accepted word.
    pub scoring: ScoringRule,
    /// Scramble-token award policy.
    pub tokens: Arc<dyn TokenPolicy>,
}

impl GameRules {
    /// Bundles a scoring rule with a token policy.
    pub fn new(scoring: ScoringRule, tokens: impl TokenPolicy + 'static) -> Self {
        Self {
            scoring,
            tokens: Arc::new(tokens),
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::new(ScoringRule::default(), MilestoneTokens::default())
    }
}

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Session being set up: player and mode chosen, no seed yet.
#[derive(Debug, Clone)]
pub struct ChainSetup {
    player: PlayerName,
    mode: GameMode,
    day_key: Option<DayKey>,
    rules: GameRules,
}

impl ChainSetup {
    /// Creates a setup for the given player and mode.
    #[instrument(skip(rules), fields(player = %player, mode = %mode))]
    pub fn new(
        player: PlayerName,
        mode: GameMode,
        day_key: Option<DayKey>,
        rules: GameRules,
    ) -> Self {
        Self {
            player,
            mode,
            day_key,
            rules,
        }
    }

    /// Starts the session at `seed` (consumes setup, returns in-progress).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingDayKey`] for a daily session without a
    /// day key.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn start(self, seed: Word) -> Result<ChainInProgress, EngineError> {
        if self.mode.uses_day_key() && self.day_key.is_none() {
            warn!("Daily session requested without a day key");
            return Err(EngineError::MissingDayKey);
        }

        info!(seed = %seed, "Session started");
        Ok(ChainInProgress {
            session: Session::new(
                self.player,
                self.mode,
                self.day_key,
                self.rules.scoring,
                seed,
            ),
            rules: self.rules,
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Session in progress: accepts submissions and scramble requests.
#[derive(Debug, Clone)]
pub struct ChainInProgress {
    session: Session,
    rules: GameRules,
}

impl ChainInProgress {
    /// Validates and, if legal, appends a candidate word.
    ///
    /// A rejected candidate leaves the session exactly as it was.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always
    /// - Postconditions checked in debug builds only
    #[instrument(skip(self, dictionary), fields(current = %self.session.current()))]
    pub fn submit(
        &mut self,
        candidate: &str,
        dictionary: &dyn DictionaryLookup,
    ) -> Result<SubmitOutcome, EngineError> {
        let word = match WellFormed::check(candidate) {
            Ok(word) => word,
            Err(reason) => return Ok(SubmitOutcome::rejected(reason)),
        };

        let edit = match LegalSubmission::check(&word, &self.session, dictionary) {
            Ok(edit) => edit,
            Err(reason) => {
                debug!(word = %word, %reason, "Submission rejected");
                return Ok(SubmitOutcome::rejected(reason));
            }
        };

        #[cfg(debug_assertions)]
        let before = self.session.clone();

        let progress_before = self.session.progress();
        self.session.record_play(word.clone());
        let token_awarded = self
            .rules
            .tokens
            .should_award_token(&progress_before, &self.session.progress());

        #[cfg(debug_assertions)]
        SubmitContract::post(&before, &self.session)?;

        info!(
            word = %word,
            score = self.session.score(),
            token_awarded,
            "Word accepted"
        );

        Ok(SubmitOutcome::Accepted(Accepted {
            word,
            score: self.session.score(),
            token_awarded,
            edit,
        }))
    }

    /// Spends a scramble token to replace the current word.
    ///
    /// The new word comes from `seeds`, excluding every word already in
    /// the chain. It needs no edit relation to anything and scores
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Seed`] if the provider cannot supply a word;
    /// the session is unchanged.
    #[instrument(skip(self, seeds), fields(current = %self.session.current()))]
    pub fn scramble(&mut self, seeds: &mut dyn SeedProvider) -> Result<ScrambleOutcome, EngineError> {
        let available = self.tokens_available();
        if available == 0 {
            debug!("Scramble requested without tokens");
            return Ok(ScrambleOutcome::NoTokensAvailable);
        }

        let word = seeds.random_word(&self.session.chain().used_words())?;
        self.session.record_scramble(word.clone());

        info!(word = %word, scrambles_used = self.session.scrambles_used(), "Scramble token spent");
        Ok(ScrambleOutcome::Scrambled {
            word,
            tokens_remaining: available - 1,
        })
    }

    /// Tokens earned and not yet spent.
    pub fn tokens_available(&self) -> u32 {
        let progress = self.session.progress();
        self.rules
            .tokens
            .tokens_earned(&progress)
            .saturating_sub(progress.scrambles_used)
    }

    /// Returns the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Freezes the session (consumes in-progress, returns finished).
    #[instrument(skip(self), fields(score = self.session.score()))]
    pub fn finish(self) -> ChainFinished {
        let summary = self.session.summary();
        info!(end_seed = %summary.end_seed(), "Session finished");
        ChainFinished {
            session: self.session,
            summary,
        }
    }

    /// Rules in effect.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Finished session: the summary is always present.
#[derive(Debug, Clone)]
pub struct ChainFinished {
    session: Session,
    summary: SessionSummary,
}

impl ChainFinished {
    /// Frozen summary for persistence.
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Final session state.
    pub fn session(&self) -> &Session {
        &self.session
    }
}
