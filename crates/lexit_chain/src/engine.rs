//! Runtime chain engine over the typestate phases.
//!
//! A caller that holds one engine for the lifetime of a play screen
//! cannot thread consuming typestate values through its event loop, so
//! [`ChainEngine`] keeps the current phase in an enum and reports calls
//! made in the wrong phase as [`EngineError`].

use super::collaborators::{DictionaryLookup, SeedProvider};
use super::outcome::{EngineError, EnginePhase, ScrambleOutcome, SubmitOutcome};
use super::session::Session;
use super::summary::{DayKey, GameMode, SessionSummary};
use super::typestate::{ChainFinished, ChainInProgress, ChainSetup, GameRules};
use super::word::{PlayerName, Word};
use tracing::{debug, instrument, warn};

#[derive(Debug)]
enum Phase {
    Idle,
    InProgress(ChainInProgress),
    Ended(ChainFinished),
}

impl Phase {
    fn kind(&self) -> EnginePhase {
        match self {
            Phase::Idle => EnginePhase::Idle,
            Phase::InProgress(_) => EnginePhase::InProgress,
            Phase::Ended(_) => EnginePhase::Ended,
        }
    }
}

/// Owns one play session and its collaborators.
///
/// The dictionary and seed provider are injected at construction; the
/// engine itself performs no I/O.
#[derive(Debug)]
pub struct ChainEngine<D, S> {
    dictionary: D,
    seeds: S,
    rules: GameRules,
    phase: Phase,
}

impl<D, S> ChainEngine<D, S>
where
    D: DictionaryLookup,
    S: SeedProvider,
{
    /// Creates an idle engine.
    #[instrument(skip_all)]
    pub fn new(dictionary: D, seeds: S, rules: GameRules) -> Self {
        Self {
            dictionary,
            seeds,
            rules,
            phase: Phase::Idle,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> EnginePhase {
        self.phase.kind()
    }

    /// Starts a session at `seed`.
    ///
    /// The seed is chosen by the caller, typically through
    /// [`seeds_mut`](Self::seeds_mut). Starting again after a session has
    /// ended replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AlreadyInProgress`] while a session runs, or
    /// [`EngineError::MissingDayKey`] for a daily session without a key.
    #[instrument(skip(self), fields(player = %player, mode = %mode, seed = %seed))]
    pub fn start_session(
        &mut self,
        player: PlayerName,
        mode: GameMode,
        seed: Word,
        day_key: Option<DayKey>,
    ) -> Result<(), EngineError> {
        if let Phase::InProgress(_) = self.phase {
            warn!("Start requested while a session is in progress");
            return Err(EngineError::AlreadyInProgress);
        }

        let game = ChainSetup::new(player, mode, day_key, self.rules.clone()).start(seed)?;
        self.phase = Phase::InProgress(game);
        Ok(())
    }

    /// Submits a candidate word.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotInProgress`] outside a running session.
    /// Gameplay refusals are `Ok(SubmitOutcome::Rejected { .. })`.
    #[instrument(skip(self), fields(phase = %self.phase.kind()))]
    pub fn submit(&mut self, candidate: &str) -> Result<SubmitOutcome, EngineError> {
        match &mut self.phase {
            Phase::InProgress(game) => game.submit(candidate, &self.dictionary),
            other => Err(EngineError::NotInProgress(other.kind())),
        }
    }

    /// Spends one scramble token.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotInProgress`] outside a running session
    /// and [`EngineError::Seed`] if no fresh word exists.
    #[instrument(skip(self), fields(phase = %self.phase.kind()))]
    pub fn use_scramble_token(&mut self) -> Result<ScrambleOutcome, EngineError> {
        match &mut self.phase {
            Phase::InProgress(game) => game.scramble(&mut self.seeds),
            other => Err(EngineError::NotInProgress(other.kind())),
        }
    }

    /// Ends the session and returns its summary.
    ///
    /// Calling again after the session ended returns the same summary.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotInProgress`] if no session was started.
    #[instrument(skip(self), fields(phase = %self.phase.kind()))]
    pub fn finalize(&mut self) -> Result<SessionSummary, EngineError> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::InProgress(game) => {
                let finished = game.finish();
                let summary = finished.summary().clone();
                self.phase = Phase::Ended(finished);
                Ok(summary)
            }
            Phase::Ended(finished) => {
                debug!("Finalize repeated on ended session");
                let summary = finished.summary().clone();
                self.phase = Phase::Ended(finished);
                Ok(summary)
            }
            Phase::Idle => Err(EngineError::NotInProgress(EnginePhase::Idle)),
        }
    }

    /// Session state, running or ended.
    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::Idle => None,
            Phase::InProgress(game) => Some(game.session()),
            Phase::Ended(finished) => Some(finished.session()),
        }
    }

    /// Unspent scramble tokens; zero outside a running session.
    pub fn tokens_available(&self) -> u32 {
        match &self.phase {
            Phase::InProgress(game) => game.tokens_available(),
            _ => 0,
        }
    }

    /// Dictionary capability.
    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    /// Mutable dictionary access, for callers that resolve words ahead
    /// of submitting them.
    pub fn dictionary_mut(&mut self) -> &mut D {
        &mut self.dictionary
    }

    /// Mutable seed provider access, for choosing the next start seed.
    pub fn seeds_mut(&mut self) -> &mut S {
        &mut self.seeds
    }

    /// Rules applied to new sessions.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::SeedError;
    use std::collections::HashSet;

    struct NoSeeds;

    impl SeedProvider for NoSeeds {
        fn next_seed(&mut self, _: GameMode, _: Option<&DayKey>) -> Result<Word, SeedError> {
            Err(SeedError::EmptyList)
        }

        fn random_word(&mut self, _: &HashSet<Word>) -> Result<Word, SeedError> {
            Err(SeedError::Exhausted)
        }
    }

    fn engine() -> ChainEngine<HashSet<Word>, NoSeeds> {
        let dict = ["TONE"].iter().map(|w| Word::parse(w).unwrap()).collect();
        ChainEngine::new(dict, NoSeeds, GameRules::default())
    }

    fn start(engine: &mut ChainEngine<HashSet<Word>, NoSeeds>) {
        engine
            .start_session(
                PlayerName::parse("Tester").unwrap(),
                GameMode::Endless,
                Word::parse("STONE").unwrap(),
                None,
            )
            .unwrap();
    }

    #[test]
    fn test_submit_before_start_is_error() {
        let mut engine = engine();
        assert_eq!(
            engine.submit("TONE"),
            Err(EngineError::NotInProgress(EnginePhase::Idle))
        );
        assert_eq!(
            engine.finalize(),
            Err(EngineError::NotInProgress(EnginePhase::Idle))
        );
    }

    #[test]
    fn test_double_start_is_error() {
        let mut engine = engine();
        start(&mut engine);
        let again = engine.start_session(
            PlayerName::parse("Tester").unwrap(),
            GameMode::Endless,
            Word::parse("CRANE").unwrap(),
            None,
        );
        assert_eq!(again, Err(EngineError::AlreadyInProgress));
    }

    #[test]
    fn test_ended_session_refuses_mutation() {
        let mut engine = engine();
        start(&mut engine);
        engine.finalize().unwrap();
        assert_eq!(engine.phase(), EnginePhase::Ended);
        assert_eq!(
            engine.submit("TONE"),
            Err(EngineError::NotInProgress(EnginePhase::Ended))
        );
        assert_eq!(
            engine.use_scramble_token(),
            Err(EngineError::NotInProgress(EnginePhase::Ended))
        );
        assert_eq!(engine.tokens_available(), 0);
    }

    #[test]
    fn test_restart_after_end() {
        let mut engine = engine();
        start(&mut engine);
        engine.submit("TONE").unwrap();
        engine.finalize().unwrap();
        start(&mut engine);
        assert_eq!(engine.phase(), EnginePhase::InProgress);
        assert_eq!(engine.session().map(Session::score), Some(0));
    }
}
