//! Line-oriented play loop.
//!
//! Reads words and commands from an async line source, drives a
//! [`ChainEngine`], and writes plain-text feedback. A run ends on
//! `:submit`, `:quit`, end of input, or when the timer runs out.

use crate::dictionary::{ResolvedDictionary, WordOracle};
use crate::feedback::{describe_edit, rejection_message, scramble_message};
use crate::leaderboard::{GroupName, ScoreSink};
use anyhow::{Context, Result};
use lexit_chain::{
    ChainEngine, DayKey, EngineError, GameMode, PlayerName, SeedProvider, SessionSummary, SubmitOutcome, Word,
    is_one_edit,
};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Command that spends a scramble token.
pub const SCRAMBLE_COMMAND: &str = ":scramble";
/// Command that ends the run and saves it.
pub const SUBMIT_COMMAND: &str = ":submit";
/// Command that ends the run without saving.
pub const QUIT_COMMAND: &str = ":quit";

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Who is playing.
    pub player: PlayerName,
    /// Mode of the run.
    pub mode: GameMode,
    /// Day key, required for daily runs.
    pub day_key: Option<DayKey>,
    /// Group board for group runs.
    pub group: Option<GroupName>,
    /// Run timer; `None` plays until the player stops.
    pub duration: Option<Duration>,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RunEnd {
    /// Player submitted the run.
    Submitted,
    /// Timer ran out; the run was saved.
    Expired,
    /// Player quit or input ended; nothing saved.
    Quit,
}

/// Outcome of [`play_run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Final summary.
    pub summary: SessionSummary,
    /// How the run ended.
    pub end: RunEnd,
    /// Stored id, when the run was saved.
    pub score_id: Option<i32>,
}

enum Event {
    Line(Option<String>),
    Expired,
}

/// Plays one run to completion.
///
/// Words missing from the bundled list are resolved through `oracle`
/// before submission, when one is given.
///
/// # Errors
///
/// Fails if no seed can be chosen, the engine is misused, input or output
/// fails, or a finished run cannot be stored.
#[instrument(skip_all, fields(player = %options.player, mode = %options.mode))]
pub async fn play_run<S, K, R, W>(
    engine: &mut ChainEngine<ResolvedDictionary, S>,
    oracle: Option<&dyn WordOracle>,
    sink: &K,
    options: &PlayOptions,
    input: R,
    output: &mut W,
) -> Result<RunReport>
where
    S: SeedProvider,
    K: ScoreSink,
    K::Error: Send + Sync + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let seed = engine
        .seeds_mut()
        .next_seed(options.mode, options.day_key.as_ref())
        .context("Failed to choose a seed")?;
    engine.start_session(
        options.player.clone(),
        options.mode,
        seed.clone(),
        options.day_key,
    )?;

    writeln!(output, "Seed: {}", seed)?;
    match options.duration {
        Some(d) => writeln!(output, "You have {} seconds. Go!", whole_seconds(d))?,
        None => writeln!(output, "No timer. Type {} when you are done.", SUBMIT_COMMAND)?,
    }
    writeln!(
        output,
        "Commands: {}  {}  {}",
        SCRAMBLE_COMMAND, SUBMIT_COMMAND, QUIT_COMMAND
    )?;

    let deadline = options.duration.map(|d| Instant::now() + d);
    let mut lines = input.lines();

    let end = loop {
        let event = match deadline {
            Some(deadline) => tokio::select! {
                _ = tokio::time::sleep_until(deadline) => Event::Expired,
                line = lines.next_line() => Event::Line(line?),
            },
            None => Event::Line(lines.next_line().await?),
        };

        let line = match event {
            Event::Expired => {
                writeln!(output, "Time's up!")?;
                break RunEnd::Expired;
            }
            Event::Line(None) => {
                debug!("Input closed");
                break RunEnd::Quit;
            }
            Event::Line(Some(line)) => line,
        };

        match line.trim() {
            SUBMIT_COMMAND => break RunEnd::Submitted,
            QUIT_COMMAND => break RunEnd::Quit,
            SCRAMBLE_COMMAND => match engine.use_scramble_token() {
                Ok(outcome) => writeln!(output, "{}", scramble_message(&outcome))?,
                Err(EngineError::Seed(e)) => {
                    warn!(error = %e, "Scramble failed");
                    writeln!(output, "No fresh word to scramble to.")?;
                }
                Err(e) => return Err(e.into()),
            },
            candidate => {
                if let Some(oracle) = oracle {
                    let lookup = resolve_candidate(engine, oracle, candidate);
                    match deadline {
                        Some(deadline) => {
                            if tokio::time::timeout_at(deadline, lookup).await.is_err() {
                                debug!(candidate, "Timer ran out during dictionary lookup");
                                writeln!(output, "Time's up!")?;
                                break RunEnd::Expired;
                            }
                        }
                        None => lookup.await,
                    }
                }
                report_submission(engine.submit(candidate)?, engine, output)?;
            }
        }
    };

    let summary = engine.finalize()?;
    let score_id = match end {
        RunEnd::Quit => {
            writeln!(output, "Run discarded. Final score {}.", summary.score())?;
            None
        }
        RunEnd::Submitted | RunEnd::Expired => {
            let id = sink
                .submit(&summary, options.group.as_ref())
                .context("Failed to save run")?;
            writeln!(output, "Saved! Final score {}.", summary.score())?;
            Some(id)
        }
    };

    info!(end = %end, score = *summary.score(), "Run finished");
    Ok(RunReport {
        summary,
        end,
        score_id,
    })
}

/// Seconds in `d`, rounded up.
fn whole_seconds(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

/// Asks the oracle about a word that could be a legal move but is not in
/// the local dictionary. Oracle failures leave the word unknown.
async fn resolve_candidate<S: SeedProvider>(
    engine: &mut ChainEngine<ResolvedDictionary, S>,
    oracle: &dyn WordOracle,
    candidate: &str,
) {
    let Ok(word) = Word::parse(candidate) else {
        return;
    };
    let Some(session) = engine.session() else {
        return;
    };
    if session.chain().contains(&word) || !is_one_edit(session.current().as_str(), word.as_str()) {
        return;
    }
    if let Err(e) = engine.dictionary_mut().resolve(&word, oracle).await {
        warn!(error = %e, word = %word, "Remote dictionary lookup failed");
    }
}

fn report_submission<S: SeedProvider, W: Write>(
    outcome: SubmitOutcome,
    engine: &ChainEngine<ResolvedDictionary, S>,
    output: &mut W,
) -> Result<()> {
    match outcome {
        SubmitOutcome::Accepted(accepted) => {
            writeln!(
                output,
                "{}: {}. Score {}.",
                accepted.word,
                describe_edit(&accepted.edit),
                accepted.score
            )?;
            if accepted.token_awarded {
                writeln!(
                    output,
                    "Scramble token earned! {} available.",
                    engine.tokens_available()
                )?;
            }
        }
        SubmitOutcome::Rejected { reason } => {
            writeln!(output, "{}", rejection_message(reason))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_seconds_rounds_up() {
        assert_eq!(whole_seconds(Duration::from_secs(90)), 90);
        assert_eq!(whole_seconds(Duration::from_millis(500)), 1);
        assert_eq!(whole_seconds(Duration::from_millis(1500)), 2);
        assert_eq!(whole_seconds(Duration::ZERO), 0);
    }
}
