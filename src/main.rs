//! Lexit - Unified CLI
//!
//! Terminal play, the HTTP API, and maintenance tools.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use cli::{Cli, Command, GroupAction};
use lexit::{
    DayClock, GroupCreation, GroupName, LeaderboardScope, LeaderboardSource, LexitConfig,
    LexitSeeds, PlayOptions, RemoteDictionary, ResolvedDictionary, RunEnd, ScoreRepository,
    WordList, WordOracle, curate_seeds, define, play_run, serve,
};
use lexit_chain::{ChainEngine, DayKey, GameMode, PlayerName};
use std::path::PathBuf;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = LexitConfig::load_or_default(cli.config.as_deref())?;

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(cli.command, config));
    // A pending stdin read holds a blocking thread after a timed run ends.
    runtime.shutdown_background();
    result
}

async fn run(command: Command, config: LexitConfig) -> Result<()> {
    match command {
        Command::Play {
            mode,
            name,
            group,
            no_timer,
            day_key,
            offline,
        } => {
            let config = if no_timer { config.without_timer() } else { config };
            run_play(&config, mode, &name, group, day_key, offline).await
        }
        Command::Seed { now } => run_seed(&config, now),
        Command::Leaderboard {
            scope,
            day_key,
            group,
            limit,
        } => run_leaderboard(&config, &scope, day_key, group, limit),
        Command::Curate {
            candidates,
            out,
            threshold,
        } => run_curate(&config, candidates, out, threshold),
        Command::Define { word } => run_define(&config, &word).await,
        Command::Group {
            action: GroupAction::Create { name },
        } => run_group_create(&config, &name),
        Command::Serve { host, port } => serve(&config.with_bind(host, port)).await,
    }
}

fn clock(config: &LexitConfig) -> DayClock {
    DayClock::new(*config.timezone(), *config.rollover_hour())
}

fn open_repository(config: &LexitConfig) -> Result<ScoreRepository> {
    let repository = ScoreRepository::new(config.database_path().clone())?;
    repository.migrate()?;
    Ok(repository)
}

/// Play one run on stdin/stdout
#[instrument(skip(config, group, day_key))]
async fn run_play(
    config: &LexitConfig,
    mode: GameMode,
    name: &str,
    group: Option<String>,
    day_key: Option<String>,
    offline: bool,
) -> Result<()> {
    let player = PlayerName::parse(name)?;

    let day_key = match (mode, day_key) {
        (GameMode::Daily, Some(raw)) => Some(DayKey::parse(&raw)?),
        (GameMode::Daily, None) => Some(clock(config).today()),
        (_, Some(_)) => {
            warn!("--day-key applies to daily runs only, ignoring it");
            None
        }
        (_, None) => None,
    };

    let group = match (mode, group) {
        (GameMode::Group, Some(raw)) => Some(GroupName::parse(&raw)?),
        (GameMode::Group, None) => bail!("Group runs need --group"),
        (_, Some(_)) => {
            warn!("--group applies to group runs only, ignoring it");
            None
        }
        (_, None) => None,
    };

    let repository = open_repository(config)?;
    if let Some(group) = &group {
        if repository.find_group(group)?.is_none() {
            bail!(
                "Group '{}' does not exist; create it with `lexit group create`",
                group
            );
        }
    }

    let words = WordList::load_or_fallback(config.dictionary_path());
    let seeds = LexitSeeds::load(&words, config.seeds_path());
    let mut engine = ChainEngine::new(ResolvedDictionary::new(words), seeds, config.game_rules());

    let remote = RemoteDictionary::new(config.remote_dictionary_url().clone())?;
    let oracle: Option<&dyn WordOracle> = if offline { None } else { Some(&remote) };

    let options = PlayOptions {
        player,
        mode,
        day_key,
        group,
        duration: config.run_duration(),
    };

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();
    let report = play_run(&mut engine, oracle, &repository, &options, input, &mut output).await?;

    if report.end != RunEnd::Quit {
        info!(id = ?report.score_id, "Run stored");
    }
    Ok(())
}

/// Print the daily seed
fn run_seed(config: &LexitConfig, now: Option<String>) -> Result<()> {
    let now = match now {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .with_context(|| format!("Invalid --now '{}'", raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let day_key = clock(config).day_key_at(now);
    let words = WordList::load_or_fallback(config.dictionary_path());
    let seeds = LexitSeeds::load(&words, config.seeds_path());
    let seed = seeds.daily().seed_for(&day_key)?;
    println!("{} {}", day_key, seed);
    Ok(())
}

/// Print a leaderboard
fn run_leaderboard(
    config: &LexitConfig,
    scope: &str,
    day_key: Option<String>,
    group: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    let scope = LeaderboardScope::parse(
        scope,
        day_key.as_deref(),
        group.as_deref(),
        clock(config).today(),
    )?;
    let limit = limit.unwrap_or_else(|| scope.default_limit());
    let repository = open_repository(config)?;
    let entries = repository.top_n(&scope, limit)?;
    let total = repository.count_runs()?;

    println!("{} ({} games played)", scope.label(), total);
    if entries.is_empty() {
        println!("  no runs yet");
    }
    for (rank, entry) in entries.iter().enumerate() {
        let summary = entry.summary();
        println!(
            "{:>3}. {:<16} {:>4}  {} -> {}",
            rank + 1,
            summary.name(),
            summary.score(),
            summary.start_seed(),
            summary.end_seed()
        );
    }
    Ok(())
}

/// Write the curated seed list
fn run_curate(
    config: &LexitConfig,
    candidates: Option<PathBuf>,
    out: Option<PathBuf>,
    threshold: Option<usize>,
) -> Result<()> {
    let dictionary = WordList::from_json_file(config.dictionary_path())?;
    let candidates = match candidates {
        Some(path) => WordList::from_json_file(&path)?,
        None => dictionary.clone(),
    };
    let threshold = threshold.unwrap_or(*config.curation_threshold());

    let curated = curate_seeds(candidates.iter(), &dictionary, threshold);
    let words: Vec<_> = curated.iter().map(|seed| &seed.word).collect();
    let json = serde_json::to_string_pretty(&words)?;

    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), kept = words.len(), "Curated seeds written");
            eprintln!("Kept {} seeds with at least {} neighbours", words.len(), threshold);
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Look a word up remotely
async fn run_define(config: &LexitConfig, word: &str) -> Result<()> {
    let remote = RemoteDictionary::new(config.remote_dictionary_url().clone())?;
    match define(&remote, word).await? {
        Some(definition) => {
            println!("{}", definition.word);
            for (n, text) in definition.definitions.iter().enumerate() {
                println!("  {}. {}", n + 1, text);
            }
        }
        None => println!("\"{}\" not found", word.trim()),
    }
    Ok(())
}

/// Create a group board
fn run_group_create(config: &LexitConfig, name: &str) -> Result<()> {
    let name = GroupName::parse(name)?;
    let repository = open_repository(config)?;
    match repository.create_group(&name)? {
        GroupCreation::Created(row) => println!("Created group {}", row.name()),
        GroupCreation::Taken { suggestions } => {
            println!("Group {} is taken. Try: {}", name, suggestions.join(", "));
        }
    }
    Ok(())
}
