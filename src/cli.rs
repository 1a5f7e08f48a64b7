//! Command-line interface for lexit.

use clap::{Parser, Subcommand};
use lexit_chain::GameMode;
use std::path::PathBuf;

/// Lexit - chain words one edit at a time
#[derive(Parser, Debug)]
#[command(name = "lexit")]
#[command(about = "Word-chaining game with daily seeds and leaderboards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a run in the terminal
    Play {
        /// Game mode: daily, endless or group
        #[arg(short, long, default_value = "daily")]
        mode: GameMode,

        /// Player nickname
        #[arg(short, long)]
        name: String,

        /// Group board for group runs
        #[arg(short, long)]
        group: Option<String>,

        /// Play without a timer
        #[arg(long)]
        no_timer: bool,

        /// Play the daily seed of another day (YYYY-MM-DD)
        #[arg(long)]
        day_key: Option<String>,

        /// Use only the bundled word list
        #[arg(long)]
        offline: bool,
    },

    /// Print the daily seed
    Seed {
        /// RFC 3339 instant to compute the seed for (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },

    /// Print a leaderboard
    Leaderboard {
        /// Board: daily, group, all-time or recent
        #[arg(short, long, default_value = "daily")]
        scope: String,

        /// Day for the daily board (defaults to today)
        #[arg(long)]
        day_key: Option<String>,

        /// Group for the group board
        #[arg(short, long)]
        group: Option<String>,

        /// Number of rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Filter candidate seeds by how many one-edit neighbours they have
    Curate {
        /// JSON array of candidate words (defaults to the dictionary)
        #[arg(long)]
        candidates: Option<PathBuf>,

        /// Where to write the curated JSON array (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Minimum neighbours (overrides config)
        #[arg(short, long)]
        threshold: Option<usize>,
    },

    /// Look up a word in the remote dictionary
    Define {
        /// Word to look up
        word: String,
    },

    /// Manage group boards
    Group {
        /// Group action
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Run the HTTP API
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Group subcommands
#[derive(Subcommand, Debug)]
pub enum GroupAction {
    /// Create a group board
    Create {
        /// Group name
        name: String,
    },
}
