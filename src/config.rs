//! Application configuration loaded from TOML.

use chrono_tz::Tz;
use derive_getters::Getters;
use derive_more::{Display, Error};
use lexit_chain::{DEFAULT_MILESTONES, GameRules, MilestoneBasis, MilestoneTokens, ScoringRule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration shared by the play loop, the HTTP server and the tools.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexitConfig {
    /// JSON array of dictionary words.
    #[serde(default = "default_dictionary_path")]
    dictionary_path: PathBuf,

    /// JSON array of curated daily seeds.
    #[serde(default = "default_seeds_path")]
    seeds_path: PathBuf,

    /// SQLite database file.
    #[serde(default = "default_database_path")]
    database_path: String,

    /// Base URL of the remote dictionary API.
    #[serde(default = "default_remote_dictionary_url")]
    remote_dictionary_url: String,

    /// IANA timezone the daily rollover is computed in.
    #[serde(default = "default_timezone")]
    timezone: Tz,

    /// Local hour at which the day key rolls over.
    #[serde(default = "default_rollover_hour")]
    rollover_hour: u32,

    /// Length of a timed run in seconds; `None` disables the timer.
    #[serde(default = "default_run_seconds")]
    run_seconds: Option<u64>,

    /// Points per accepted word.
    #[serde(default)]
    scoring: ScoringRule,

    /// Token milestone thresholds.
    #[serde(default = "default_milestones")]
    milestones: Vec<u32>,

    /// What the milestones are measured against.
    #[serde(default)]
    milestone_basis: MilestoneBasis,

    /// Minimum one-edit neighbours for a seed to be curated.
    #[serde(default = "default_curation_threshold")]
    curation_threshold: usize,

    /// HTTP bind host.
    #[serde(default = "default_host")]
    host: String,

    /// HTTP bind port.
    #[serde(default = "default_port")]
    port: u16,
}

fn default_dictionary_path() -> PathBuf {
    PathBuf::from("data/words_all.json")
}

fn default_seeds_path() -> PathBuf {
    PathBuf::from("data/good-seeds.json")
}

fn default_database_path() -> String {
    "lexit.db".to_string()
}

fn default_remote_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_timezone() -> Tz {
    chrono_tz::America::New_York
}

fn default_rollover_hour() -> u32 {
    2
}

fn default_run_seconds() -> Option<u64> {
    Some(90)
}

fn default_milestones() -> Vec<u32> {
    DEFAULT_MILESTONES.to_vec()
}

fn default_curation_threshold() -> usize {
    7
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for LexitConfig {
    fn default() -> Self {
        Self {
            dictionary_path: default_dictionary_path(),
            seeds_path: default_seeds_path(),
            database_path: default_database_path(),
            remote_dictionary_url: default_remote_dictionary_url(),
            timezone: default_timezone(),
            rollover_hour: default_rollover_hour(),
            run_seconds: default_run_seconds(),
            scoring: ScoringRule::default(),
            milestones: default_milestones(),
            milestone_basis: MilestoneBasis::default(),
            curation_threshold: default_curation_threshold(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl LexitConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, does not parse,
    /// or carries an out-of-range value.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(database = %config.database_path, timezone = %config.timezone, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on a syntax error or an invalid value.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, or the defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a given file fails to load.
    #[instrument(skip(path))]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rollover_hour > 23 {
            return Err(ConfigError::new(format!(
                "rollover_hour must be 0-23, got {}",
                self.rollover_hour
            )));
        }
        if self.run_seconds == Some(0) {
            return Err(ConfigError::new(
                "run_seconds must be positive; play with --no-timer to disable the timer".to_string(),
            ));
        }
        Ok(())
    }

    /// Scoring and token rules for new sessions.
    #[instrument(skip(self))]
    pub fn game_rules(&self) -> GameRules {
        GameRules::new(
            self.scoring,
            MilestoneTokens::new(self.milestones.clone(), self.milestone_basis),
        )
    }

    /// Run timer, if enabled.
    pub fn run_duration(&self) -> Option<Duration> {
        self.run_seconds.map(Duration::from_secs)
    }

    /// HTTP bind address as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Replaces the database path.
    pub fn with_database_path(mut self, path: impl Into<String>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Overrides the HTTP bind host and port where given.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Disables the run timer.
    pub fn without_timer(mut self) -> Self {
        self.run_seconds = None;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
