//! Game modes, day keys, and the terminal summary of a run.

use super::word::{PlayerName, Word};
use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// How a session was started.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
    /// Shared seed for the calendar day.
    Daily,
    /// Random seed, play as long as you like.
    Endless,
    /// Random seed, scored on a group board.
    Group,
}

impl GameMode {
    /// Whether runs in this mode carry a day key.
    pub fn uses_day_key(self) -> bool {
        matches!(self, GameMode::Daily)
    }
}

/// Calendar date identifying one daily puzzle, formatted `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Wraps a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Parses a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`DayKeyError`] if the string is not a valid date.
    #[instrument(level = "trace")]
    pub fn parse(raw: &str) -> Result<Self, DayKeyError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DayKeyError(raw.to_string()))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = DayKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DayKey {
    type Error = DayKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

/// A day key string that is not a `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid day key '{}', expected YYYY-MM-DD", _0)]
pub struct DayKeyError(pub String);

impl std::error::Error for DayKeyError {}

/// Frozen result of a finished run, handed to persistence.
///
/// `day_key` is present exactly when `mode` is [`GameMode::Daily`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    name: PlayerName,
    mode: GameMode,
    score: u32,
    start_seed: Word,
    end_seed: Word,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    day_key: Option<DayKey>,
}

impl SessionSummary {
    /// Builds a summary, dropping the day key for non-daily modes.
    #[instrument(skip_all, fields(mode = %mode, score = score))]
    pub fn new(
        name: PlayerName,
        mode: GameMode,
        score: u32,
        start_seed: Word,
        end_seed: Word,
        day_key: Option<DayKey>,
    ) -> Self {
        Self {
            name,
            mode,
            score,
            start_seed,
            end_seed,
            day_key: day_key.filter(|_| mode.uses_day_key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parses_case_insensitively() {
        assert_eq!("Daily".parse::<GameMode>().unwrap(), GameMode::Daily);
        assert_eq!(GameMode::Endless.to_string(), "endless");
    }

    #[test]
    fn test_day_key_round_trips_format() {
        let key = DayKey::parse("2025-03-09").unwrap();
        assert_eq!(key.to_string(), "2025-03-09");
        assert!(DayKey::parse("2025-13-01").is_err());
    }

    #[test]
    fn test_summary_drops_day_key_outside_daily() {
        let key = DayKey::parse("2025-03-09").unwrap();
        let summary = SessionSummary::new(
            PlayerName::parse("Ada").unwrap(),
            GameMode::Endless,
            9,
            Word::parse("STONE").unwrap(),
            Word::parse("TONES").unwrap(),
            Some(key),
        );
        assert_eq!(summary.day_key(), &None);
    }

    #[test]
    fn test_summary_wire_format_uses_camel_case() {
        let summary = SessionSummary::new(
            PlayerName::parse("Ada").unwrap(),
            GameMode::Daily,
            4,
            Word::parse("STONE").unwrap(),
            Word::parse("TONE").unwrap(),
            Some(DayKey::parse("2025-03-09").unwrap()),
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["startSeed"], "STONE");
        assert_eq!(json["endSeed"], "TONE");
        assert_eq!(json["dayKey"], "2025-03-09");
        assert_eq!(json["mode"], "daily");
    }
}
