//! Leaderboard capabilities: where finished runs go and where rankings
//! come from.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_more::Display;
use lexit_chain::{DayKey, DayKeyError, SessionSummary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A group name: trimmed, non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupName(String);

impl GroupName {
    /// Longest accepted group name, in characters.
    pub const MAX_LEN: usize = 32;

    /// Trims and validates a raw group name.
    ///
    /// # Errors
    ///
    /// Returns [`GroupNameError`] for empty or overlong names.
    pub fn parse(raw: &str) -> Result<Self, GroupNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GroupNameError::Empty);
        }
        let count = trimmed.chars().count();
        if count > Self::MAX_LEN {
            return Err(GroupNameError::TooLong(count));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The name as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Names offered when this one is taken: the name with 1, 2 and 3
    /// appended.
    pub fn suggestions(&self) -> Vec<String> {
        (1..=3).map(|n| format!("{}{}", self.0, n)).collect()
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GroupName {
    type Error = GroupNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<GroupName> for String {
    fn from(name: GroupName) -> Self {
        name.0
    }
}

/// Invalid group name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GroupNameError {
    /// Nothing left after trimming.
    #[display("Group name is empty")]
    Empty,
    /// Longer than [`GroupName::MAX_LEN`].
    #[display("Group name is {} characters, at most 32 allowed", _0)]
    TooLong(usize),
}

impl std::error::Error for GroupNameError {}

/// Which runs a ranking covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardScope {
    /// Daily runs for one day key, best first.
    Daily(DayKey),
    /// Group runs for one group, best first.
    Group(GroupName),
    /// Every run, best first.
    AllTime,
    /// Every run, newest first.
    Recent,
}

impl LeaderboardScope {
    /// Rows returned when the caller does not ask for a limit.
    pub fn default_limit(&self) -> usize {
        match self {
            LeaderboardScope::Daily(_) | LeaderboardScope::Group(_) => 15,
            LeaderboardScope::AllTime => 50,
            LeaderboardScope::Recent => 10,
        }
    }

    /// Builds a scope from its textual parts.
    ///
    /// `kind` is `daily`, `group`, `all-time` or `recent`. A daily board
    /// without a day key uses `today`.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError`] for an unknown kind, a group board without a
    /// group, or an unparseable day key or group name.
    pub fn parse(
        kind: &str,
        day_key: Option<&str>,
        group: Option<&str>,
        today: DayKey,
    ) -> Result<Self, ScopeError> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "daily" => {
                let key = match day_key {
                    Some(raw) => DayKey::parse(raw).map_err(ScopeError::DayKey)?,
                    None => today,
                };
                Ok(LeaderboardScope::Daily(key))
            }
            "group" => {
                let raw = group.ok_or(ScopeError::MissingGroup)?;
                let name = GroupName::parse(raw).map_err(ScopeError::Group)?;
                Ok(LeaderboardScope::Group(name))
            }
            "all-time" | "alltime" => Ok(LeaderboardScope::AllTime),
            "recent" => Ok(LeaderboardScope::Recent),
            other => Err(ScopeError::Unknown(other.to_string())),
        }
    }

    /// Short label for logs and headings.
    pub fn label(&self) -> String {
        match self {
            LeaderboardScope::Daily(key) => format!("daily {}", key),
            LeaderboardScope::Group(name) => format!("group {}", name),
            LeaderboardScope::AllTime => "all-time".to_string(),
            LeaderboardScope::Recent => "recent".to_string(),
        }
    }
}

/// Unusable leaderboard request.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ScopeError {
    /// Not one of the known boards.
    #[display("Unknown leaderboard scope '{}'", _0)]
    Unknown(String),
    /// Group board requested without a group.
    #[display("Group board needs a group")]
    MissingGroup,
    /// Bad day key.
    #[display("{}", _0)]
    DayKey(DayKeyError),
    /// Bad group name.
    #[display("{}", _0)]
    Group(GroupNameError),
}

impl std::error::Error for ScopeError {}

/// One ranked run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    id: i32,
    #[serde(flatten)]
    summary: SessionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_id: Option<String>,
    created_at: NaiveDateTime,
}

impl LeaderboardEntry {
    /// Creates an entry.
    pub fn new(
        id: i32,
        summary: SessionSummary,
        group_id: Option<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            summary,
            group_id,
            created_at,
        }
    }
}

/// Accepts finished runs.
pub trait ScoreSink {
    /// Error raised by the store.
    type Error: std::error::Error;

    /// Stores a run and returns its id.
    ///
    /// `group` is kept only for group-mode runs.
    fn submit(&self, summary: &SessionSummary, group: Option<&GroupName>) -> Result<i32, Self::Error>;
}

/// Produces rankings.
pub trait LeaderboardSource {
    /// Error raised by the store.
    type Error: std::error::Error;

    /// Top `n` runs in `scope`; score ties keep submission order.
    fn top_n(&self, scope: &LeaderboardScope, n: usize) -> Result<Vec<LeaderboardEntry>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_name_trims() {
        assert_eq!(GroupName::parse("  Owls ").unwrap().as_str(), "Owls");
        assert_eq!(GroupName::parse("   "), Err(GroupNameError::Empty));
        assert!(GroupName::parse(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_group_suggestions() {
        let name = GroupName::parse("Owls").unwrap();
        assert_eq!(name.suggestions(), vec!["Owls1", "Owls2", "Owls3"]);
    }

    #[test]
    fn test_scope_parse() {
        let today = DayKey::parse("2025-03-09").unwrap();
        assert_eq!(
            LeaderboardScope::parse("daily", None, None, today),
            Ok(LeaderboardScope::Daily(today))
        );
        assert_eq!(
            LeaderboardScope::parse("recent", None, None, today),
            Ok(LeaderboardScope::Recent)
        );
        assert_eq!(
            LeaderboardScope::parse("group", None, None, today),
            Err(ScopeError::MissingGroup)
        );
        assert!(matches!(
            LeaderboardScope::parse("weekly", None, None, today),
            Err(ScopeError::Unknown(_))
        ));
        assert!(matches!(
            LeaderboardScope::parse("daily", Some("yesterday"), None, today),
            Err(ScopeError::DayKey(_))
        ));
    }

    #[test]
    fn test_default_limits() {
        assert_eq!(LeaderboardScope::AllTime.default_limit(), 50);
        assert_eq!(LeaderboardScope::Recent.default_limit(), 10);
        let key = DayKey::parse("2025-01-01").unwrap();
        assert_eq!(LeaderboardScope::Daily(key).default_limit(), 15);
    }
}
