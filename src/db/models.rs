//! Database models and their domain conversions.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use lexit_chain::{DayKey, GameMode, PlayerName, SessionSummary, Word};
use serde::Serialize;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::leaderboard::{GroupName, LeaderboardEntry};

/// A stored run.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::scores)]
pub struct ScoreRow {
    id: i32,
    name: String,
    mode: String,
    score: i32,
    start_seed: String,
    end_seed: String,
    day_key: Option<String>,
    group_id: Option<String>,
    created_at: NaiveDateTime,
}

impl ScoreRow {
    /// Rebuilds the run summary from its stored columns.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a column no longer validates.
    #[instrument(skip(self), fields(id = self.id))]
    pub fn summary(&self) -> Result<SessionSummary, DbError> {
        let name = PlayerName::parse(&self.name).map_err(|e| DbError::corrupt_row(self.id, e))?;
        let mode = self
            .mode
            .parse::<GameMode>()
            .map_err(|e| DbError::corrupt_row(self.id, e))?;
        let score = u32::try_from(self.score).map_err(|e| DbError::corrupt_row(self.id, e))?;
        let start_seed =
            Word::parse(&self.start_seed).map_err(|e| DbError::corrupt_row(self.id, e))?;
        let end_seed = Word::parse(&self.end_seed).map_err(|e| DbError::corrupt_row(self.id, e))?;
        let day_key = self
            .day_key
            .as_deref()
            .map(DayKey::parse)
            .transpose()
            .map_err(|e| DbError::corrupt_row(self.id, e))?;

        Ok(SessionSummary::new(
            name, mode, score, start_seed, end_seed, day_key,
        ))
    }

    /// Converts the row into a ranked entry.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a column no longer validates.
    pub fn entry(&self) -> Result<LeaderboardEntry, DbError> {
        Ok(LeaderboardEntry::new(
            self.id,
            self.summary()?,
            self.group_id.clone(),
            self.created_at,
        ))
    }
}

/// Insertable run.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::scores)]
pub struct NewScore {
    name: String,
    mode: String,
    score: i32,
    start_seed: String,
    end_seed: String,
    day_key: Option<String>,
    group_id: Option<String>,
}

impl NewScore {
    /// Flattens a summary into columns.
    ///
    /// The group is stored only for group-mode runs.
    #[instrument(skip_all, fields(mode = %summary.mode(), score = *summary.score()))]
    pub fn from_summary(summary: &SessionSummary, group: Option<&GroupName>) -> Self {
        let group_id = group
            .filter(|_| *summary.mode() == GameMode::Group)
            .map(|g| g.as_str().to_string());

        Self::new(
            summary.name().to_string(),
            summary.mode().to_string(),
            i32::try_from(*summary.score()).unwrap_or(i32::MAX),
            summary.start_seed().to_string(),
            summary.end_seed().to_string(),
            summary.day_key().as_ref().map(|k| k.to_string()),
            group_id,
        )
    }
}

/// A stored group.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::player_groups)]
#[serde(rename_all = "camelCase")]
pub struct GroupRow {
    name: String,
    created_at: NaiveDateTime,
}

/// Insertable group.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::player_groups)]
pub struct NewGroup {
    name: String,
}
