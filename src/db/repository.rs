//! SQLite repository for runs and groups.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use lexit_chain::{GameMode, SessionSummary};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GroupRow, NewGroup, NewScore, ScoreRow, schema};
use crate::leaderboard::{
    GroupName, LeaderboardEntry, LeaderboardScope, LeaderboardSource, ScoreSink,
};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Result of a group creation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupCreation {
    /// The group now exists.
    Created(GroupRow),
    /// The name was already taken.
    Taken {
        /// Alternative names to offer.
        suggestions: Vec<String>,
    },
}

/// Database repository for leaderboard operations.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    db_path: String,
}

impl ScoreRepository {
    /// Creates a repository for the database at the given path.
    ///
    /// Use `":memory:"` only for single-connection work: every call opens
    /// a fresh connection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating ScoreRepository");
        Ok(Self { db_path })
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn migrate(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        info!(applied = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Stores a finished run.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, summary), fields(name = %summary.name(), mode = %summary.mode(), score = *summary.score()))]
    pub fn record_run(
        &self,
        summary: &SessionSummary,
        group: Option<&GroupName>,
    ) -> Result<ScoreRow, DbError> {
        if *summary.mode() == GameMode::Group && group.is_none() {
            warn!("Group run recorded without a group");
        }

        let mut conn = self.connection()?;
        let row: ScoreRow = diesel::insert_into(schema::scores::table)
            .values(&NewScore::from_summary(summary, group))
            .returning(ScoreRow::as_returning())
            .get_result(&mut conn)?;

        info!(id = row.id(), "Run recorded");
        Ok(row)
    }

    /// Loads stored rows for `scope`, best first (newest first for
    /// [`LeaderboardScope::Recent`]).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(scope = %scope.label()))]
    pub fn top_rows(&self, scope: &LeaderboardScope, limit: usize) -> Result<Vec<ScoreRow>, DbError> {
        use schema::scores::dsl;

        let mut conn = self.connection()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<ScoreRow> = match scope {
            LeaderboardScope::Daily(key) => dsl::scores
                .filter(dsl::mode.eq(GameMode::Daily.to_string()))
                .filter(dsl::day_key.eq(key.to_string()))
                .order((dsl::score.desc(), dsl::id.asc()))
                .limit(limit)
                .select(ScoreRow::as_select())
                .load(&mut conn)?,
            LeaderboardScope::Group(name) => dsl::scores
                .filter(dsl::mode.eq(GameMode::Group.to_string()))
                .filter(dsl::group_id.eq(name.as_str()))
                .order((dsl::score.desc(), dsl::id.asc()))
                .limit(limit)
                .select(ScoreRow::as_select())
                .load(&mut conn)?,
            LeaderboardScope::AllTime => dsl::scores
                .order((dsl::score.desc(), dsl::id.asc()))
                .limit(limit)
                .select(ScoreRow::as_select())
                .load(&mut conn)?,
            LeaderboardScope::Recent => dsl::scores
                .order((dsl::created_at.desc(), dsl::id.desc()))
                .limit(limit)
                .select(ScoreRow::as_select())
                .load(&mut conn)?,
        };

        debug!(count = rows.len(), "Leaderboard rows loaded");
        Ok(rows)
    }

    /// Number of stored runs across every mode.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn count_runs(&self) -> Result<u64, DbError> {
        let mut conn = self.connection()?;
        let count: i64 = schema::scores::table.count().get_result(&mut conn)?;
        debug!(count, "Runs counted");
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Creates a group unless the name is taken.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(group = %name))]
    pub fn create_group(&self, name: &GroupName) -> Result<GroupCreation, DbError> {
        let mut conn = self.connection()?;

        let inserted: Option<GroupRow> = diesel::insert_into(schema::player_groups::table)
            .values(&NewGroup::new(name.as_str().to_string()))
            .on_conflict_do_nothing()
            .returning(GroupRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        match inserted {
            Some(row) => {
                info!("Group created");
                Ok(GroupCreation::Created(row))
            }
            None => {
                debug!("Group name taken");
                Ok(GroupCreation::Taken {
                    suggestions: name.suggestions(),
                })
            }
        }
    }

    /// Looks a group up by name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(group = %name))]
    pub fn find_group(&self, name: &GroupName) -> Result<Option<GroupRow>, DbError> {
        let mut conn = self.connection()?;
        let row: Option<GroupRow> = schema::player_groups::table
            .filter(schema::player_groups::name.eq(name.as_str()))
            .select(GroupRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row)
    }
}

impl ScoreSink for ScoreRepository {
    type Error = DbError;

    fn submit(&self, summary: &SessionSummary, group: Option<&GroupName>) -> Result<i32, DbError> {
        self.record_run(summary, group).map(|row| *row.id())
    }
}

impl LeaderboardSource for ScoreRepository {
    type Error = DbError;

    fn top_n(&self, scope: &LeaderboardScope, n: usize) -> Result<Vec<LeaderboardEntry>, DbError> {
        self.top_rows(scope, n)?
            .iter()
            .map(ScoreRow::entry)
            .collect()
    }
}
