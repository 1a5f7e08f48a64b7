//! JSON HTTP API.
//!
//! Routes:
//! - `GET /api/seed?now=` daily seed and day key
//! - `GET /api/dictionary` bundled word list
//! - `POST /api/validate` stateless move check
//! - `GET /api/define?word=` definitions from the remote dictionary
//! - `POST /api/submit-score` store a finished run
//! - `GET /api/leaderboard?scope=&dayKey=&group=&limit=` rankings
//! - `GET /api/stats` total games played
//! - `POST /api/groups`, `GET /api/groups/{name}` group boards

use crate::config::LexitConfig;
use crate::db::{DbError, GroupCreation, ScoreRepository};
use crate::dictionary::{Definition, RemoteDictionary, WordList, WordOracle, define};
use crate::feedback::rejection_message;
use crate::leaderboard::{GroupName, LeaderboardEntry, LeaderboardScope, LeaderboardSource};
use crate::seeds::{DailySeeds, DayClock, LexitSeeds};
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use lexit_chain::{DayKey, Edit, GameMode, LegalLink, PlayerName, Rejection, SessionSummary, Word};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Upper bound on leaderboard rows per request.
const MAX_LIMIT: usize = 100;

// ─────────────────────────────────────────────────────────────
//  State
// ─────────────────────────────────────────────────────────────

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    words: Arc<WordList>,
    daily: Arc<DailySeeds>,
    clock: DayClock,
    repository: ScoreRepository,
    oracle: Option<Arc<dyn WordOracle>>,
}

impl AppState {
    /// Assembles state from its parts.
    pub fn new(
        words: WordList,
        daily: DailySeeds,
        clock: DayClock,
        repository: ScoreRepository,
        oracle: Option<Arc<dyn WordOracle>>,
    ) -> Self {
        Self {
            words: Arc::new(words),
            daily: Arc::new(daily),
            clock,
            repository,
            oracle,
        }
    }

    /// Loads word lists, seeds, database and remote dictionary from config.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be opened or migrated, or the remote
    /// dictionary client cannot be built.
    #[instrument(skip(config))]
    pub fn from_config(config: &LexitConfig) -> anyhow::Result<Self> {
        let words = WordList::load_or_fallback(config.dictionary_path());
        let seeds = LexitSeeds::load(&words, config.seeds_path());
        let repository = ScoreRepository::new(config.database_path().clone())?;
        repository.migrate()?;
        let oracle: Arc<dyn WordOracle> =
            Arc::new(RemoteDictionary::new(config.remote_dictionary_url().clone())?);

        Ok(Self::new(
            words,
            seeds.daily().clone(),
            DayClock::new(*config.timezone(), *config.rollover_hour()),
            repository,
            Some(oracle),
        ))
    }
}

// ─────────────────────────────────────────────────────────────
//  Errors
// ─────────────────────────────────────────────────────────────

/// Handler failure rendered as `{ok: false, error}`.
#[derive(Debug)]
pub enum ApiError {
    /// 400.
    BadRequest(String),
    /// 404.
    NotFound(String),
    /// 502, the remote dictionary failed.
    Upstream(String),
    /// 503, no remote dictionary configured.
    Unavailable(String),
    /// 500.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Upstream(m) => (StatusCode::BAD_GATEWAY, m),
            ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(json!({ "ok": false, "error": message }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        warn!(error = %err, "Database failure in handler");
        ApiError::Internal(err.message)
    }
}

/// Runs blocking repository work off the async executor.
async fn blocking<T, F>(repository: &ScoreRepository, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(ScoreRepository) -> Result<T, DbError> + Send + 'static,
{
    let repository = repository.clone();
    let result = tokio::task::spawn_blocking(move || work(repository))
        .await
        .map_err(DbError::from)??;
    Ok(result)
}

// ─────────────────────────────────────────────────────────────
//  Router
// ─────────────────────────────────────────────────────────────

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/seed", get(seed))
        .route("/api/dictionary", get(dictionary))
        .route("/api/validate", post(validate))
        .route("/api/define", get(define_word))
        .route("/api/submit-score", post(submit_score))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/stats", get(stats))
        .route("/api/groups", post(create_group))
        .route("/api/groups/{name}", get(find_group))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(state)
}

/// Serves the API until the process is stopped.
///
/// # Errors
///
/// Fails if state cannot be loaded or the address cannot be bound.
#[instrument(skip(config))]
pub async fn serve(config: &LexitConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server ready at http://{}/", address);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────
//  Seeds and dictionary
// ─────────────────────────────────────────────────────────────

/// Query for `GET /api/seed`.
#[derive(Debug, Deserialize)]
pub struct SeedQuery {
    /// RFC 3339 instant overriding the current time.
    pub now: Option<String>,
}

/// Body of `GET /api/seed`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse {
    /// Today's seed.
    pub seed: Word,
    /// Day key the seed belongs to.
    pub day_key: DayKey,
}

#[instrument(skip(state))]
async fn seed(
    State(state): State<AppState>,
    Query(query): Query<SeedQuery>,
) -> Result<Json<SeedResponse>, ApiError> {
    let now = match query.now.as_deref() {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| ApiError::BadRequest(format!("Invalid 'now': {}", e)))?,
        None => Utc::now(),
    };

    let day_key = state.clock.day_key_at(now);
    let seed = state
        .daily
        .seed_for(&day_key)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    debug!(seed = %seed, day_key = %day_key, "Seed served");
    Ok(Json(SeedResponse { seed, day_key }))
}

async fn dictionary(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(state.words.to_vec()),
    )
}

/// Body of `POST /api/validate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    /// Candidate word.
    pub guess: String,
    /// Word the candidate must follow.
    pub current_seed: String,
}

/// Successful validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// Always `true`.
    pub valid: bool,
    /// The normalized word.
    pub word: Word,
    /// How it differs from the current word.
    pub edit: Edit,
}

#[instrument(skip(state, request), fields(guess = %request.guess))]
async fn validate(State(state): State<AppState>, Json(request): Json<ValidateRequest>) -> Response {
    let current = match Word::parse(&request.current_seed) {
        Ok(word) => word,
        Err(e) => return ApiError::BadRequest(format!("Invalid current seed: {}", e)).into_response(),
    };

    match LegalLink::check(&current, &request.guess, &*state.words) {
        Ok((word, edit)) => Json(ValidateResponse {
            valid: true,
            word,
            edit,
        })
        .into_response(),
        Err(reason) => rejected_move(reason),
    }
}

fn rejected_move(reason: Rejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "valid": false,
            "error": rejection_message(reason),
            "reason": reason,
        })),
    )
        .into_response()
}

/// Query for `GET /api/define`.
#[derive(Debug, Deserialize)]
pub struct DefineQuery {
    /// Word to look up.
    pub word: Option<String>,
}

#[instrument(skip(state))]
async fn define_word(
    State(state): State<AppState>,
    Query(query): Query<DefineQuery>,
) -> Result<Json<Definition>, ApiError> {
    let raw = query.word.as_deref().map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ApiError::BadRequest("No word provided".to_string()));
    }
    let oracle = state
        .oracle
        .as_deref()
        .ok_or_else(|| ApiError::Unavailable("No remote dictionary configured".to_string()))?;

    match define(oracle, raw).await {
        Ok(Some(definition)) => Ok(Json(definition)),
        Ok(None) => Err(ApiError::NotFound(format!("\"{}\" not found", raw))),
        Err(e) => {
            warn!(error = %e, "Definition lookup failed");
            Err(ApiError::Upstream(e.message))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Scores and leaderboards
// ─────────────────────────────────────────────────────────────

/// Body of `POST /api/submit-score`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    /// Player nickname.
    pub name: String,
    /// Run mode.
    pub mode: GameMode,
    /// Final score.
    pub score: u32,
    /// First word of the run.
    pub start_seed: String,
    /// Last word of the run.
    pub end_seed: String,
    /// Day key, required for daily runs.
    #[serde(default)]
    pub day_key: Option<String>,
    /// Group, required for group runs.
    #[serde(default)]
    pub group_id: Option<String>,
}

impl SubmitScoreRequest {
    fn into_run(self) -> Result<(SessionSummary, Option<GroupName>), ApiError> {
        let bad = |e: &dyn std::fmt::Display| ApiError::BadRequest(e.to_string());

        let name = PlayerName::parse(&self.name).map_err(|e| bad(&e))?;
        let start_seed = Word::parse(&self.start_seed).map_err(|e| bad(&e))?;
        let end_seed = Word::parse(&self.end_seed).map_err(|e| bad(&e))?;
        let day_key = self
            .day_key
            .as_deref()
            .map(DayKey::parse)
            .transpose()
            .map_err(|e| bad(&e))?;
        let group = self
            .group_id
            .as_deref()
            .map(GroupName::parse)
            .transpose()
            .map_err(|e| bad(&e))?;

        if self.mode == GameMode::Daily && day_key.is_none() {
            return Err(ApiError::BadRequest("Daily runs need a dayKey".to_string()));
        }
        if self.mode == GameMode::Group && group.is_none() {
            return Err(ApiError::BadRequest("Group runs need a groupId".to_string()));
        }

        let summary = SessionSummary::new(name, self.mode, self.score, start_seed, end_seed, day_key);
        Ok((summary, group))
    }
}

#[instrument(skip(state, request), fields(name = %request.name, mode = %request.mode))]
async fn submit_score(
    State(state): State<AppState>,
    Json(request): Json<SubmitScoreRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (summary, group) = request.into_run()?;
    let row = blocking(&state.repository, move |repo| {
        repo.record_run(&summary, group.as_ref())
    })
    .await?;
    Ok(Json(json!({ "ok": true, "id": row.id() })))
}

/// Query for `GET /api/leaderboard`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    /// `daily`, `group`, `all-time` or `recent`; defaults to `daily`.
    pub scope: Option<String>,
    /// Day for the daily board; defaults to today.
    pub day_key: Option<String>,
    /// Group for the group board.
    pub group: Option<String>,
    /// Row limit; defaults per scope.
    pub limit: Option<usize>,
}

#[instrument(skip(state))]
async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let scope = LeaderboardScope::parse(
        query.scope.as_deref().unwrap_or("daily"),
        query.day_key.as_deref(),
        query.group.as_deref(),
        state.clock.today(),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let limit = query
        .limit
        .unwrap_or_else(|| scope.default_limit())
        .min(MAX_LIMIT);
    let entries = blocking(&state.repository, move |repo| repo.top_n(&scope, limit)).await?;
    Ok(Json(entries))
}

/// Body of `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Stored runs across every mode.
    pub total_games: u64,
}

#[instrument(skip(state))]
async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let total_games = blocking(&state.repository, |repo| repo.count_runs()).await?;
    Ok(Json(StatsResponse { total_games }))
}

// ─────────────────────────────────────────────────────────────
//  Groups
// ─────────────────────────────────────────────────────────────

/// Body of `POST /api/groups`.
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    /// Requested group name.
    pub name: String,
}

#[instrument(skip(state, request), fields(name = %request.name))]
async fn create_group(
    State(state): State<AppState>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<Response, ApiError> {
    let name = GroupName::parse(&request.name)
        .map_err(|_| ApiError::BadRequest("invalid-name".to_string()))?;

    let creation = blocking(&state.repository, move |repo| repo.create_group(&name)).await?;
    let response = match creation {
        GroupCreation::Created(row) => Json(json!({ "ok": true, "id": row.name() })).into_response(),
        GroupCreation::Taken { suggestions } => (
            StatusCode::CONFLICT,
            Json(json!({ "ok": false, "error": "name-taken", "suggestions": suggestions })),
        )
            .into_response(),
    };
    Ok(response)
}

#[instrument(skip(state))]
async fn find_group(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let name = GroupName::parse(&raw).map_err(|_| ApiError::NotFound("not-found".to_string()))?;
    let found = blocking(&state.repository, move |repo| repo.find_group(&name)).await?;
    match found {
        Some(row) => Ok(Json(json!({ "ok": true, "id": row.name() }))),
        None => Err(ApiError::NotFound("not-found".to_string())),
    }
}
