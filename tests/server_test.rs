//! Tests for the JSON HTTP API.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use lexit::{AppState, DailySeeds, DayClock, DictionaryError, ScoreRepository, WordList, WordOracle, router};
use lexit_chain::Word;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

struct FixedOracle;

#[async_trait::async_trait]
impl WordOracle for FixedOracle {
    async fn lookup(&self, word: &str) -> Result<Option<Vec<String>>, DictionaryError> {
        if word.eq_ignore_ascii_case("stone") {
            Ok(Some(vec!["A small piece of rock.".to_string()]))
        } else {
            Ok(None)
        }
    }
}

fn setup() -> (NamedTempFile, axum::Router) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repository = ScoreRepository::new(db_path).expect("Failed to create repository");
    repository.migrate().expect("Migrations failed");

    let words = WordList::new(["STONE", "TONE", "TONES", "PLANE"]);
    let daily = DailySeeds::new(vec![Word::parse("STONE").unwrap()]);
    let oracle: Arc<dyn WordOracle> = Arc::new(FixedOracle);
    let state = AppState::new(words, daily, DayClock::default(), repository, Some(oracle));
    (db_file, router(state))
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_seed_uses_rollover() {
    let (_db, app) = setup();
    let (status, body) = send(&app, get("/api/seed?now=2025-06-10T05:30:00Z")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "seed": "STONE", "dayKey": "2025-06-09" }));

    let (status, _) = send(&app, get("/api/seed?now=yesterday")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dictionary_lists_words() {
    let (_db, app) = setup();
    let (status, body) = send(&app, get("/api/dictionary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["PLANE", "STONE", "TONE", "TONES"]));
}

#[tokio::test]
async fn test_validate_accepts_and_rejects() {
    let (_db, app) = setup();

    let (status, body) = send(
        &app,
        post("/api/validate", json!({ "guess": "tone", "currentSeed": "STONE" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], json!(true));
    assert_eq!(body["word"], json!("TONE"));
    assert_eq!(body["edit"]["kind"], json!("deletion"));

    let (status, body) = send(
        &app,
        post("/api/validate", json!({ "guess": "plane", "currentSeed": "STONE" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], json!("NOT_ONE_EDIT"));
    assert_eq!(body["error"], json!("Invalid move! Must be exactly one edit away."));

    let (status, body) = send(
        &app,
        post("/api/validate", json!({ "guess": "stone", "currentSeed": "STONE" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], json!("DUPLICATE"));
}

#[tokio::test]
async fn test_define_with_singular_retry() {
    let (_db, app) = setup();

    let (status, body) = send(&app, get("/api/define?word=stones")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["word"], json!("STONES"));
    assert_eq!(body["definitions"], json!(["A small piece of rock."]));

    let (status, _) = send(&app, get("/api/define?word=zzzz")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/api/define")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_score_then_leaderboard() {
    let (_db, app) = setup();

    for (name, score) in [("Alice", 9), ("Bob", 14)] {
        let (status, body) = send(
            &app,
            post(
                "/api/submit-score",
                json!({
                    "name": name,
                    "mode": "daily",
                    "score": score,
                    "startSeed": "STONE",
                    "endSeed": "TONES",
                    "dayKey": "2025-06-01",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));
    }

    let (status, body) = send(&app, get("/api/leaderboard?scope=daily&dayKey=2025-06-01")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob", "Alice"]);
    assert_eq!(body[0]["dayKey"], json!("2025-06-01"));

    let (status, body) = send(&app, get("/api/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "totalGames": 2 }));
}

#[tokio::test]
async fn test_stats_on_empty_database() {
    let (_db, app) = setup();
    let (status, body) = send(&app, get("/api/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "totalGames": 0 }));
}

#[tokio::test]
async fn test_submit_score_validates_mode_fields() {
    let (_db, app) = setup();
    let (status, body) = send(
        &app,
        post(
            "/api/submit-score",
            json!({
                "name": "Alice",
                "mode": "daily",
                "score": 9,
                "startSeed": "STONE",
                "endSeed": "TONES",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));

    let (status, _) = send(&app, get("/api/leaderboard?scope=group")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_groups_create_find_and_conflict() {
    let (_db, app) = setup();

    let (status, body) = send(&app, post("/api/groups", json!({ "name": " Owls " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "id": "Owls" }));

    let (status, body) = send(&app, post("/api/groups", json!({ "name": "Owls" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("name-taken"));
    assert_eq!(body["suggestions"], json!(["Owls1", "Owls2", "Owls3"]));

    let (status, body) = send(&app, post("/api/groups", json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("invalid-name"));

    let (status, body) = send(&app, get("/api/groups/Owls")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!("Owls"));

    let (status, body) = send(&app, get("/api/groups/Larks")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("not-found"));
}
