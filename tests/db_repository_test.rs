//! Tests for database repository operations.

use tempfile::NamedTempFile;

use lexit::{GroupCreation, GroupName, LeaderboardScope, LeaderboardSource, ScoreRepository, ScoreSink};
use lexit_chain::{DayKey, GameMode, PlayerName, SessionSummary, Word};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, ScoreRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = ScoreRepository::new(db_path).expect("Failed to create repository");
    repo.migrate().expect("Migrations failed");
    (db_file, repo)
}

fn day(raw: &str) -> DayKey {
    DayKey::parse(raw).unwrap()
}

fn run(name: &str, mode: GameMode, score: u32, day_key: Option<DayKey>) -> SessionSummary {
    SessionSummary::new(
        PlayerName::parse(name).unwrap(),
        mode,
        score,
        Word::parse("STONE").unwrap(),
        Word::parse("TONES").unwrap(),
        day_key,
    )
}

#[test]
fn test_empty_path_rejected() {
    assert!(ScoreRepository::new("  ".to_string()).is_err());
}

#[test]
fn test_migrate_is_repeatable() {
    let (_db, repo) = setup_test_db();
    repo.migrate().expect("Second migration run failed");
}

#[test]
fn test_record_run_round_trips_summary() {
    let (_db, repo) = setup_test_db();
    let summary = run("Alice", GameMode::Daily, 17, Some(day("2025-06-01")));

    let row = repo.record_run(&summary, None).expect("Insert failed");
    assert!(*row.id() > 0);
    assert_eq!(row.day_key().as_deref(), Some("2025-06-01"));
    assert_eq!(row.summary().expect("Row should parse"), summary);
}

#[test]
fn test_daily_board_filters_by_day_and_keeps_tie_order() {
    let (_db, repo) = setup_test_db();
    let today = day("2025-06-01");

    repo.submit(&run("Alice", GameMode::Daily, 12, Some(today)), None).unwrap();
    repo.submit(&run("Bob", GameMode::Daily, 20, Some(today)), None).unwrap();
    repo.submit(&run("Carol", GameMode::Daily, 12, Some(today)), None).unwrap();
    repo.submit(&run("Dave", GameMode::Daily, 99, Some(day("2025-06-02"))), None).unwrap();
    repo.submit(&run("Erin", GameMode::Endless, 50, None), None).unwrap();

    let board = repo.top_n(&LeaderboardScope::Daily(today), 15).expect("Query failed");
    let names: Vec<&str> = board.iter().map(|e| e.summary().name().as_str()).collect();
    assert_eq!(names, vec!["Bob", "Alice", "Carol"]);
}

#[test]
fn test_all_time_board_spans_modes_and_limits() {
    let (_db, repo) = setup_test_db();
    for (name, score) in [("Alice", 5), ("Bob", 30), ("Carol", 18)] {
        repo.submit(&run(name, GameMode::Endless, score, None), None).unwrap();
    }
    repo.submit(&run("Dave", GameMode::Daily, 25, Some(day("2025-06-01"))), None).unwrap();

    let board = repo.top_n(&LeaderboardScope::AllTime, 3).expect("Query failed");
    let scores: Vec<u32> = board.iter().map(|e| *e.summary().score()).collect();
    assert_eq!(scores, vec![30, 25, 18]);
}

#[test]
fn test_recent_board_is_newest_first() {
    let (_db, repo) = setup_test_db();
    for name in ["Alice", "Bob", "Carol"] {
        repo.submit(&run(name, GameMode::Endless, 10, None), None).unwrap();
    }

    let board = repo.top_n(&LeaderboardScope::Recent, 2).expect("Query failed");
    let names: Vec<&str> = board.iter().map(|e| e.summary().name().as_str()).collect();
    assert_eq!(names, vec!["Carol", "Bob"]);
}

#[test]
fn test_group_board_only_shows_its_group() {
    let (_db, repo) = setup_test_db();
    let owls = GroupName::parse("Owls").unwrap();
    let larks = GroupName::parse("Larks").unwrap();

    repo.submit(&run("Alice", GameMode::Group, 11, None), Some(&owls)).unwrap();
    repo.submit(&run("Bob", GameMode::Group, 22, None), Some(&larks)).unwrap();
    repo.submit(&run("Carol", GameMode::Endless, 33, None), Some(&owls)).unwrap();

    let board = repo.top_n(&LeaderboardScope::Group(owls), 15).expect("Query failed");
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].summary().name().as_str(), "Alice");
    assert_eq!(board[0].group_id().as_deref(), Some("Owls"));
}

#[test]
fn test_endless_run_drops_group() {
    let (_db, repo) = setup_test_db();
    let owls = GroupName::parse("Owls").unwrap();
    let row = repo
        .record_run(&run("Carol", GameMode::Endless, 33, None), Some(&owls))
        .unwrap();
    assert!(row.group_id().is_none());
}

#[test]
fn test_create_group_then_taken() {
    let (_db, repo) = setup_test_db();
    let owls = GroupName::parse("Owls").unwrap();

    match repo.create_group(&owls).expect("Create failed") {
        GroupCreation::Created(row) => assert_eq!(row.name(), "Owls"),
        other => panic!("expected creation, got {:?}", other),
    }

    match repo.create_group(&owls).expect("Second create failed") {
        GroupCreation::Taken { suggestions } => {
            assert_eq!(suggestions, vec!["Owls1", "Owls2", "Owls3"]);
        }
        other => panic!("expected name taken, got {:?}", other),
    }
}

#[test]
fn test_find_group() {
    let (_db, repo) = setup_test_db();
    let owls = GroupName::parse("Owls").unwrap();
    assert!(repo.find_group(&owls).unwrap().is_none());
    repo.create_group(&owls).unwrap();
    assert!(repo.find_group(&owls).unwrap().is_some());
}

#[test]
fn test_count_runs_spans_every_mode() {
    let (_db, repo) = setup_test_db();
    assert_eq!(repo.count_runs().expect("Count failed"), 0);

    repo.submit(&run("Alice", GameMode::Daily, 9, Some(day("2025-06-01"))), None)
        .expect("Insert failed");
    repo.submit(&run("Bob", GameMode::Endless, 4, None), None)
        .expect("Insert failed");
    let owls = GroupName::parse("Owls").unwrap();
    repo.submit(&run("Cara", GameMode::Group, 12, None), Some(&owls))
        .expect("Insert failed");

    assert_eq!(repo.count_runs().expect("Count failed"), 3);
}
