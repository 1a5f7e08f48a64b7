//! Tests for daily and random seed selection.

use chrono::{TimeZone, Utc};
use chrono_tz::America::New_York;
use lexit::{DailySeeds, DayClock, LexitSeeds, RandomSeeds, WordList, curate_seeds};
use lexit_chain::{DayKey, GameMode, SeedError, SeedProvider, Word};
use std::collections::HashSet;
use std::io::Write;
use tempfile::NamedTempFile;

fn daily_list() -> Vec<Word> {
    ["CRANE", "LIGHT", "STONE", "WATER", "CROWN"]
        .iter()
        .map(|w| Word::parse(w).unwrap())
        .collect()
}

fn json_file(words: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "{}", serde_json::to_string(words).unwrap()).expect("Failed to write");
    file
}

#[test]
fn test_daily_seed_is_deterministic() {
    let key = DayKey::parse("2025-06-01").unwrap();
    let first = DailySeeds::new(daily_list()).seed_for(&key).unwrap();
    let second = DailySeeds::new(daily_list()).seed_for(&key).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_daily_seed_ignores_input_order() {
    let key = DayKey::parse("2025-06-02").unwrap();
    let mut reversed = daily_list();
    reversed.reverse();
    assert_eq!(
        DailySeeds::new(daily_list()).seed_for(&key),
        DailySeeds::new(reversed).seed_for(&key)
    );
}

#[test]
fn test_rollover_keeps_previous_day_until_cutoff() {
    let clock = DayClock::new(New_York, 2);
    let seeds = DailySeeds::new(daily_list());

    // 01:30 and 02:30 New York time on 10 June (EDT, UTC-4).
    let before = Utc.with_ymd_and_hms(2025, 6, 10, 5, 30, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2025, 6, 10, 6, 30, 0).unwrap();

    assert_eq!(clock.day_key_at(before), DayKey::parse("2025-06-09").unwrap());
    assert_eq!(clock.day_key_at(after), DayKey::parse("2025-06-10").unwrap());
    assert_eq!(
        seeds.seed_for(&clock.day_key_at(before)).unwrap(),
        seeds
            .seed_for(&DayKey::parse("2025-06-09").unwrap())
            .unwrap()
    );
}

#[test]
fn test_random_pick_respects_exclusions() {
    let words = daily_list();
    let mut seeds = RandomSeeds::with_seed(words.clone(), 7);
    let exclude: HashSet<Word> = words[1..].iter().cloned().collect();
    for _ in 0..20 {
        assert_eq!(seeds.pick(&exclude).unwrap(), words[0]);
    }
    let everything: HashSet<Word> = words.into_iter().collect();
    assert_eq!(seeds.pick(&everything), Err(SeedError::Exhausted));
}

#[test]
fn test_provider_falls_back_to_dictionary_without_seed_file() {
    let dictionary = WordList::fallback();
    let mut seeds = LexitSeeds::load(&dictionary, "/nonexistent/good-seeds.json");
    let key = DayKey::parse("2025-01-01").unwrap();

    let seed = seeds.next_seed(GameMode::Daily, Some(&key)).unwrap();
    assert!(dictionary.iter().any(|w| *w == seed));
    assert_eq!(
        seeds.next_seed(GameMode::Daily, None),
        Err(SeedError::MissingDayKey)
    );
}

#[test]
fn test_provider_reads_seed_file() {
    let dictionary = WordList::fallback();
    let file = json_file(&["crane"]);
    let mut seeds = LexitSeeds::load(&dictionary, file.path());
    let key = DayKey::parse("2025-01-01").unwrap();
    assert_eq!(
        seeds.next_seed(GameMode::Daily, Some(&key)).unwrap(),
        Word::parse("CRANE").unwrap()
    );

    let endless = seeds.next_seed(GameMode::Endless, None).unwrap();
    assert!(dictionary.iter().any(|w| *w == endless));
}

#[test]
fn test_curation_keeps_connected_seeds() {
    let dictionary = WordList::new([
        "STONE", "TONE", "STORE", "STONES", "SHONE", "ATONE", "LIGHT",
    ]);
    let candidates = WordList::new(["STONE", "LIGHT"]);

    let curated = curate_seeds(candidates.iter(), &dictionary, 3);
    assert_eq!(curated.len(), 1);
    assert_eq!(curated[0].word, Word::parse("STONE").unwrap());
    assert_eq!(curated[0].neighbours, 5);
}
