//! CRUD behavior of the JSON-file store: write-through persistence, name
//! uniqueness, lookups, and failure handling.

use chrono::{NaiveDate, NaiveDateTime};
use habitual_core::{Habit, JsonHabitStore, LoadOutcome, Periodicity, StoreError};
use tempfile::TempDir;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn sample(name: &str, periodicity: Periodicity) -> Habit {
    Habit {
        name: name.to_string(),
        description: format!("{name} description"),
        periodicity,
        created_at: dt(2026, 8, 17, 9, 0, 0),
        checkoffs: Vec::new(),
    }
}

fn open_in(dir: &TempDir) -> JsonHabitStore {
    JsonHabitStore::open(dir.path().join("habits.json")).unwrap()
}

#[test]
fn add_persists_the_habit_to_the_backing_file() {
    let dir = TempDir::new().unwrap();
    let mut store = open_in(&dir);

    let mut habit = sample("Read", Periodicity::Daily);
    habit.check_off_at(dt(2026, 8, 18, 21, 30, 0));
    store.add(habit).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let records: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["name"], "Read");
    assert_eq!(records[0]["periodicity"], "daily");
    assert_eq!(records[0]["checkoffs"][0], "2026-08-18T21:30:00.000000");
}

#[test]
fn add_rejects_duplicate_names_and_leaves_state_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut store = open_in(&dir);
    store.add(sample("Read", Periodicity::Daily)).unwrap();

    let mut duplicate = sample("Read", Periodicity::Weekly);
    duplicate.description = "a different description".to_string();
    let err = store.add(duplicate).unwrap_err();

    assert!(matches!(err, StoreError::DuplicateName(name) if name == "Read"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("Read").unwrap().description, "Read description");
    assert_eq!(store.get("Read").unwrap().periodicity, Periodicity::Daily);

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let records: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
}

#[test]
fn remove_deletes_and_reports_whether_anything_matched() {
    let dir = TempDir::new().unwrap();
    let mut store = open_in(&dir);
    store.add(sample("Read", Periodicity::Daily)).unwrap();
    store.add(sample("Meditate", Periodicity::Daily)).unwrap();

    assert!(store.remove("Read").unwrap());
    assert_eq!(store.len(), 1);
    assert!(store.get("Read").is_none());

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let records: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["name"], "Meditate");

    // A second removal of the same name is a miss, not an error.
    assert!(!store.remove("Read").unwrap());
}

#[test]
fn lookups_are_case_sensitive_exact_matches() {
    let dir = TempDir::new().unwrap();
    let mut store = open_in(&dir);
    store.add(sample("Read", Periodicity::Daily)).unwrap();

    assert!(store.get("Read").is_some());
    assert!(store.get("read").is_none());
    assert!(store.get("Rea").is_none());
    assert!(!store.remove("READ").unwrap());
    assert_eq!(store.len(), 1);
}

#[test]
fn get_mut_changes_persist_after_an_explicit_save() {
    let dir = TempDir::new().unwrap();
    let mut store = open_in(&dir);
    store.add(sample("Read", Periodicity::Daily)).unwrap();

    let instant = dt(2026, 8, 19, 7, 45, 0);
    store.get_mut("Read").unwrap().check_off_at(instant);
    store.save().unwrap();

    let reopened = JsonHabitStore::open(store.path()).unwrap();
    assert_eq!(reopened.get("Read").unwrap().checkoffs, vec![instant]);
}

#[test]
fn reopening_reads_back_exactly_what_was_written() {
    let dir = TempDir::new().unwrap();
    let mut store = open_in(&dir);

    let mut read = sample("Read", Periodicity::Daily);
    read.check_off_at(dt(2026, 8, 18, 21, 0, 0));
    read.check_off_at(dt(2026, 8, 19, 21, 0, 0));
    let planning = sample("Weekly Planning", Periodicity::Weekly);
    store.add(read.clone()).unwrap();
    store.add(planning.clone()).unwrap();

    let reopened = JsonHabitStore::open(store.path()).unwrap();
    assert_eq!(*reopened.load_outcome(), LoadOutcome::Loaded(2));
    assert_eq!(reopened.habits(), &[read, planning]);
}

#[test]
fn filter_by_periodicity_preserves_collection_order() {
    let dir = TempDir::new().unwrap();
    let mut store = open_in(&dir);
    store.add(sample("Read", Periodicity::Daily)).unwrap();
    store.add(sample("Weekly Planning", Periodicity::Weekly)).unwrap();
    store.add(sample("Meditate", Periodicity::Daily)).unwrap();

    let daily: Vec<&str> = store
        .filter_by_periodicity(Periodicity::Daily)
        .iter()
        .map(|habit| habit.name.as_str())
        .collect();
    let weekly: Vec<&str> = store
        .filter_by_periodicity(Periodicity::Weekly)
        .iter()
        .map(|habit| habit.name.as_str())
        .collect();

    assert_eq!(daily, vec!["Read", "Meditate"]);
    assert_eq!(weekly, vec!["Weekly Planning"]);
}

#[test]
fn backing_file_is_a_pretty_printed_json_array() {
    let dir = TempDir::new().unwrap();
    let mut store = open_in(&dir);
    store.add(sample("Read", Periodicity::Daily)).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.starts_with("[\n  {"), "expected pretty output, got: {raw}");
    assert!(raw.contains("\"name\": \"Read\""));
}

#[test]
fn failed_save_surfaces_io_error_but_keeps_the_in_memory_change() {
    let dir = TempDir::new().unwrap();
    // Parent directory never created, so every write must fail.
    let path = dir.path().join("missing").join("habits.json");
    let mut store = JsonHabitStore::open(&path).unwrap();
    assert_eq!(*store.load_outcome(), LoadOutcome::Missing);

    let err = store.add(sample("Read", Periodicity::Daily)).unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
    // The collection kept the habit even though the write failed.
    assert_eq!(store.len(), 1);
    assert!(store.get("Read").is_some());
    assert!(!path.exists());
}
