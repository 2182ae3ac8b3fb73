//! Service-level flows: first-run seeding and the full habit lifecycle the
//! interaction shell drives.

use chrono::{NaiveDate, NaiveDateTime};
use habitual_core::{
    HabitService, HabitValidationError, JsonHabitStore, LoadOutcome, Periodicity, ServiceError,
    StoreError, SEED_LOOKBACK_DAYS,
};
use tempfile::TempDir;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn service_in(dir: &TempDir) -> HabitService {
    let store = JsonHabitStore::open(dir.path().join("habits.json")).unwrap();
    HabitService::new(store)
}

#[test]
fn seeding_an_empty_store_creates_the_demonstration_set() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    let now = dt(2026, 8, 19, 12, 0, 0);

    assert_eq!(service.seed_if_empty(now).unwrap(), 5);

    let names: Vec<&str> = service.habits().iter().map(|h| h.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Morning Exercise",
            "Read",
            "Meditate",
            "Weekly Planning",
            "House Cleaning"
        ]
    );

    let read = service.habit("Read").unwrap();
    assert_eq!(read.periodicity, Periodicity::Daily);
    assert_eq!(read.checkoffs.len(), SEED_LOOKBACK_DAYS as usize);
    assert_eq!(read.created_at, now);

    let planning = service.habit("Weekly Planning").unwrap();
    assert_eq!(planning.periodicity, Periodicity::Weekly);
    assert_eq!(planning.checkoffs.len(), 4);

    // The synthetic history yields an unbroken streak up to `now`.
    let read_detail = service.habit_detail("Read", now).unwrap();
    assert_eq!(read_detail.current_streak, SEED_LOOKBACK_DAYS as u32);
    assert!(read_detail.completed_this_period);

    let planning_detail = service.habit_detail("Weekly Planning", now).unwrap();
    assert_eq!(planning_detail.current_streak, 4);
    assert!(planning_detail.completed_this_period);

    // Everything was persisted habit by habit.
    let reopened = JsonHabitStore::open(service.store().path()).unwrap();
    assert_eq!(*reopened.load_outcome(), LoadOutcome::Loaded(5));
}

#[test]
fn seeding_skips_a_store_loaded_from_a_populated_file() {
    let dir = TempDir::new().unwrap();
    let now = dt(2026, 8, 19, 12, 0, 0);
    let path = {
        let mut service = service_in(&dir);
        service
            .create_habit("Water Plants", "", Periodicity::Weekly)
            .unwrap();
        service.store().path().to_path_buf()
    };

    // A fresh session over the same one-habit file must not seed.
    let mut reloaded = HabitService::new(JsonHabitStore::open(path).unwrap());
    assert_eq!(reloaded.seed_if_empty(now).unwrap(), 0);
    assert_eq!(reloaded.habits().len(), 1);
    assert_eq!(reloaded.habits()[0].name, "Water Plants");
}

#[test]
fn create_check_complete_remove_lifecycle() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    let now = dt(2026, 8, 19, 18, 30, 0);

    service
        .create_habit("Water Plants", "Every other day", Periodicity::Daily)
        .unwrap();
    assert_eq!(service.habits().len(), 1);
    assert!(!service
        .habit_detail("Water Plants", now)
        .unwrap()
        .completed_this_period);

    assert!(service.check_off("Water Plants", now).unwrap());

    let detail = service.habit_detail("Water Plants", now).unwrap();
    assert!(detail.completed_this_period);
    assert_eq!(detail.current_streak, 1);

    assert!(service.remove_habit("Water Plants").unwrap());
    assert!(service.habit("Water Plants").is_none());

    // The backing file went back to an empty collection.
    let raw = std::fs::read_to_string(service.store().path()).unwrap();
    let records: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(records.as_array().unwrap().is_empty());
}

#[test]
fn check_off_on_an_unknown_name_is_a_miss_not_an_error() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);

    let hit = service
        .check_off("No Such Habit", dt(2026, 8, 19, 12, 0, 0))
        .unwrap();
    assert!(!hit);
}

#[test]
fn creating_a_duplicate_name_maps_to_a_store_error() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    service.create_habit("Read", "", Periodicity::Daily).unwrap();

    let err = service
        .create_habit("Read", "again", Periodicity::Weekly)
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Store(StoreError::DuplicateName(name)) if name == "Read"
    ));
    assert_eq!(service.habits().len(), 1);
}

#[test]
fn creating_with_an_empty_name_maps_to_a_validation_error() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);

    let err = service.create_habit("", "", Periodicity::Daily).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(HabitValidationError::EmptyName)
    ));
    assert!(service.habits().is_empty());
    // Validation fails before anything touches the store, so no file yet.
    assert!(!service.store().path().exists());
}

#[test]
fn detail_view_carries_every_rendered_field() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    let now = dt(2026, 8, 19, 12, 0, 0);
    service
        .create_habit("Read", "Read for 30 minutes", Periodicity::Daily)
        .unwrap();
    service.check_off("Read", now).unwrap();

    let detail = service.habit_detail("Read", now).unwrap();
    assert_eq!(detail.name, "Read");
    assert_eq!(detail.description, "Read for 30 minutes");
    assert_eq!(detail.periodicity, Periodicity::Daily);
    assert_eq!(detail.created_at, service.habit("Read").unwrap().created_at);
    assert_eq!(detail.current_streak, 1);
    assert!(detail.completed_this_period);

    assert!(service.habit_detail("No Such Habit", now).is_none());
}

#[test]
fn listing_by_periodicity_matches_the_shell_views() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    service.create_habit("Read", "", Periodicity::Daily).unwrap();
    service
        .create_habit("Weekly Planning", "", Periodicity::Weekly)
        .unwrap();
    service.create_habit("Meditate", "", Periodicity::Daily).unwrap();

    let daily: Vec<&str> = service
        .habits_by_periodicity(Periodicity::Daily)
        .iter()
        .map(|h| h.name.as_str())
        .collect();
    assert_eq!(daily, vec!["Read", "Meditate"]);

    let weekly: Vec<&str> = service
        .habits_by_periodicity(Periodicity::Weekly)
        .iter()
        .map(|h| h.name.as_str())
        .collect();
    assert_eq!(weekly, vec!["Weekly Planning"]);
}
