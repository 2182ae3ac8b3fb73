//! First-run demonstration habits.
//!
//! # Responsibility
//! - Populate an empty store with example habits and synthetic history so a
//!   fresh install has something to show.
//!
//! # Invariants
//! - Seeding only ever runs against an empty collection.
//! - Each seeded habit is persisted individually, so partial seeding
//!   survives a mid-seed failure.
//! - Backfilled check-offs deliberately predate `created_at`.

use crate::model::habit::{Habit, Periodicity};
use crate::store::json_store::{JsonHabitStore, StoreResult};
use chrono::{Duration, NaiveDateTime};
use log::info;

/// Synthetic history window, in days, counting back from "now".
pub const SEED_LOOKBACK_DAYS: i64 = 28;

const SEED_HABITS: [(&str, &str, Periodicity); 5] = [
    (
        "Morning Exercise",
        "15 minutes of morning workout",
        Periodicity::Daily,
    ),
    ("Read", "Read for 30 minutes", Periodicity::Daily),
    (
        "Meditate",
        "10 minutes mindfulness meditation",
        Periodicity::Daily,
    ),
    (
        "Weekly Planning",
        "Plan goals and tasks for the week",
        Periodicity::Weekly,
    ),
    ("House Cleaning", "Deep clean the house", Periodicity::Weekly),
];

impl JsonHabitStore {
    /// Creates the demonstration habits with a backfilled history window.
    ///
    /// Daily habits get one check-off per day of the window; weekly habits
    /// one check-off every seventh day. Returns the number of habits
    /// created; a non-empty store is left untouched and reports 0.
    pub fn seed_defaults(&mut self, now: NaiveDateTime) -> StoreResult<usize> {
        if !self.is_empty() {
            return Ok(0);
        }

        for (name, description, periodicity) in SEED_HABITS {
            let mut habit = Habit {
                name: name.to_string(),
                description: description.to_string(),
                periodicity,
                created_at: now,
                checkoffs: Vec::new(),
            };

            for day in 0..SEED_LOOKBACK_DAYS {
                let instant = now - Duration::days(day);
                match periodicity {
                    Periodicity::Daily => habit.check_off_at(instant),
                    Periodicity::Weekly if day % 7 == 0 => habit.check_off_at(instant),
                    Periodicity::Weekly => {}
                }
            }

            // Persists this habit before the next one is built.
            self.add(habit)?;
        }

        info!(
            "event=store_seed module=store status=ok habits={}",
            SEED_HABITS.len()
        );
        Ok(SEED_HABITS.len())
    }
}
