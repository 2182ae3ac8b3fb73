//! Habit use-case service.
//!
//! # Responsibility
//! - Provide the stable entry points the interaction shell calls.
//! - Orchestrate mutate-then-persist so callers never see memory and disk
//!   drift apart on the success path.
//!
//! # Invariants
//! - Service APIs never bypass the store's uniqueness or persistence
//!   contracts.
//! - Lookup misses stay routine results (`Ok(false)` / `None`), not errors.

use crate::model::habit::{Habit, HabitValidationError, Periodicity};
use crate::store::json_store::{JsonHabitStore, StoreError, StoreResult};
use chrono::NaiveDateTime;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from shell-facing service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Malformed input to habit construction.
    Validation(HabitValidationError),
    /// Storage-layer failure (duplicate name, I/O, encoding).
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<HabitValidationError> for ServiceError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Full detail view of one habit, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDetail {
    pub name: String,
    pub description: String,
    pub periodicity: Periodicity,
    pub created_at: NaiveDateTime,
    pub current_streak: u32,
    pub completed_this_period: bool,
}

/// Use-case facade over the habit store.
pub struct HabitService {
    store: JsonHabitStore,
}

impl HabitService {
    /// Creates a service owning the provided store.
    pub fn new(store: JsonHabitStore) -> Self {
        Self { store }
    }

    /// Read access to the underlying store (path, load outcome).
    pub fn store(&self) -> &JsonHabitStore {
        &self.store
    }

    /// Validates and creates a new habit, persisting the collection.
    pub fn create_habit(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        periodicity: Periodicity,
    ) -> Result<(), ServiceError> {
        let habit = Habit::new(name, description, periodicity)?;
        self.store.add(habit)?;
        info!("event=habit_created module=service status=ok");
        Ok(())
    }

    /// Records a completion for the named habit at `now` and persists.
    ///
    /// Returns `Ok(false)` when no habit has that name.
    pub fn check_off(&mut self, name: &str, now: NaiveDateTime) -> StoreResult<bool> {
        let Some(habit) = self.store.get_mut(name) else {
            return Ok(false);
        };
        habit.check_off_at(now);
        self.store.save()?;
        info!("event=habit_checkoff module=service status=ok");
        Ok(true)
    }

    /// Removes the named habit; `Ok(false)` when there was no match.
    pub fn remove_habit(&mut self, name: &str) -> StoreResult<bool> {
        self.store.remove(name)
    }

    /// Looks up one habit by exact name.
    pub fn habit(&self, name: &str) -> Option<&Habit> {
        self.store.get(name)
    }

    /// All habits in collection order.
    pub fn habits(&self) -> &[Habit] {
        self.store.habits()
    }

    /// Habits with the given cadence, preserving collection order.
    pub fn habits_by_periodicity(&self, periodicity: Periodicity) -> Vec<&Habit> {
        self.store.filter_by_periodicity(periodicity)
    }

    /// Builds the detail view for one habit as of `now`.
    pub fn habit_detail(&self, name: &str, now: NaiveDateTime) -> Option<HabitDetail> {
        let habit = self.store.get(name)?;
        Some(HabitDetail {
            name: habit.name.clone(),
            description: habit.description.clone(),
            periodicity: habit.periodicity,
            created_at: habit.created_at,
            current_streak: habit.current_streak(now),
            completed_this_period: habit.is_completed_for_period(now),
        })
    }

    /// Seeds demonstration habits when (and only when) the store is empty.
    ///
    /// Returns the number of habits created; 0 for an already-populated
    /// store.
    pub fn seed_if_empty(&mut self, now: NaiveDateTime) -> StoreResult<usize> {
        if !self.store.is_empty() {
            return Ok(0);
        }
        self.store.seed_defaults(now)
    }
}
