//! Core domain logic for the habitual tracker.
//! This crate is the single source of truth for habit semantics and
//! persistence invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::habit::{Habit, HabitRecord, HabitValidationError, Periodicity};
pub use model::period::now_local;
pub use service::habit_service::{HabitDetail, HabitService, ServiceError};
pub use store::json_store::{JsonHabitStore, LoadOutcome, StoreError, StoreResult};
pub use store::seed::SEED_LOOKBACK_DAYS;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
