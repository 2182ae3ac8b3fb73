//! Habit domain model.
//!
//! # Responsibility
//! - Define the canonical habit record: identity, cadence, check-off log.
//! - Compute derived status: completed-for-period and current streak.
//! - Own the wire codec between habits and persisted records.
//!
//! # Invariants
//! - `name` is the habit's identity: non-empty, matched case-sensitively.
//! - `created_at` is set at construction and never mutated afterwards.
//! - `checkoffs` is append-only in normal operation and is NOT guaranteed
//!   sorted; every derived computation treats it as a set of instants.
//! - Seed data may backdate check-offs before `created_at`; that is allowed.

use crate::model::period::{
    format_instant, now_local, parse_instant, period_ordinal, week_start_instant,
};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// How often a habit is expected to be completed.
///
/// Persisted as `"daily"` / `"weekly"` through [`Periodicity::as_str`] and
/// [`Periodicity::parse`]; internal logic only ever compares the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Periodicity {
    /// One calendar day per period.
    Daily,
    /// One Monday-start week per period.
    Weekly,
}

impl Periodicity {
    /// Wire encoding used by the persisted record format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Decodes a wire value; `None` for anything but the two known strings.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }
}

impl Display for Periodicity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for habit construction and record decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    /// The habit name is empty; names are the identity key.
    EmptyName,
    /// Persisted periodicity value outside the two recognized strings.
    UnknownPeriodicity(String),
    /// Persisted timestamp that does not parse as ISO-8601.
    InvalidTimestamp {
        field: &'static str,
        value: String,
    },
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "habit name cannot be empty"),
            Self::UnknownPeriodicity(value) => {
                write!(
                    f,
                    "unknown periodicity `{value}`; expected `daily` or `weekly`"
                )
            }
            Self::InvalidTimestamp { field, value } => {
                write!(f, "invalid timestamp `{value}` in `{field}`")
            }
        }
    }
}

impl Error for HabitValidationError {}

/// A tracked habit and its completion history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    /// Unique identity within a store; compared case-sensitively.
    pub name: String,
    /// Free-form description shown in detail views.
    pub description: String,
    /// Expected cadence; fixed at creation.
    pub periodicity: Periodicity,
    /// Construction instant; never mutated.
    pub created_at: NaiveDateTime,
    /// Completion instants in append order. Not guaranteed sorted.
    pub checkoffs: Vec<NaiveDateTime>,
}

impl Habit {
    /// Creates a habit with the current local time as `created_at`.
    ///
    /// # Errors
    /// - [`HabitValidationError::EmptyName`] when `name` is empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        periodicity: Periodicity,
    ) -> Result<Self, HabitValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        Ok(Self {
            name,
            description: description.into(),
            periodicity,
            created_at: now_local(),
            checkoffs: Vec::new(),
        })
    }

    /// Records a completion at the current local time.
    ///
    /// Always succeeds and never deduplicates: two calls record two
    /// instants. Persistence is the store's responsibility.
    pub fn check_off(&mut self) {
        self.check_off_at(now_local());
    }

    /// Records a completion at a caller-supplied instant.
    pub fn check_off_at(&mut self, instant: NaiveDateTime) {
        self.checkoffs.push(instant);
    }

    /// Returns whether the habit is completed for the period containing
    /// `now`.
    ///
    /// Daily habits are completed when the latest check-off shares `now`'s
    /// calendar date. Weekly habits are completed when the latest check-off
    /// falls inside the current half-open week window
    /// `[monday 00:00, next monday 00:00)`. Empty history is never
    /// completed.
    pub fn is_completed_for_period(&self, now: NaiveDateTime) -> bool {
        let Some(latest) = self.checkoffs.iter().max().copied() else {
            return false;
        };
        match self.periodicity {
            Periodicity::Daily => latest.date() == now.date(),
            Periodicity::Weekly => {
                let start = week_start_instant(now.date());
                latest >= start && latest < start + Duration::days(7)
            }
        }
    }

    /// Returns the current streak: the number of consecutive periods with
    /// at least one check-off, in the run ending at the most recent marked
    /// period on or before `now`.
    ///
    /// The current period counts when it has a check-off (it is then the end
    /// of the run); when it has none it neither counts toward nor breaks the
    /// streak. Returns 0 when there are no check-offs.
    pub fn current_streak(&self, now: NaiveDateTime) -> u32 {
        let marked: BTreeSet<i64> = self
            .checkoffs
            .iter()
            .map(|instant| period_ordinal(self.periodicity, *instant))
            .collect();

        let current = period_ordinal(self.periodicity, now);
        // Instants past `now` (clock skew, hand-edited files) are ignored
        // rather than counted as an anchor in the future.
        let Some(&anchor) = marked.range(..=current).next_back() else {
            return 0;
        };

        let mut streak = 0u32;
        let mut cursor = anchor;
        while marked.contains(&cursor) {
            streak += 1;
            cursor -= 1;
        }
        streak
    }

    /// Converts this habit to its persisted record form.
    pub fn to_record(&self) -> HabitRecord {
        HabitRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            periodicity: self.periodicity.as_str().to_string(),
            created_at: format_instant(self.created_at),
            checkoffs: self.checkoffs.iter().copied().map(format_instant).collect(),
        }
    }

    /// Rebuilds a habit from its persisted record form.
    ///
    /// Round-trips losslessly with [`Habit::to_record`]: name, description,
    /// periodicity, `created_at` (microsecond precision) and the full
    /// check-off sequence in order.
    ///
    /// # Errors
    /// - [`HabitValidationError::EmptyName`] for an empty name.
    /// - [`HabitValidationError::UnknownPeriodicity`] for an unrecognized
    ///   periodicity value.
    /// - [`HabitValidationError::InvalidTimestamp`] for any malformed
    ///   timestamp.
    pub fn from_record(record: HabitRecord) -> Result<Self, HabitValidationError> {
        if record.name.is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        let periodicity = Periodicity::parse(&record.periodicity)
            .ok_or(HabitValidationError::UnknownPeriodicity(record.periodicity))?;
        let created_at = parse_instant(&record.created_at).map_err(|_| {
            HabitValidationError::InvalidTimestamp {
                field: "created_at",
                value: record.created_at.clone(),
            }
        })?;

        let mut checkoffs = Vec::with_capacity(record.checkoffs.len());
        for value in record.checkoffs {
            let instant = parse_instant(&value).map_err(|_| {
                HabitValidationError::InvalidTimestamp {
                    field: "checkoffs",
                    value: value.clone(),
                }
            })?;
            checkoffs.push(instant);
        }

        Ok(Self {
            name: record.name,
            description: record.description,
            periodicity,
            created_at,
            checkoffs,
        })
    }
}

/// Persisted wire form of one habit.
///
/// Every field is required; a record missing any of them fails to
/// deserialize, which the store treats as whole-file corruption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub name: String,
    pub description: String,
    pub periodicity: String,
    pub created_at: String,
    pub checkoffs: Vec<String>,
}
