//! JSON-file habit store.
//!
//! # Responsibility
//! - Own the in-memory habit collection for one user and its backing file.
//! - Guarantee name uniqueness at the write boundary.
//! - Synchronize every durable mutation with a full, atomic file rewrite.
//!
//! # Invariants
//! - The backing file is a pretty-printed JSON array of habit records.
//! - Parsing is all-or-nothing: one bad record discards the whole file into
//!   an empty collection (recovered, logged, reported via [`LoadOutcome`]).
//! - Saves replace the file via a sibling temp file + rename; a failed save
//!   leaves the previous file content intact.
//! - After a successful mutating call, memory and disk agree.

use crate::model::habit::{Habit, HabitRecord, Periodicity};
use log::{debug, error, info, warn};
use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by store operations.
///
/// Lookup misses are not errors; they come back as `Ok(false)` / `None`.
#[derive(Debug)]
pub enum StoreError {
    /// `add` would violate name uniqueness.
    DuplicateName(String),
    /// The backing file (or its temp sibling) could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The collection could not be encoded as JSON.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => {
                write!(f, "a habit named `{name}` already exists")
            }
            Self::Io { path, source } => {
                write!(f, "storage I/O failure at `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode habit records: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateName(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// What `open` found in the backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No backing file yet; started empty.
    Missing,
    /// File parsed cleanly; carries the record count.
    Loaded(usize),
    /// File existed but was unparsable; started empty. Carries the reason
    /// so the shell can warn the user once.
    Recovered(String),
}

/// File-backed owner of the habit collection.
///
/// The store is the sole writer of its backing file; the file is opened and
/// closed per operation, never held.
pub struct JsonHabitStore {
    path: PathBuf,
    habits: Vec<Habit>,
    load_outcome: LoadOutcome,
}

impl JsonHabitStore {
    /// Opens the store, reading the backing file when it exists.
    ///
    /// A missing file and an unparsable file both yield an empty, usable
    /// store (see [`LoadOutcome`]); only an underlying read failure is an
    /// error.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let started_at = Instant::now();

        let (habits, load_outcome) = match std::fs::read_to_string(&path) {
            Ok(raw) => match parse_collection(&raw) {
                Ok(habits) => {
                    info!(
                        "event=store_open module=store status=ok habits={} duration_ms={}",
                        habits.len(),
                        started_at.elapsed().as_millis()
                    );
                    let count = habits.len();
                    (habits, LoadOutcome::Loaded(count))
                }
                Err(reason) => {
                    warn!(
                        "event=store_open module=store status=recovered error_code=store_corrupt reason={reason}"
                    );
                    (Vec::new(), LoadOutcome::Recovered(reason))
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=store_open module=store status=ok habits=0 mode=fresh");
                (Vec::new(), LoadOutcome::Missing)
            }
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                // Exists but is not UTF-8 text; same recovery as bad JSON.
                warn!(
                    "event=store_open module=store status=recovered error_code=store_corrupt reason=non-utf8"
                );
                let reason = "file is not valid UTF-8 text".to_string();
                (Vec::new(), LoadOutcome::Recovered(reason))
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error error_code=store_io error={err}"
                );
                return Err(StoreError::Io { path, source: err });
            }
        };

        Ok(Self {
            path,
            habits,
            load_outcome,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// What `open` found; stable for the lifetime of this store.
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Serializes the whole collection and atomically replaces the backing
    /// file.
    ///
    /// Every durable mutation funnels through here; there is no incremental
    /// append path.
    pub fn save(&self) -> StoreResult<()> {
        let records: Vec<HabitRecord> = self.habits.iter().map(Habit::to_record).collect();
        let encoded = serde_json::to_string_pretty(&records)?;

        let tmp = sibling_tmp_path(&self.path);
        std::fs::write(&tmp, encoded).map_err(|source| {
            error!("event=store_save module=store status=error error_code=store_io error={source}");
            StoreError::Io {
                path: tmp.clone(),
                source,
            }
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| {
            error!("event=store_save module=store status=error error_code=store_io error={source}");
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        debug!(
            "event=store_save module=store status=ok habits={}",
            self.habits.len()
        );
        Ok(())
    }

    /// Adds a habit and persists the collection.
    ///
    /// # Errors
    /// - [`StoreError::DuplicateName`] when a habit with the same name
    ///   already exists; the store is left unchanged.
    /// - I/O errors from the save; the habit stays in memory and the
    ///   previous file content survives.
    pub fn add(&mut self, habit: Habit) -> StoreResult<()> {
        if self.get(&habit.name).is_some() {
            return Err(StoreError::DuplicateName(habit.name));
        }
        self.habits.push(habit);
        self.save()?;
        info!(
            "event=habit_added module=store status=ok habits={}",
            self.habits.len()
        );
        Ok(())
    }

    /// Removes every habit exactly matching `name` (at most one given the
    /// uniqueness invariant) and persists when something was removed.
    ///
    /// Returns whether a removal occurred; a miss is not an error.
    pub fn remove(&mut self, name: &str) -> StoreResult<bool> {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.name != name);
        if self.habits.len() == before {
            return Ok(false);
        }
        self.save()?;
        info!(
            "event=habit_removed module=store status=ok habits={}",
            self.habits.len()
        );
        Ok(true)
    }

    /// Returns the habit with exactly this name; first match wins.
    pub fn get(&self, name: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.name == name)
    }

    /// Mutable variant of [`JsonHabitStore::get`]. The caller is
    /// responsible for calling [`JsonHabitStore::save`] after mutating.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|habit| habit.name == name)
    }

    /// All habits in collection order.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// All habits with the given cadence, preserving collection order.
    pub fn filter_by_periodicity(&self, periodicity: Periodicity) -> Vec<&Habit> {
        self.habits
            .iter()
            .filter(|habit| habit.periodicity == periodicity)
            .collect()
    }
}

/// All-or-nothing decode of the backing file content.
///
/// Any failure (malformed JSON, a record missing a field, an unknown
/// periodicity, a bad timestamp) rejects the whole file.
fn parse_collection(raw: &str) -> Result<Vec<Habit>, String> {
    let records: Vec<HabitRecord> =
        serde_json::from_str(raw).map_err(|err| format!("not a valid habit record array: {err}"))?;

    let mut habits = Vec::with_capacity(records.len());
    for record in records {
        let habit = Habit::from_record(record).map_err(|err| err.to_string())?;
        habits.push(habit);
    }
    Ok(habits)
}

fn sibling_tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("habits.json"));
    name.push(".tmp");
    path.with_file_name(name)
}
