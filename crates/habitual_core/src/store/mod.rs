//! Habit persistence: the JSON-file store and first-run seeding.
//!
//! # Responsibility
//! - Own the durable representation of the habit collection.
//! - Keep file-format and recovery policy inside the storage boundary.
//!
//! # Invariants
//! - The backing file is the sole source of truth across process restarts.
//! - One running store instance owns the file exclusively; there is no
//!   locking or multi-process coordination.

pub mod json_store;
pub mod seed;
