//! Domain model for tracked habits.
//!
//! # Responsibility
//! - Define the canonical habit shape and its derived-status computations.
//! - Keep period math in one place so completion and streak logic agree on
//!   window boundaries.
//!
//! # Invariants
//! - A habit is identified by its non-empty, case-sensitive `name`.
//! - All period judgments use naive local time; there is no timezone math.

pub mod habit;
pub mod period;
