//! Shell-facing use-case services.
//!
//! # Responsibility
//! - Orchestrate model and store calls into the operations the interaction
//!   shell needs, keeping the shell free of habit semantics.

pub mod habit_service;
