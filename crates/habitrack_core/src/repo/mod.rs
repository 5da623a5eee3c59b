//! Habit store abstractions and implementations.
//!
//! # Responsibility
//! - Define the single-writer mutation contract for the habit collection.
//! - Keep collection bookkeeping out of the pipelines and handlers.
//!
//! # Invariants
//! - Store APIs report a missing id as `RepoError::NotFound` and change
//!   nothing.

pub mod habit_repo;
