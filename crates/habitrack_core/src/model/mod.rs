//! Habit tracking domain model.
//!
//! # Responsibility
//! - Define the habit and day records owned by the store.
//! - Hold the pure day-sequence transforms and icon catalog.
//!
//! # Invariants
//! - Every habit is identified by a stable `HabitId`.
//! - Days have no identity outside their owning habit.

pub mod day;
pub mod habit;
pub mod icon;
