//! Core use-case services.
//!
//! # Responsibility
//! - Turn user events into store mutations followed by ordered view updates.
//! - Keep the view layer decoupled from store and day-transform details.

pub mod habit_pipelines;
pub mod habit_service;
pub mod pipeline;
