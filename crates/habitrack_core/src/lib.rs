//! Core state logic for the habit tracker.
//! This crate owns habit and day invariants; rendering goes through `HabitView`.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;
pub mod view;

pub use config::TrackerConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::day::{Day, DayError, DayIndex, DoneDayInput};
pub use model::habit::{
    Habit, HabitChanges, HabitId, HabitValidationError, NewHabit, MAX_GOAL_DAYS, MIN_GOAL_DAYS,
};
pub use model::icon::{Icon, IconCatalog};
pub use repo::habit_repo::{HabitRepository, InMemoryHabitRepository, RepoError, RepoResult};
pub use service::habit_service::{
    DeleteDayInput, FormMode, FormOutcome, HabitTracker, TrackerError,
};
pub use validation::habit_form::{HabitFormInput, HabitFormReport};
pub use view::text::TextView;
pub use view::{DayRow, HabitView, SidebarItem};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
