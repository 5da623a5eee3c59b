//! Habit domain model.
//!
//! # Responsibility
//! - Define the canonical habit record and its create/edit payloads.
//! - Provide read-only projections used by rendering (progress, title,
//!   completion message).
//!
//! # Invariants
//! - `id` is assigned once by the store and never changes.
//! - `goal_days` stays within `MIN_GOAL_DAYS..=MAX_GOAL_DAYS`.
//! - `days` holds at most one open day and no index `0`.
//!
//! # See also
//! - `model::day` for the day-sequence transforms.

use crate::model::day::{done_days_count, open_days_count, Day, DayIndex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a habit inside one store.
pub type HabitId = Uuid;

pub const MIN_GOAL_DAYS: u32 = 5;
pub const MAX_GOAL_DAYS: u32 = 100;
pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_NAME_CHARS: usize = 50;

/// A tracked recurring activity with its day history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "HabitWire")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub goal_days: u32,
    /// Icon asset id, e.g. `icon-book`.
    pub icon: String,
    pub days: Vec<Day>,
}

/// Validated create-form payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub goal_days: u32,
    pub icon: String,
}

/// Validated edit-form payload. Replaces name, goal and icon wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitChanges {
    pub new_name: String,
    pub new_goal: u32,
    pub new_icon_id: String,
}

/// Model invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    NilId,
    BlankName,
    BlankIcon,
    GoalOutOfRange(u32),
    ZeroDayIndex,
    DuplicateDayIndex(DayIndex),
    MultipleOpenDays(usize),
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "habit id must not be nil"),
            Self::BlankName => write!(f, "habit name must not be blank"),
            Self::BlankIcon => write!(f, "habit icon must not be blank"),
            Self::GoalOutOfRange(goal) => write!(
                f,
                "goal_days ({goal}) must be within {MIN_GOAL_DAYS}..={MAX_GOAL_DAYS}"
            ),
            Self::ZeroDayIndex => write!(f, "day index must be positive"),
            Self::DuplicateDayIndex(index) => write!(f, "day index {index} appears twice"),
            Self::MultipleOpenDays(count) => {
                write!(f, "habit has {count} open days; at most one is allowed")
            }
        }
    }
}

impl Error for HabitValidationError {}

impl Habit {
    /// Builds a freshly created habit with a single open day at index 1.
    pub fn new(id: HabitId, new_habit: NewHabit) -> Self {
        Self {
            id,
            name: new_habit.name,
            goal_days: new_habit.goal_days,
            icon: new_habit.icon,
            days: vec![Day::open(1)],
        }
    }

    /// Checks model invariants.
    ///
    /// Duplicate indices are rejected here; callers that run multi-step day
    /// transforms validate only once the sequence has been reindexed.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.id.is_nil() {
            return Err(HabitValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(HabitValidationError::BlankName);
        }
        if self.icon.trim().is_empty() {
            return Err(HabitValidationError::BlankIcon);
        }
        if !(MIN_GOAL_DAYS..=MAX_GOAL_DAYS).contains(&self.goal_days) {
            return Err(HabitValidationError::GoalOutOfRange(self.goal_days));
        }

        let mut seen = BTreeSet::new();
        for day in &self.days {
            if day.index == 0 {
                return Err(HabitValidationError::ZeroDayIndex);
            }
            if !seen.insert(day.index) {
                return Err(HabitValidationError::DuplicateDayIndex(day.index));
            }
        }

        let open = open_days_count(&self.days);
        if open > 1 {
            return Err(HabitValidationError::MultipleOpenDays(open));
        }
        Ok(())
    }

    /// Applies an edit in place. Days are left untouched.
    pub fn apply_changes(&mut self, changes: &HabitChanges) {
        self.name = changes.new_name.clone();
        self.goal_days = changes.new_goal;
        self.icon = changes.new_icon_id.clone();
    }

    pub fn done_days(&self) -> usize {
        done_days_count(&self.days)
    }

    pub fn open_day(&self) -> Option<&Day> {
        self.days.iter().find(|day| day.is_open())
    }

    /// Integer completion percentage. See [`progress_percent`].
    pub fn progress_percent(&self) -> u32 {
        progress_percent(self.done_days(), self.goal_days)
    }

    pub fn is_goal_met(&self) -> bool {
        usize::try_from(self.goal_days).is_ok_and(|goal| self.done_days() == goal)
    }

    /// Congratulation text, present only when done days equal the goal.
    pub fn completion_message(&self) -> Option<String> {
        if !self.is_goal_met() {
            return None;
        }
        Some(format!(
            "Congratulations! You have achieved your goal.\nYou have practiced the habit of \"{}\" for {} days.",
            self.name,
            self.done_days()
        ))
    }

    /// Name with its first character upper-cased, as shown in the header.
    pub fn display_title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// `round(done / goal * 100)` with half rounding up; `0` when `goal_days == 0`.
pub fn progress_percent(done_days: usize, goal_days: u32) -> u32 {
    if goal_days == 0 {
        return 0;
    }
    let done = u64::try_from(done_days).unwrap_or(u64::MAX / 200);
    let goal = u64::from(goal_days);
    let percent = (done.saturating_mul(200) + goal) / (goal * 2);
    u32::try_from(percent).unwrap_or(u32::MAX)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HabitWire {
    id: HabitId,
    name: String,
    goal_days: u32,
    icon: String,
    days: Vec<Day>,
}

impl TryFrom<HabitWire> for Habit {
    type Error = HabitValidationError;

    fn try_from(value: HabitWire) -> Result<Self, Self::Error> {
        let habit = Self {
            id: value.id,
            name: value.name,
            goal_days: value.goal_days,
            icon: value.icon,
            days: value.days,
        };
        habit.validate()?;
        Ok(habit)
    }
}
