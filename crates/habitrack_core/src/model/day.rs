//! Day record and day-sequence transforms.
//!
//! # Responsibility
//! - Define the per-habit `Day` record.
//! - Compute the next day sequence for done/append/delete/reindex operations.
//!
//! # Invariants
//! - Transforms never mutate their input; callers assign the returned
//!   sequence back onto the owning habit.
//! - `append_open_day_if_eligible` is the only path that creates an open day
//!   after habit creation, so a sequence never holds more than one.
//! - `reindex_days` yields indices `1..=N` in ascending order and is
//!   idempotent.
//!
//! # See also
//! - `service::habit_pipelines` for the order these transforms run in.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// 1-based position of a day inside its habit.
pub type DayIndex = u32;

/// One tracked occurrence of progress toward a habit goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Unique within the owning habit. Contiguous only right after a reindex.
    pub index: DayIndex,
    /// Trimmed completion note. Empty for open days.
    pub comment: String,
    /// `false` marks the open slot.
    pub done: bool,
}

impl Day {
    /// Creates the pending slot waiting for today's entry.
    pub fn open(index: DayIndex) -> Self {
        Self {
            index,
            comment: String::new(),
            done: false,
        }
    }

    /// Creates a completed day with a trimmed comment.
    pub fn completed(index: DayIndex, comment: &str) -> Self {
        Self {
            index,
            comment: comment.trim().to_string(),
            done: true,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.done
    }
}

/// Day-form payload submitted when the user completes the open slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoneDayInput {
    pub done_day_index: DayIndex,
    pub done_day_comment: String,
}

impl DoneDayInput {
    pub fn new(done_day_index: DayIndex, done_day_comment: impl Into<String>) -> Self {
        let comment = done_day_comment.into();
        Self {
            done_day_index,
            done_day_comment: comment.trim().to_string(),
        }
    }
}

/// Day-sequence transform errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayError {
    /// A done-day submission referenced an index absent from the sequence.
    DayNotFound(DayIndex),
}

impl Display for DayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DayNotFound(index) => write!(f, "day not found: index {index}"),
        }
    }
}

impl Error for DayError {}

/// Counts days marked as done.
pub fn done_days_count(days: &[Day]) -> usize {
    days.iter().filter(|day| day.done).count()
}

/// Counts open (not yet done) days.
pub fn open_days_count(days: &[Day]) -> usize {
    days.iter().filter(|day| day.is_open()).count()
}

/// Replaces the day at `done_day_index` with a completed entry.
///
/// The completed entry keeps the index and is appended at the end of the
/// returned sequence, matching submission order.
///
/// # Errors
/// - `DayError::DayNotFound` when no day carries `done_day_index`. Nothing is
///   fabricated in that case.
pub fn replace_completed_day(days: &[Day], input: &DoneDayInput) -> Result<Vec<Day>, DayError> {
    if !days.iter().any(|day| day.index == input.done_day_index) {
        return Err(DayError::DayNotFound(input.done_day_index));
    }

    let mut next: Vec<Day> = days
        .iter()
        .filter(|day| day.index != input.done_day_index)
        .cloned()
        .collect();
    next.push(Day::completed(
        input.done_day_index,
        input.done_day_comment.as_str(),
    ));
    Ok(next)
}

/// Appends a new open day when the goal is not met and no open day exists.
///
/// The new day takes `index = len + 1`; otherwise the sequence is returned
/// unchanged.
pub fn append_open_day_if_eligible(days: &[Day], goal_days: u32) -> Vec<Day> {
    let mut next = days.to_vec();
    let goal = usize::try_from(goal_days).unwrap_or(usize::MAX);
    if done_days_count(days) < goal && open_days_count(days) < 1 {
        let index = DayIndex::try_from(days.len() + 1).unwrap_or(DayIndex::MAX);
        next.push(Day::open(index));
    }
    next
}

/// Fits the open slot to `goal_days` after a goal change.
///
/// A met goal drops any open day and renumbers the rest; otherwise this is
/// [`append_open_day_if_eligible`].
pub fn settle_open_day(days: &[Day], goal_days: u32) -> Vec<Day> {
    let goal = usize::try_from(goal_days).unwrap_or(usize::MAX);
    if done_days_count(days) < goal {
        return append_open_day_if_eligible(days, goal_days);
    }
    let done: Vec<Day> = days.iter().filter(|day| day.done).cloned().collect();
    reindex_days(&done)
}

/// Returns the sequence without the day carrying `index`. No-op if absent.
pub fn remove_day_by_index(days: &[Day], index: DayIndex) -> Vec<Day> {
    days.iter()
        .filter(|day| day.index != index)
        .cloned()
        .collect()
}

/// Sorts by current index and renumbers to `1..=N`.
///
/// The sort is stable, so two days sharing an index keep their relative
/// order.
pub fn reindex_days(days: &[Day]) -> Vec<Day> {
    let mut sorted = days.to_vec();
    sorted.sort_by_key(|day| day.index);
    for (position, day) in sorted.iter_mut().enumerate() {
        day.index = DayIndex::try_from(position + 1).unwrap_or(DayIndex::MAX);
    }
    sorted
}
