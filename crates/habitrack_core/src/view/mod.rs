//! Presentation-layer boundary.
//!
//! # Responsibility
//! - Define the calls core makes into whatever renders habits (`HabitView`).
//! - Project habits into render-ready rows so views stay free of domain rules.
//!
//! # Invariants
//! - Views only receive data; user input comes back through `HabitTracker`.
//! - Invalid day entries are logged and skipped, never rendered.

pub mod text;

use crate::model::day::Day;
use crate::model::habit::{Habit, HabitId};
use log::error;

/// Rendering collaborator driven by the pipelines.
pub trait HabitView {
    /// Replaces the habit list. Items arrive newest first.
    fn render_sidebar(&mut self, items: &[SidebarItem]);
    /// Shows the habit header and records which habit is on screen.
    fn set_title(&mut self, habit_id: HabitId, title: &str);
    fn show_progress(&mut self);
    fn update_progress(&mut self, percent: u32);
    fn render_goal(&mut self, goal_days: u32);
    fn render_days(&mut self, rows: &[DayRow]);
    fn show_completion(&mut self, message: &str);
    fn clear_feedback(&mut self);
    /// Resets the main area to its empty state.
    fn clear_main_content(&mut self);
    fn clear_form(&mut self);
}

/// One habit button in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub habit_id: HabitId,
    pub icon: String,
    pub active: bool,
}

/// One rendered entry of the day list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayRow {
    /// The open slot, rendered as a comment input with a done button.
    Open { index: u32 },
    /// A completed day with its comment and a delete button.
    Done { index: u32, comment: String },
}

impl DayRow {
    pub fn index(&self) -> u32 {
        match self {
            Self::Open { index } | Self::Done { index, .. } => *index,
        }
    }
}

/// Sidebar projection: newest habit first, `active` marks the selection.
pub fn sidebar_items(habits: &[Habit], active: Option<HabitId>) -> Vec<SidebarItem> {
    habits
        .iter()
        .rev()
        .map(|habit| SidebarItem {
            habit_id: habit.id,
            icon: habit.icon.clone(),
            active: Some(habit.id) == active,
        })
        .collect()
}

/// Day-list projection in stored order.
///
/// Entries with index `0` and any open day after the first are invalid data;
/// they are logged at error level and skipped.
pub fn day_rows(habit: &Habit) -> Vec<DayRow> {
    let mut rows = Vec::with_capacity(habit.days.len());
    let mut open_seen = false;
    for day in &habit.days {
        match day {
            Day { index: 0, .. } => {
                error!(
                    "event=invalid_day module=view status=error habit_id={} reason=zero_index",
                    habit.id
                );
            }
            Day {
                index, done: false, ..
            } => {
                if open_seen {
                    error!(
                        "event=invalid_day module=view status=error habit_id={} index={} reason=extra_open_day",
                        habit.id, index
                    );
                    continue;
                }
                open_seen = true;
                rows.push(DayRow::Open { index: *index });
            }
            Day {
                index,
                comment,
                done: true,
            } => rows.push(DayRow::Done {
                index: *index,
                comment: comment.clone(),
            }),
        }
    }
    rows
}
