//! Plain-text view that keeps the last rendered screen in memory.
//!
//! Used by headless callers and tests to observe what the pipelines render.

use crate::model::habit::HabitId;
use crate::view::{DayRow, HabitView, SidebarItem};
use std::fmt::Write as _;

pub const EMPTY_TITLE: &str = "Create Your Habits";

/// In-memory screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextView {
    pub sidebar: Vec<SidebarItem>,
    pub title: String,
    /// Habit currently shown in the main area.
    pub current_habit: Option<HabitId>,
    /// `None` while the progress bar is hidden.
    pub progress: Option<u32>,
    pub goal_line: String,
    pub days: Vec<DayRow>,
    pub feedback: Option<String>,
    /// Number of times the habit form was reset.
    pub form_resets: usize,
    /// View calls in the order they arrived.
    pub calls: Vec<&'static str>,
}

impl Default for TextView {
    fn default() -> Self {
        Self {
            sidebar: Vec::new(),
            title: EMPTY_TITLE.to_string(),
            current_habit: None,
            progress: None,
            goal_line: String::new(),
            days: Vec::new(),
            feedback: None,
            form_resets: 0,
            calls: Vec::new(),
        }
    }
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_habit(&self) -> Option<HabitId> {
        self.sidebar
            .iter()
            .find(|item| item.active)
            .map(|item| item.habit_id)
    }

    /// Renders the screen as lines of text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for item in &self.sidebar {
            let marker = if item.active { '>' } else { ' ' };
            let _ = writeln!(out, "{marker} [{}]", item.icon);
        }
        let _ = writeln!(out, "# {}", self.title);
        if let Some(percent) = self.progress {
            let _ = writeln!(out, "progress {percent}%");
        }
        if !self.goal_line.is_empty() {
            let _ = writeln!(out, "{}", self.goal_line);
        }
        for row in &self.days {
            match row {
                DayRow::Open { index } => {
                    let _ = writeln!(out, "Day {index}: [ ]");
                }
                DayRow::Done { index, comment } => {
                    let _ = writeln!(out, "Day {index}: [x] {comment}");
                }
            }
        }
        if let Some(feedback) = &self.feedback {
            let _ = writeln!(out, "{feedback}");
        }
        out
    }
}

impl HabitView for TextView {
    fn render_sidebar(&mut self, items: &[SidebarItem]) {
        self.calls.push("render_sidebar");
        self.sidebar = items.to_vec();
    }

    fn set_title(&mut self, habit_id: HabitId, title: &str) {
        self.calls.push("set_title");
        self.current_habit = Some(habit_id);
        self.title = title.to_string();
    }

    fn show_progress(&mut self) {
        self.calls.push("show_progress");
        self.progress.get_or_insert(0);
    }

    fn update_progress(&mut self, percent: u32) {
        self.calls.push("update_progress");
        self.progress = Some(percent);
    }

    fn render_goal(&mut self, goal_days: u32) {
        self.calls.push("render_goal");
        self.goal_line = format!("Goal: {goal_days} days");
    }

    fn render_days(&mut self, rows: &[DayRow]) {
        self.calls.push("render_days");
        self.days = rows.to_vec();
    }

    fn show_completion(&mut self, message: &str) {
        self.calls.push("show_completion");
        self.feedback = Some(message.to_string());
    }

    fn clear_feedback(&mut self) {
        self.calls.push("clear_feedback");
        self.feedback = None;
    }

    fn clear_main_content(&mut self) {
        self.calls.push("clear_main_content");
        self.title = EMPTY_TITLE.to_string();
        self.current_habit = None;
        self.progress = None;
        self.goal_line.clear();
        self.days.clear();
    }

    fn clear_form(&mut self) {
        self.calls.push("clear_form");
        self.form_resets += 1;
    }
}
