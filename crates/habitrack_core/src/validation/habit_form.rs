//! Habit form validation gate.
//!
//! # Responsibility
//! - Check raw create/edit form values field by field.
//! - Refine the goal check in edit mode against already completed days.
//! - Turn an accepted form into `NewHabit`/`HabitChanges` payloads.
//!
//! # Invariants
//! - Checks never fail fast: every field gets its own verdict so callers can
//!   report all problems at once.
//! - A goal may never drop below the habit's done-day count.

use crate::model::habit::{
    Habit, HabitChanges, NewHabit, MAX_GOAL_DAYS, MAX_NAME_CHARS, MIN_GOAL_DAYS, MIN_NAME_CHARS,
};
use crate::model::icon::IconCatalog;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const ICON_MESSAGE: &str = "Select a habit icon";
pub const UNKNOWN_ICON_MESSAGE: &str = "Unknown habit icon";
pub const NAME_MESSAGE: &str =
    "Name must be 2-50 characters and not start or end with a space or hyphen";
pub const GOAL_MESSAGE: &str = "Please enter a number between 5 and 100";
pub const GOAL_BELOW_DONE_MESSAGE: &str = "New goal is lower than the number of completed days";

static HABIT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^[\p{{L}}0-9&:\- ]{{{MIN_NAME_CHARS},{MAX_NAME_CHARS}}}$"
    ))
    .expect("valid habit name regex")
});

/// Verdict for one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCheck {
    pub valid: bool,
    /// User-facing explanation, present only when `valid == false`.
    pub reason: Option<&'static str>,
}

impl FieldCheck {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn fail(reason: &'static str) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }
}

/// Form field identifiers, used when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitFormField {
    Icon,
    Name,
    Goal,
}

impl HabitFormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::Name => "name",
            Self::Goal => "goal",
        }
    }
}

/// Raw values read from the habit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitFormInput {
    /// `None` when no icon is selected.
    pub icon_id: Option<String>,
    pub name: String,
    /// Unparsed goal text.
    pub goal: String,
}

impl HabitFormInput {
    pub fn new(icon_id: Option<&str>, name: &str, goal: &str) -> Self {
        Self {
            icon_id: icon_id.map(str::to_string),
            name: name.to_string(),
            goal: goal.to_string(),
        }
    }
}

/// Independent per-field verdicts for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitFormReport {
    pub icon: FieldCheck,
    pub name: FieldCheck,
    pub goal: FieldCheck,
}

impl HabitFormReport {
    pub fn is_valid(&self) -> bool {
        self.icon.valid && self.name.valid && self.goal.valid
    }

    /// Failing fields with their reasons, in form order.
    pub fn failures(&self) -> Vec<(HabitFormField, &'static str)> {
        [
            (HabitFormField::Icon, self.icon),
            (HabitFormField::Name, self.name),
            (HabitFormField::Goal, self.goal),
        ]
        .into_iter()
        .filter(|(_, check)| !check.valid)
        .map(|(field, check)| (field, check.reason.unwrap_or(REQUIRED_MESSAGE)))
        .collect()
    }
}

/// Normalized values of an accepted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedHabitForm {
    pub icon_id: String,
    pub name: String,
    pub goal_days: u32,
}

impl ValidatedHabitForm {
    pub fn into_new_habit(self) -> NewHabit {
        NewHabit {
            name: self.name,
            goal_days: self.goal_days,
            icon: self.icon_id,
        }
    }

    pub fn into_changes(self) -> HabitChanges {
        HabitChanges {
            new_name: self.name,
            new_goal: self.goal_days,
            new_icon_id: self.icon_id,
        }
    }
}

/// Icon is valid when one is selected and the catalog knows it.
pub fn validate_icon(icon_id: Option<&str>, catalog: &IconCatalog) -> FieldCheck {
    match icon_id.map(str::trim) {
        None | Some("") => FieldCheck::fail(ICON_MESSAGE),
        Some(id) if catalog.contains(id) => FieldCheck::ok(),
        Some(_) => FieldCheck::fail(UNKNOWN_ICON_MESSAGE),
    }
}

/// Name rules, applied to the trimmed value:
/// - 2..=50 characters of letters (any script), digits, `&`, `:`, `-`, space.
/// - Must not start or end with a hyphen.
pub fn validate_name(name: &str) -> FieldCheck {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return FieldCheck::fail(REQUIRED_MESSAGE);
    }
    if trimmed.starts_with('-') || trimmed.ends_with('-') {
        return FieldCheck::fail(NAME_MESSAGE);
    }
    if HABIT_NAME_RE.is_match(trimmed) {
        FieldCheck::ok()
    } else {
        FieldCheck::fail(NAME_MESSAGE)
    }
}

/// Parses goal text as a whole number of days.
pub fn parse_goal(goal: &str) -> Option<u32> {
    goal.trim().parse::<u32>().ok()
}

/// Goal must be a whole number within `MIN_GOAL_DAYS..=MAX_GOAL_DAYS`.
pub fn validate_goal(goal: &str) -> FieldCheck {
    let trimmed = goal.trim();
    if trimmed.is_empty() {
        return FieldCheck::fail(REQUIRED_MESSAGE);
    }
    match parse_goal(trimmed) {
        Some(value) if (MIN_GOAL_DAYS..=MAX_GOAL_DAYS).contains(&value) => FieldCheck::ok(),
        _ => FieldCheck::fail(GOAL_MESSAGE),
    }
}

/// Edit-mode refinement: a goal may not retract below completed days.
pub fn validate_goal_for_habit(goal: u32, done_days: usize) -> FieldCheck {
    let goal = usize::try_from(goal).unwrap_or(usize::MAX);
    if goal < done_days {
        FieldCheck::fail(GOAL_BELOW_DONE_MESSAGE)
    } else {
        FieldCheck::ok()
    }
}

/// Runs every field check; `existing` switches on the edit-mode refinement.
pub fn validate_habit_form(
    input: &HabitFormInput,
    catalog: &IconCatalog,
    existing: Option<&Habit>,
) -> HabitFormReport {
    let icon = validate_icon(input.icon_id.as_deref(), catalog);
    let name = validate_name(input.name.as_str());
    let mut goal = validate_goal(input.goal.as_str());

    if let (true, Some(habit), Some(value)) = (goal.valid, existing, parse_goal(&input.goal)) {
        let done_days = habit.done_days();
        goal = validate_goal_for_habit(value, done_days);
        if !goal.valid {
            warn!(
                "event=goal_below_done module=validation status=rejected habit_id={} goal={} done_days={}",
                habit.id, value, done_days
            );
        }
    }

    HabitFormReport { icon, name, goal }
}

/// Validates and normalizes a submission.
///
/// # Errors
/// - Returns the full report when any field fails.
pub fn accept_habit_form(
    input: &HabitFormInput,
    catalog: &IconCatalog,
    existing: Option<&Habit>,
) -> Result<ValidatedHabitForm, HabitFormReport> {
    let report = validate_habit_form(input, catalog, existing);
    if !report.is_valid() {
        return Err(report);
    }

    match (input.icon_id.as_deref(), parse_goal(&input.goal)) {
        (Some(icon_id), Some(goal_days)) => Ok(ValidatedHabitForm {
            icon_id: icon_id.trim().to_string(),
            name: input.name.trim().to_string(),
            goal_days,
        }),
        _ => Err(report),
    }
}
