//! Habit tracker use-case service.
//!
//! # Responsibility
//! - Receive user-originated events (form submits, clicks) with resolved ids.
//! - Gate habit forms through validation, call the day transforms, and run
//!   the matching pipeline.
//! - Own the store, the view and the current-habit selection.
//!
//! # Invariants
//! - Exactly one pipeline runs per call and it runs to completion or to its
//!   first failing step. Calls never interleave (`&mut self`).
//! - A rejected form changes nothing and runs no pipeline.
//! - Edit mode never lets a goal drop below the habit's done days.
//! - Day actions only apply to the habit on screen.

use crate::config::TrackerConfig;
use crate::model::day::{
    remove_day_by_index, replace_completed_day, DayError, DayIndex, DoneDayInput,
};
use crate::model::habit::{Habit, HabitId};
use crate::model::icon::IconCatalog;
use crate::repo::habit_repo::{HabitRepository, RepoError};
use crate::service::habit_pipelines::{
    add_day_pipeline, create_habit_pipeline, delete_day_pipeline, delete_habit_pipeline,
    edit_habit_pipeline, render_sidebar_pipeline, CreateHabit, EditHabit, SidebarRender,
    SidebarSelection,
};
use crate::service::pipeline::PipelineContext;
use crate::validation::habit_form::{accept_habit_form, HabitFormInput, HabitFormReport};
use crate::view::HabitView;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for tracker use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Target habit does not exist (deleted or never created).
    HabitNotFound(HabitId),
    /// A day action arrived while no habit is on screen.
    NoHabitSelected,
    /// A day action targeted a habit other than the one on screen.
    HabitNotOnScreen(HabitId),
    /// Day transform rejected the request.
    Day(DayError),
    /// Store-level failure other than a missing habit.
    Repo(RepoError),
    /// A pipeline finished without producing its expected result.
    InconsistentState(&'static str),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HabitNotFound(habit_id) => write!(f, "habit not found: {habit_id}"),
            Self::NoHabitSelected => write!(f, "no habit is selected"),
            Self::HabitNotOnScreen(habit_id) => {
                write!(f, "habit is not on screen: {habit_id}")
            }
            Self::Day(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent tracker state: {details}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Day(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TrackerError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(habit_id) => Self::HabitNotFound(habit_id),
            other => Self::Repo(other),
        }
    }
}

impl From<DayError> for TrackerError {
    fn from(value: DayError) -> Self {
        Self::Day(value)
    }
}

/// Which submit the habit form performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(HabitId),
}

/// Result of a habit form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Created(HabitId),
    Edited(HabitId),
    /// Validation failed; the form stays open for correction.
    Rejected(HabitFormReport),
}

/// Delete-day click payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteDayInput {
    pub habit_id: HabitId,
    pub day_index: DayIndex,
}

/// Event-handling facade over store, view and pipelines.
pub struct HabitTracker<R: HabitRepository, V: HabitView> {
    repo: R,
    view: V,
    icons: IconCatalog,
    selected: Option<HabitId>,
}

impl<R: HabitRepository, V: HabitView> HabitTracker<R, V> {
    /// Creates a tracker; nothing is rendered until [`HabitTracker::start`].
    pub fn new(repo: R, view: V, icons: IconCatalog) -> Self {
        Self {
            repo,
            view,
            icons,
            selected: None,
        }
    }

    /// Creates a tracker using the configured icon catalog.
    pub fn with_config(repo: R, view: V, config: &TrackerConfig) -> Self {
        Self::new(repo, view, config.icons.clone())
    }

    /// Initial render: habit list with the first habit selected.
    pub fn start(&mut self) -> Result<(), TrackerError> {
        info!(
            "event=tracker_start module=service status=ok habits={}",
            self.repo.list_habits().len()
        );
        self.render_sidebar(SidebarSelection::First)
    }

    /// Sidebar click: marks `habit_id` active and renders its content.
    pub fn select_habit(&mut self, habit_id: HabitId) -> Result<(), TrackerError> {
        self.lookup("select_habit", habit_id)?;
        self.render_sidebar(SidebarSelection::Current(habit_id))
    }

    /// Validates the habit form and runs the create or edit pipeline.
    ///
    /// # Errors
    /// - `HabitNotFound` in edit mode when the habit no longer exists.
    /// - Store errors raised by pipeline steps.
    pub fn submit_habit_form(
        &mut self,
        mode: FormMode,
        input: &HabitFormInput,
    ) -> Result<FormOutcome, TrackerError> {
        let existing = match mode {
            FormMode::Create => None,
            FormMode::Edit(habit_id) => Some(self.lookup("edit_habit", habit_id)?),
        };

        let form = match accept_habit_form(input, &self.icons, existing) {
            Ok(form) => form,
            Err(report) => {
                let fields = report
                    .failures()
                    .into_iter()
                    .map(|(field, _)| field.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                warn!(
                    "event=habit_form_rejected module=service status=rejected fields={fields}"
                );
                return Ok(FormOutcome::Rejected(report));
            }
        };

        match mode {
            FormMode::Create => {
                let mut ctx = PipelineContext::new(
                    &mut self.repo,
                    &mut self.view,
                    &mut self.selected,
                    CreateHabit::new(form.into_new_habit()),
                );
                create_habit_pipeline::<R, V>().run(&mut ctx)?;
                let habit_id = ctx.subject.created.ok_or(TrackerError::InconsistentState(
                    "create pipeline finished without a habit id",
                ))?;
                info!("event=habit_created module=service status=ok habit_id={habit_id}");
                Ok(FormOutcome::Created(habit_id))
            }
            FormMode::Edit(habit_id) => {
                let mut ctx = PipelineContext::new(
                    &mut self.repo,
                    &mut self.view,
                    &mut self.selected,
                    EditHabit {
                        habit_id,
                        changes: form.into_changes(),
                    },
                );
                edit_habit_pipeline::<R, V>().run(&mut ctx)?;
                info!("event=habit_edited module=service status=ok habit_id={habit_id}");
                Ok(FormOutcome::Edited(habit_id))
            }
        }
    }

    /// Deletes one habit and re-renders with the first remaining habit.
    pub fn delete_habit(&mut self, habit_id: HabitId) -> Result<(), TrackerError> {
        self.lookup("delete_habit", habit_id)?;
        let mut ctx = PipelineContext::new(
            &mut self.repo,
            &mut self.view,
            &mut self.selected,
            habit_id,
        );
        delete_habit_pipeline::<R, V>().run(&mut ctx)?;
        info!("event=habit_deleted module=service status=ok habit_id={habit_id}");
        Ok(())
    }

    /// Deletes the habit currently on screen.
    pub fn delete_current_habit(&mut self) -> Result<(), TrackerError> {
        let habit_id = self.selected.ok_or(TrackerError::NoHabitSelected)?;
        self.delete_habit(habit_id)
    }

    /// Day-form submit for the habit currently on screen.
    pub fn submit_done_day(&mut self, input: &DoneDayInput) -> Result<(), TrackerError> {
        let habit_id = self.selected.ok_or(TrackerError::NoHabitSelected)?;
        self.submit_done_day_for(habit_id, input)
    }

    /// Marks the day at `input.done_day_index` done, then runs add-day.
    ///
    /// # Errors
    /// - `HabitNotOnScreen` when `habit_id` is not the selected habit.
    /// - `Day(DayNotFound)` when the index is not in the sequence.
    ///
    /// Nothing changes on error.
    pub fn submit_done_day_for(
        &mut self,
        habit_id: HabitId,
        input: &DoneDayInput,
    ) -> Result<(), TrackerError> {
        let habit = self.on_screen("day_done", habit_id)?;
        let days = replace_completed_day(&habit.days, input)?;
        self.repo.replace_days(habit_id, days)?;

        let mut ctx = PipelineContext::new(
            &mut self.repo,
            &mut self.view,
            &mut self.selected,
            habit_id,
        );
        add_day_pipeline::<R, V>().run(&mut ctx)?;
        info!(
            "event=day_done module=service status=ok habit_id={habit_id} index={}",
            input.done_day_index
        );
        Ok(())
    }

    /// Removes one day of the selected habit, then runs delete-day.
    pub fn delete_day(&mut self, input: DeleteDayInput) -> Result<(), TrackerError> {
        let habit = self.on_screen("day_deleted", input.habit_id)?;
        let days = remove_day_by_index(&habit.days, input.day_index);
        self.repo.replace_days(input.habit_id, days)?;

        let mut ctx = PipelineContext::new(
            &mut self.repo,
            &mut self.view,
            &mut self.selected,
            input.habit_id,
        );
        delete_day_pipeline::<R, V>().run(&mut ctx)?;
        info!(
            "event=day_deleted module=service status=ok habit_id={} index={}",
            input.habit_id, input.day_index
        );
        Ok(())
    }

    /// All habits in creation order.
    pub fn habits(&self) -> &[Habit] {
        self.repo.list_habits()
    }

    pub fn habit(&self, habit_id: HabitId) -> Option<&Habit> {
        self.repo.get_habit(habit_id)
    }

    /// Habit currently shown in the main area.
    pub fn selected_habit_id(&self) -> Option<HabitId> {
        self.selected
    }

    pub fn icons(&self) -> &IconCatalog {
        &self.icons
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    fn lookup(&self, event: &str, habit_id: HabitId) -> Result<&Habit, TrackerError> {
        self.repo.get_habit(habit_id).ok_or_else(|| {
            warn!("event={event} module=service status=not_found habit_id={habit_id}");
            TrackerError::HabitNotFound(habit_id)
        })
    }

    fn on_screen(&self, event: &str, habit_id: HabitId) -> Result<&Habit, TrackerError> {
        let habit = self.lookup(event, habit_id)?;
        if self.selected != Some(habit_id) {
            warn!(
                "event={event} module=service status=not_selected habit_id={habit_id} selected={:?}",
                self.selected
            );
            return Err(TrackerError::HabitNotOnScreen(habit_id));
        }
        Ok(habit)
    }

    fn render_sidebar(&mut self, selection: SidebarSelection) -> Result<(), TrackerError> {
        let mut ctx = PipelineContext::new(
            &mut self.repo,
            &mut self.view,
            &mut self.selected,
            SidebarRender::new(selection),
        );
        render_sidebar_pipeline::<R, V>().run(&mut ctx)
    }
}
