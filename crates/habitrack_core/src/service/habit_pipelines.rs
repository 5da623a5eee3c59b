//! Habit and day scenario pipelines.
//!
//! # Responsibility
//! - Declare the ordered steps run after each user action.
//! - Keep every step small: one store mutation or one view update.
//!
//! # Invariants
//! - Delete-day appends a possible open slot before reindexing, so indices
//!   are contiguous even when a fresh slot was just added.
//! - Add-day renders the day list before the completion message; rendering
//!   the list clears old feedback.
//! - Edit leaves no open day once the new goal is met.
//! - Render-sidebar always ends with either a rendered habit or an empty
//!   main area and a cleared selection.

use crate::model::day::{append_open_day_if_eligible, reindex_days, settle_open_day};
use crate::model::habit::{Habit, HabitChanges, HabitId, NewHabit};
use crate::repo::habit_repo::HabitRepository;
use crate::service::habit_service::TrackerError;
use crate::service::pipeline::{Pipeline, PipelineContext};
use crate::view::{day_rows, sidebar_items, HabitView};

/// Pipeline over a store-and-view context with subject `S`.
pub type HabitPipeline<'a, R, V, S> = Pipeline<PipelineContext<'a, R, V, S>, TrackerError>;

type Ctx<'a, R, V, S> = PipelineContext<'a, R, V, S>;
type StepResult = Result<(), TrackerError>;

/// Create-habit subject. `created` is filled by the store step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHabit {
    pub new_habit: NewHabit,
    pub created: Option<HabitId>,
}

impl CreateHabit {
    pub fn new(new_habit: NewHabit) -> Self {
        Self {
            new_habit,
            created: None,
        }
    }
}

/// Edit-habit subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditHabit {
    pub habit_id: HabitId,
    pub changes: HabitChanges,
}

/// Which habit the sidebar should mark active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarSelection {
    /// Top of the list, i.e. the newest habit.
    First,
    /// A given habit; falls back to an empty main area when it is gone.
    Current(HabitId),
}

/// Render-sidebar subject. `active` is resolved by the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarRender {
    pub selection: SidebarSelection,
    pub active: Option<HabitId>,
}

impl SidebarRender {
    pub fn new(selection: SidebarSelection) -> Self {
        Self {
            selection,
            active: None,
        }
    }
}

/// Subjects that point at one stored habit.
pub trait TargetHabit {
    fn target(&self) -> HabitId;
}

impl TargetHabit for HabitId {
    fn target(&self) -> HabitId {
        *self
    }
}

impl TargetHabit for EditHabit {
    fn target(&self) -> HabitId {
        self.habit_id
    }
}

/// store habit -> clear form -> render sidebar (first habit).
pub fn create_habit_pipeline<'a, R, V>() -> HabitPipeline<'a, R, V, CreateHabit>
where
    R: HabitRepository + 'a,
    V: HabitView + 'a,
{
    Pipeline::new("create_habit")
        .step("store_habit", store_habit::<R, V>)
        .step("clear_form", clear_form::<R, V, CreateHabit>)
        .step("render_sidebar", render_sidebar_first::<R, V, CreateHabit>)
}

/// apply edits -> clear form -> settle open day -> render sidebar (edited habit).
pub fn edit_habit_pipeline<'a, R, V>() -> HabitPipeline<'a, R, V, EditHabit>
where
    R: HabitRepository + 'a,
    V: HabitView + 'a,
{
    Pipeline::new("edit_habit")
        .step("apply_edits", apply_edits::<R, V>)
        .step("clear_form", clear_form::<R, V, EditHabit>)
        .step("settle_open_day", fit_open_day_to_goal::<R, V>)
        .step("render_sidebar", render_sidebar_current::<R, V, EditHabit>)
}

/// remove habit -> clear selection -> render sidebar (first habit).
pub fn delete_habit_pipeline<'a, R, V>() -> HabitPipeline<'a, R, V, HabitId>
where
    R: HabitRepository + 'a,
    V: HabitView + 'a,
{
    Pipeline::new("delete_habit")
        .step("remove_habit", remove_habit::<R, V>)
        .step("clear_selection", clear_selection::<R, V, HabitId>)
        .step("render_sidebar", render_sidebar_first::<R, V, HabitId>)
}

/// Runs after a day was marked done.
///
/// append open day -> update progress -> render days -> completion message.
pub fn add_day_pipeline<'a, R, V>() -> HabitPipeline<'a, R, V, HabitId>
where
    R: HabitRepository + 'a,
    V: HabitView + 'a,
{
    Pipeline::new("add_day")
        .step("ensure_open_day", ensure_open_day::<R, V, HabitId>)
        .step("update_progress", update_progress::<R, V>)
        .step("render_days", render_day_list::<R, V>)
        .step("show_completion", show_completion::<R, V>)
}

/// Runs after a day was removed.
///
/// append open day -> reindex -> update progress -> render days.
pub fn delete_day_pipeline<'a, R, V>() -> HabitPipeline<'a, R, V, HabitId>
where
    R: HabitRepository + 'a,
    V: HabitView + 'a,
{
    Pipeline::new("delete_day")
        .step("ensure_open_day", ensure_open_day::<R, V, HabitId>)
        .step("reindex_days", reindex::<R, V>)
        .step("update_progress", update_progress::<R, V>)
        .step("render_days", render_day_list::<R, V>)
}

/// resolve active habit -> render list -> render or clear main content.
pub fn render_sidebar_pipeline<'a, R, V>() -> HabitPipeline<'a, R, V, SidebarRender>
where
    R: HabitRepository + 'a,
    V: HabitView + 'a,
{
    Pipeline::new("render_sidebar")
        .step("resolve_active", resolve_active::<R, V>)
        .step("render_list", render_list::<R, V>)
        .step("activate_habit", activate_habit::<R, V>)
}

/// title -> progress -> goal -> days.
pub fn render_main_content_pipeline<'a, R, V>() -> HabitPipeline<'a, R, V, HabitId>
where
    R: HabitRepository + 'a,
    V: HabitView + 'a,
{
    Pipeline::new("render_main_content")
        .step("update_title", update_title::<R, V>)
        .step("render_progress", render_progress::<R, V>)
        .step("render_goal", render_goal::<R, V>)
        .step("render_days", render_day_list::<R, V>)
}

fn find_habit<R: HabitRepository>(repo: &R, habit_id: HabitId) -> Result<&Habit, TrackerError> {
    repo.get_habit(habit_id)
        .ok_or(TrackerError::HabitNotFound(habit_id))
}

fn store_habit<R: HabitRepository, V: HabitView>(
    ctx: &mut Ctx<'_, R, V, CreateHabit>,
) -> StepResult {
    let habit_id = ctx.repo.create_habit(ctx.subject.new_habit.clone())?;
    ctx.subject.created = Some(habit_id);
    Ok(())
}

fn apply_edits<R: HabitRepository, V: HabitView>(ctx: &mut Ctx<'_, R, V, EditHabit>) -> StepResult {
    ctx.repo
        .update_habit(ctx.subject.habit_id, &ctx.subject.changes)?;
    Ok(())
}

fn remove_habit<R: HabitRepository, V: HabitView>(ctx: &mut Ctx<'_, R, V, HabitId>) -> StepResult {
    ctx.repo.delete_habit(ctx.subject)?;
    Ok(())
}

fn clear_form<R, V: HabitView, S>(ctx: &mut Ctx<'_, R, V, S>) -> StepResult {
    ctx.view.clear_form();
    Ok(())
}

fn clear_selection<R, V, S>(ctx: &mut Ctx<'_, R, V, S>) -> StepResult {
    *ctx.selection = None;
    Ok(())
}

fn ensure_open_day<R: HabitRepository, V, S: TargetHabit>(
    ctx: &mut Ctx<'_, R, V, S>,
) -> StepResult {
    let habit_id = ctx.subject.target();
    let days = {
        let habit = find_habit(&*ctx.repo, habit_id)?;
        append_open_day_if_eligible(&habit.days, habit.goal_days)
    };
    ctx.repo.replace_days(habit_id, days)?;
    Ok(())
}

fn fit_open_day_to_goal<R: HabitRepository, V>(
    ctx: &mut Ctx<'_, R, V, EditHabit>,
) -> StepResult {
    let habit_id = ctx.subject.habit_id;
    let days = {
        let habit = find_habit(&*ctx.repo, habit_id)?;
        settle_open_day(&habit.days, habit.goal_days)
    };
    ctx.repo.replace_days(habit_id, days)?;
    Ok(())
}

fn reindex<R: HabitRepository, V>(ctx: &mut Ctx<'_, R, V, HabitId>) -> StepResult {
    let days = reindex_days(&find_habit(&*ctx.repo, ctx.subject)?.days);
    ctx.repo.replace_days(ctx.subject, days)?;
    Ok(())
}

fn update_progress<R: HabitRepository, V: HabitView>(
    ctx: &mut Ctx<'_, R, V, HabitId>,
) -> StepResult {
    let habit = find_habit(&*ctx.repo, ctx.subject)?;
    ctx.view.update_progress(habit.progress_percent());
    Ok(())
}

fn render_day_list<R: HabitRepository, V: HabitView>(
    ctx: &mut Ctx<'_, R, V, HabitId>,
) -> StepResult {
    let habit = find_habit(&*ctx.repo, ctx.subject)?;
    ctx.view.clear_feedback();
    ctx.view.render_days(&day_rows(habit));
    Ok(())
}

fn show_completion<R: HabitRepository, V: HabitView>(
    ctx: &mut Ctx<'_, R, V, HabitId>,
) -> StepResult {
    let habit = find_habit(&*ctx.repo, ctx.subject)?;
    if let Some(message) = habit.completion_message() {
        ctx.view.show_completion(&message);
    }
    Ok(())
}

fn render_sidebar_first<R: HabitRepository, V: HabitView, S>(
    ctx: &mut Ctx<'_, R, V, S>,
) -> StepResult {
    let mut nested = ctx.nested(SidebarRender::new(SidebarSelection::First));
    render_sidebar_pipeline::<R, V>().run(&mut nested)
}

fn render_sidebar_current<R: HabitRepository, V: HabitView, S: TargetHabit>(
    ctx: &mut Ctx<'_, R, V, S>,
) -> StepResult {
    let selection = SidebarSelection::Current(ctx.subject.target());
    let mut nested = ctx.nested(SidebarRender::new(selection));
    render_sidebar_pipeline::<R, V>().run(&mut nested)
}

fn resolve_active<R: HabitRepository, V>(ctx: &mut Ctx<'_, R, V, SidebarRender>) -> StepResult {
    ctx.subject.active = match ctx.subject.selection {
        SidebarSelection::First => ctx.repo.list_habits().last().map(|habit| habit.id),
        SidebarSelection::Current(habit_id) => ctx.repo.get_habit(habit_id).map(|habit| habit.id),
    };
    Ok(())
}

fn render_list<R: HabitRepository, V: HabitView>(
    ctx: &mut Ctx<'_, R, V, SidebarRender>,
) -> StepResult {
    let items = sidebar_items(ctx.repo.list_habits(), ctx.subject.active);
    ctx.view.render_sidebar(&items);
    Ok(())
}

fn activate_habit<R: HabitRepository, V: HabitView>(
    ctx: &mut Ctx<'_, R, V, SidebarRender>,
) -> StepResult {
    match ctx.subject.active {
        Some(habit_id) => {
            let mut nested = ctx.nested(habit_id);
            render_main_content_pipeline::<R, V>().run(&mut nested)
        }
        None => {
            *ctx.selection = None;
            ctx.view.clear_main_content();
            Ok(())
        }
    }
}

fn update_title<R: HabitRepository, V: HabitView>(ctx: &mut Ctx<'_, R, V, HabitId>) -> StepResult {
    let habit = find_habit(&*ctx.repo, ctx.subject)?;
    *ctx.selection = Some(habit.id);
    ctx.view.set_title(habit.id, &habit.display_title());
    Ok(())
}

fn render_progress<R: HabitRepository, V: HabitView>(
    ctx: &mut Ctx<'_, R, V, HabitId>,
) -> StepResult {
    let habit = find_habit(&*ctx.repo, ctx.subject)?;
    ctx.view.show_progress();
    ctx.view.update_progress(habit.progress_percent());
    Ok(())
}

fn render_goal<R: HabitRepository, V: HabitView>(ctx: &mut Ctx<'_, R, V, HabitId>) -> StepResult {
    let habit = find_habit(&*ctx.repo, ctx.subject)?;
    ctx.view.render_goal(habit.goal_days);
    Ok(())
}
