//! Ordered step runner.
//!
//! # Responsibility
//! - Run a named list of steps strictly in order against one context.
//! - Log every executed step with its pipeline name.
//!
//! # Invariants
//! - Steps do not consume each other's return values; they communicate
//!   through the shared context only.
//! - A failing step stops the pipeline and its error is returned unchanged.
//!   Steps never retry.

use crate::model::habit::HabitId;
use log::{debug, error};
use std::fmt::Display;

/// Shared state handed to every step of one pipeline run.
///
/// `subject` is the per-pipeline payload (new habit, edit, id, ...), so each
/// pipeline kind gets its own step signature.
pub struct PipelineContext<'a, R, V, S> {
    pub repo: &'a mut R,
    pub view: &'a mut V,
    /// Habit currently shown in the main area.
    pub selection: &'a mut Option<HabitId>,
    pub subject: S,
}

impl<'a, R, V, S> PipelineContext<'a, R, V, S> {
    pub fn new(
        repo: &'a mut R,
        view: &'a mut V,
        selection: &'a mut Option<HabitId>,
        subject: S,
    ) -> Self {
        Self {
            repo,
            view,
            selection,
            subject,
        }
    }

    /// Reborrows repo, view and selection for a nested pipeline run.
    pub fn nested<T>(&mut self, subject: T) -> PipelineContext<'_, R, V, T> {
        PipelineContext {
            repo: &mut *self.repo,
            view: &mut *self.view,
            selection: &mut *self.selection,
            subject,
        }
    }
}

/// Function signature of one step.
pub type StepFn<C, E> = fn(&mut C) -> Result<(), E>;

/// One named step.
pub struct Step<C, E> {
    name: &'static str,
    run: StepFn<C, E>,
}

impl<C, E> Step<C, E> {
    pub fn new(name: &'static str, run: StepFn<C, E>) -> Self {
        Self { name, run }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Named, ordered list of steps for one user scenario.
pub struct Pipeline<C, E> {
    name: &'static str,
    steps: Vec<Step<C, E>>,
}

impl<C, E: Display> Pipeline<C, E> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// Appends a step; builder style.
    pub fn step(mut self, name: &'static str, run: StepFn<C, E>) -> Self {
        self.steps.push(Step::new(name, run));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(Step::name).collect()
    }

    /// Runs every step in declaration order.
    ///
    /// # Errors
    /// - Returns the first step error; later steps are not run.
    pub fn run(&self, ctx: &mut C) -> Result<(), E> {
        for step in &self.steps {
            debug!(
                "event=pipeline_step module=pipeline status=start pipeline={} step={}",
                self.name, step.name
            );
            if let Err(err) = (step.run)(ctx) {
                error!(
                    "event=pipeline_step module=pipeline status=error pipeline={} step={} error={}",
                    self.name, step.name, err
                );
                return Err(err);
            }
        }
        Ok(())
    }
}
