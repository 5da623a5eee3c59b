//! Habit store contracts and in-memory implementation.
//!
//! # Responsibility
//! - Own the authoritative habit collection for one application run.
//! - Expose one mutation entry point per operation (create/update/days/delete).
//!
//! # Invariants
//! - Habit-level writes call `Habit::validate()` before committing.
//! - A failed write leaves the collection exactly as it was.
//! - Ids are unique within the store and never reused.

use crate::model::day::Day;
use crate::model::habit::{Habit, HabitChanges, HabitId, HabitValidationError, NewHabit};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for habit mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(HabitValidationError),
    NotFound(HabitId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "habit not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<HabitValidationError> for RepoError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for the habit collection.
pub trait HabitRepository {
    /// Stores a new habit with one open day and returns its fresh id.
    fn create_habit(&mut self, new_habit: NewHabit) -> RepoResult<HabitId>;
    fn get_habit(&self, id: HabitId) -> Option<&Habit>;
    /// All habits in creation order.
    fn list_habits(&self) -> &[Habit];
    /// Replaces name, goal and icon of one habit.
    fn update_habit(&mut self, id: HabitId, changes: &HabitChanges) -> RepoResult<()>;
    /// Assigns a day sequence computed by the day transforms.
    fn replace_days(&mut self, id: HabitId, days: Vec<Day>) -> RepoResult<()>;
    /// Removes one habit with all its days and returns it.
    fn delete_habit(&mut self, id: HabitId) -> RepoResult<Habit>;
}

/// Process-lifetime habit store.
#[derive(Debug, Default)]
pub struct InMemoryHabitRepository {
    habits: Vec<Habit>,
}

impl InMemoryHabitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    fn position(&self, id: HabitId) -> RepoResult<usize> {
        self.habits
            .iter()
            .position(|habit| habit.id == id)
            .ok_or(RepoError::NotFound(id))
    }

    fn next_id(&self) -> HabitId {
        loop {
            let candidate = Uuid::new_v4();
            if !candidate.is_nil() && self.get_habit(candidate).is_none() {
                return candidate;
            }
        }
    }
}

impl HabitRepository for InMemoryHabitRepository {
    fn create_habit(&mut self, new_habit: NewHabit) -> RepoResult<HabitId> {
        let habit = Habit::new(self.next_id(), new_habit);
        habit.validate()?;

        let id = habit.id;
        self.habits.push(habit);
        Ok(id)
    }

    fn get_habit(&self, id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    fn list_habits(&self) -> &[Habit] {
        &self.habits
    }

    fn update_habit(&mut self, id: HabitId, changes: &HabitChanges) -> RepoResult<()> {
        let position = self.position(id)?;
        let mut updated = self.habits[position].clone();
        updated.apply_changes(changes);
        updated.validate()?;

        self.habits[position] = updated;
        Ok(())
    }

    fn replace_days(&mut self, id: HabitId, days: Vec<Day>) -> RepoResult<()> {
        let position = self.position(id)?;
        self.habits[position].days = days;
        Ok(())
    }

    fn delete_habit(&mut self, id: HabitId) -> RepoResult<Habit> {
        let position = self.position(id)?;
        Ok(self.habits.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::{HabitRepository, InMemoryHabitRepository, RepoError};
    use crate::model::habit::{HabitChanges, NewHabit};

    fn new_habit(name: &str) -> NewHabit {
        NewHabit {
            name: name.to_string(),
            goal_days: 10,
            icon: "icon-water".to_string(),
        }
    }

    #[test]
    fn create_assigns_distinct_ids() {
        let mut repo = InMemoryHabitRepository::new();
        let first = repo.create_habit(new_habit("Water")).expect("valid habit");
        let second = repo.create_habit(new_habit("Water")).expect("valid habit");
        assert_ne!(first, second);
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn failed_update_keeps_previous_state() {
        let mut repo = InMemoryHabitRepository::new();
        let id = repo.create_habit(new_habit("Water")).expect("valid habit");
        let changes = HabitChanges {
            new_name: "Tea".to_string(),
            new_goal: 1_000,
            new_icon_id: "icon-star".to_string(),
        };

        let err = repo
            .update_habit(id, &changes)
            .expect_err("goal above range must fail");
        assert!(matches!(err, RepoError::Validation(_)));
        let stored = repo.get_habit(id).expect("habit still stored");
        assert_eq!(stored.name, "Water");
        assert_eq!(stored.goal_days, 10);
    }
}
