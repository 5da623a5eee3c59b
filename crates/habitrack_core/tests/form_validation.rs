use habitrack_core::validation::habit_form::{
    accept_habit_form, validate_habit_form, validate_icon, HabitFormField, GOAL_BELOW_DONE_MESSAGE,
    GOAL_MESSAGE, ICON_MESSAGE, NAME_MESSAGE, REQUIRED_MESSAGE, UNKNOWN_ICON_MESSAGE,
};
use habitrack_core::{Day, Habit, HabitFormInput, IconCatalog, NewHabit};
use uuid::Uuid;

fn habit_with_done_days(done: u32) -> Habit {
    let mut habit = Habit::new(
        Uuid::new_v4(),
        NewHabit {
            name: "Read".to_string(),
            goal_days: 10,
            icon: "icon-book".to_string(),
        },
    );
    habit.days = (1..=done).map(|index| Day::completed(index, "ok")).collect();
    habit.days.push(Day::open(done + 1));
    habit
}

#[test]
fn every_field_is_checked_independently() {
    let catalog = IconCatalog::builtin();
    let input = HabitFormInput::new(None, "-bad-", "abc");

    let report = validate_habit_form(&input, &catalog, None);
    assert!(!report.is_valid());
    assert_eq!(report.icon.reason, Some(ICON_MESSAGE));
    assert_eq!(report.name.reason, Some(NAME_MESSAGE));
    assert_eq!(report.goal.reason, Some(GOAL_MESSAGE));

    let fields: Vec<_> = report.failures().into_iter().map(|(f, _)| f).collect();
    assert_eq!(
        fields,
        vec![
            HabitFormField::Icon,
            HabitFormField::Name,
            HabitFormField::Goal
        ]
    );
}

#[test]
fn one_bad_field_does_not_mask_the_others() {
    let catalog = IconCatalog::builtin();
    let input = HabitFormInput::new(Some("icon-book"), "", "12");

    let report = validate_habit_form(&input, &catalog, None);
    assert!(report.icon.valid);
    assert_eq!(report.name.reason, Some(REQUIRED_MESSAGE));
    assert!(report.goal.valid);
}

#[test]
fn accepted_form_is_trimmed_and_parsed() {
    let catalog = IconCatalog::builtin();
    let input = HabitFormInput::new(Some(" icon-book "), "  Read & learn: ch-1 ", " 30 ");

    let form = accept_habit_form(&input, &catalog, None).expect("form is valid");
    assert_eq!(form.icon_id, "icon-book");
    assert_eq!(form.name, "Read & learn: ch-1");
    assert_eq!(form.goal_days, 30);
}

#[test]
fn non_latin_names_are_letters() {
    let catalog = IconCatalog::builtin();
    let input = HabitFormInput::new(Some("icon-book"), "Чтение книг", "5");
    assert!(accept_habit_form(&input, &catalog, None).is_ok());
}

#[test]
fn goal_bounds_are_inclusive() {
    let catalog = IconCatalog::builtin();
    for (goal, valid) in [("4", false), ("5", true), ("100", true), ("101", false), ("7.5", false)]
    {
        let input = HabitFormInput::new(Some("icon-book"), "Read", goal);
        let report = validate_habit_form(&input, &catalog, None);
        assert_eq!(report.goal.valid, valid, "goal {goal}");
    }
}

#[test]
fn unknown_icon_is_rejected() {
    let catalog = IconCatalog::builtin();
    assert_eq!(
        validate_icon(Some("icon-dragon"), &catalog).reason,
        Some(UNKNOWN_ICON_MESSAGE)
    );
    assert!(validate_icon(Some("icon-water"), &catalog).valid);
}

#[test]
fn edit_goal_cannot_drop_below_done_days() {
    let catalog = IconCatalog::builtin();
    let habit = habit_with_done_days(7);

    let lowered = HabitFormInput::new(Some("icon-book"), "Read", "6");
    let report =
        accept_habit_form(&lowered, &catalog, Some(&habit)).expect_err("goal below done days");
    assert_eq!(report.goal.reason, Some(GOAL_BELOW_DONE_MESSAGE));

    let equal = HabitFormInput::new(Some("icon-book"), "Read", "7");
    assert!(accept_habit_form(&equal, &catalog, Some(&habit)).is_ok());

    // Create mode has no done days to compare against.
    assert!(accept_habit_form(&lowered, &catalog, None).is_ok());
}
