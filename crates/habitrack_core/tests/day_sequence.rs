use habitrack_core::model::day::{
    append_open_day_if_eligible, done_days_count, open_days_count, reindex_days,
    remove_day_by_index, replace_completed_day,
};
use habitrack_core::{Day, DayError, DoneDayInput};

fn indices(days: &[Day]) -> Vec<u32> {
    days.iter().map(|day| day.index).collect()
}

#[test]
fn done_day_then_append_opens_next_slot() {
    let days = vec![Day::open(1)];
    let done = replace_completed_day(&days, &DoneDayInput::new(1, "Chapter 1"))
        .expect("day 1 exists");
    assert_eq!(done, vec![Day::completed(1, "Chapter 1")]);

    let next = append_open_day_if_eligible(&done, 5);
    assert_eq!(next, vec![Day::completed(1, "Chapter 1"), Day::open(2)]);
}

#[test]
fn goal_reached_appends_nothing() {
    let days = vec![Day::completed(1, "only")];
    let next = append_open_day_if_eligible(&days, 1);
    assert_eq!(next, days);
    assert_eq!(open_days_count(&next), 0);
}

#[test]
fn deleting_open_day_restores_slot_and_contiguous_indices() {
    let days = vec![Day::completed(1, "x"), Day::open(2)];
    let removed = remove_day_by_index(&days, 2);
    assert_eq!(removed, vec![Day::completed(1, "x")]);

    let appended = append_open_day_if_eligible(&removed, 5);
    let reindexed = reindex_days(&appended);
    assert_eq!(reindexed, vec![Day::completed(1, "x"), Day::open(2)]);
}

#[test]
fn deleting_middle_day_renumbers_without_gaps() {
    let days = vec![
        Day::completed(1, "a"),
        Day::completed(2, "b"),
        Day::completed(3, "c"),
        Day::open(4),
    ];
    let removed = remove_day_by_index(&days, 2);
    let appended = append_open_day_if_eligible(&removed, 10);
    assert_eq!(appended.len(), 3, "open slot already present");

    let reindexed = reindex_days(&appended);
    assert_eq!(indices(&reindexed), vec![1, 2, 3]);
    assert_eq!(reindexed[1].comment, "c");
    assert!(reindexed[2].is_open());
}

#[test]
fn append_then_reindex_resolves_transient_duplicate_index() {
    let days = vec![Day::completed(1, "a"), Day::completed(3, "c")];
    let appended = append_open_day_if_eligible(&days, 10);
    assert_eq!(indices(&appended), vec![1, 3, 3]);

    let reindexed = reindex_days(&appended);
    assert_eq!(indices(&reindexed), vec![1, 2, 3]);
    assert_eq!(reindexed[1].comment, "c");
    assert!(reindexed[2].is_open());
}

#[test]
fn reindex_is_idempotent() {
    let days = vec![Day::completed(7, "g"), Day::completed(2, "b"), Day::open(9)];
    let once = reindex_days(&days);
    let twice = reindex_days(&once);
    assert_eq!(once, twice);
    assert_eq!(indices(&once), vec![1, 2, 3]);
    assert_eq!(once[0].comment, "b");
}

#[test]
fn removal_only_touches_target_index() {
    let days = vec![Day::completed(1, "a"), Day::completed(2, "b"), Day::open(3)];
    assert_eq!(remove_day_by_index(&days, 9), days);

    let removed = remove_day_by_index(&days, 1);
    assert_eq!(removed, days[1..].to_vec());
}

#[test]
fn unknown_done_index_fails_without_changes() {
    let days = vec![Day::completed(1, "a"), Day::open(2)];
    let err = replace_completed_day(&days, &DoneDayInput::new(5, "late"))
        .expect_err("index 5 does not exist");
    assert_eq!(err, DayError::DayNotFound(5));
    assert_eq!(done_days_count(&days), 1);
}

#[test]
fn done_comment_is_trimmed() {
    let input = DoneDayInput::new(1, "  walked  ");
    assert_eq!(input.done_day_comment, "walked");
}

#[test]
fn open_slot_stays_single_across_mixed_operations() {
    let goal = 6;
    let mut days = vec![Day::open(1)];
    let script: [(bool, u32); 8] = [
        (true, 1),
        (true, 2),
        (false, 1),
        (true, 2),
        (true, 3),
        (false, 2),
        (true, 3),
        (true, 4),
    ];

    for (mark_done, index) in script {
        if mark_done {
            let open_index = days
                .iter()
                .find(|day| day.is_open())
                .map(|day| day.index)
                .expect("an open slot exists before each done submit");
            assert_eq!(open_index, index);
            days = replace_completed_day(&days, &DoneDayInput::new(open_index, "ok"))
                .expect("open slot exists");
            days = append_open_day_if_eligible(&days, goal);
        } else {
            days = remove_day_by_index(&days, index);
            days = append_open_day_if_eligible(&days, goal);
            days = reindex_days(&days);
        }
        assert!(open_days_count(&days) <= 1);
        assert!(done_days_count(&days) <= goal as usize);
    }
    assert_eq!(done_days_count(&days), 4);
    assert_eq!(open_days_count(&days), 1);
}
