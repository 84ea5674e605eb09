use std::collections::BTreeSet;

use tt_core::{select, ChangeInfo, ClockTime, DaySchedule, DisplayMode, GroupFilter, Lesson};

fn lesson(name: &str, time: &str) -> Lesson {
    Lesson::new(name, time.parse().unwrap())
}

fn school_day() -> DaySchedule {
    let mut ang = lesson("Angielski", "09:45 - 10:30");
    ang.distribution = Some("ang1".to_string());
    let mut ang_other = lesson("Angielski", "09:45 - 10:30");
    ang_other.distribution = Some("ang2".to_string());
    let mut cancelled = lesson("Chemia", "10:40 - 11:25");
    cancelled.change = ChangeInfo::Cancelled;

    DaySchedule::new(vec![
        lesson("Religia", "07:10 - 07:55"),
        lesson("Matematyka", "08:00 - 08:45"),
        lesson("Polski", "08:55 - 09:40"),
        ang,
        ang_other,
        cancelled,
        lesson("Historia", "11:35 - 12:20"),
        lesson("Fizyka", "12:40 - 13:25"),
        lesson("Informatyka", "13:35 - 14:20"),
        lesson("WF", "14:25 - 15:10"),
    ])
}

fn every_minute() -> impl Iterator<Item = ClockTime> {
    (0..24u8).flat_map(|h| (0..60u8).filter_map(move |m| ClockTime::new(h, m)))
}

#[test]
fn test_capacity_bound_holds_for_every_minute_and_mode() {
    let schedule = school_day();
    let groups: GroupFilter = ["ang1"].into_iter().collect();
    let excluded: BTreeSet<String> = ["Religia".to_string()].into_iter().collect();
    for mode in [DisplayMode::Small, DisplayMode::Medium, DisplayMode::Large] {
        for now in every_minute() {
            let sel = select(Some(&schedule), now, mode.capacity(), &groups, &excluded);
            assert!(sel.entries.len() <= mode.capacity(), "{mode:?} at {now}");
        }
    }
}

#[test]
fn test_at_most_one_current_with_non_overlapping_ranges() {
    let schedule = school_day();
    let groups: GroupFilter = ["ang1"].into_iter().collect();
    for now in every_minute() {
        let sel = select(Some(&schedule), now, 10, &groups, &BTreeSet::new());
        assert!(sel.entries.iter().filter(|e| e.is_current).count() <= 1, "at {now}");
    }
}

#[test]
fn test_selection_is_stable_for_same_inputs() {
    let schedule = school_day();
    let groups: GroupFilter = ["ang1"].into_iter().collect();
    let now: ClockTime = "09:50".parse().unwrap();
    let a = select(Some(&schedule), now, 4, &groups, &BTreeSet::new());
    let b = select(Some(&schedule), now, 4, &groups, &BTreeSet::new());
    assert_eq!(a, b);
}

#[test]
fn test_entries_keep_stored_order_and_positions() {
    let schedule = school_day();
    let groups: GroupFilter = ["ang1"].into_iter().collect();
    let excluded: BTreeSet<String> = ["Religia".to_string()].into_iter().collect();
    let sel = select(Some(&schedule), "06:00".parse().unwrap(), 7, &groups, &excluded);
    let got: Vec<(usize, &str)> = sel
        .entries
        .iter()
        .map(|e| (e.position, e.display_name.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (0, "Matematyka"),
            (1, "Polski"),
            (2, "Angielski"),
            (3, "Chemia"),
            (4, "Historia"),
            (5, "Fizyka"),
            (6, "Informatyka"),
        ]
    );
    assert_eq!(sel.entries[3].lesson.change, ChangeInfo::Cancelled);
}

#[test]
fn test_scenario_a_capacity_counts_accepted_lessons() {
    let schedule = DaySchedule::new(vec![
        lesson("Math", "08:00 - 08:45"),
        lesson("Religia", "08:50 - 09:35"),
        lesson("PE", "09:40 - 10:25"),
    ]);
    let excluded: BTreeSet<String> = ["Religia".to_string()].into_iter().collect();
    let now: ClockTime = "08:10".parse().unwrap();

    let two = select(Some(&schedule), now, 2, &GroupFilter::new(), &excluded);
    assert_eq!(two.entries.len(), 2);
    assert_eq!(two.entries[0].display_name, "Math");
    assert!(two.entries[0].is_current);
    assert_eq!(two.entries[1].display_name, "PE");

    let one = select(Some(&schedule), now, 1, &GroupFilter::new(), &excluded);
    assert_eq!(one.entries.len(), 1);
    assert_eq!(one.current().map(|e| e.display_name.as_str()), Some("Math"));
}
