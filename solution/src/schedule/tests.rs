use itertools::assert_equal;

use crate::assignment::StartAssignment;
use crate::test_utilities::init_test_data;
use crate::{Schedule, ScheduleError};

#[test]
fn placing_expands_and_records_the_assignment() {
    // ARRANGE
    let d = init_test_data();
    let schedule = Schedule::empty(d.program.clone());

    // ACT
    let schedule = schedule
        .place(d.max_science, d.harper130, d.period0)
        .unwrap();

    // ASSERT
    assert_eq!(schedule.number_of_placed_sections(), 1);
    assert!(schedule.is_placed(d.max_science));
    assert_eq!(
        schedule.start_assignment_of(d.max_science),
        Some(&StartAssignment::new(d.max_science, d.harper130, d.period0))
    );

    let occupants = schedule.occurring_at(d.period0);
    assert_eq!(occupants.len(), 1);
    let present = occupants.get(&d.harper130).unwrap();
    assert_eq!(present.section(), d.max_science);
    assert_eq!(present.period(), d.period0);
    assert_eq!(
        present.start_assignment(),
        StartAssignment::new(d.max_science, d.harper130, d.period0)
    );

    assert!(schedule.occurring_at(d.period1).is_empty());
}

#[test]
fn occupied_slot_rejects_a_second_occupant() {
    // ARRANGE
    let d = init_test_data();
    let schedule = Schedule::empty(d.program.clone())
        .place(d.max_science, d.harper130, d.period0)
        .unwrap();

    // ACT
    let result = schedule.place(d.pi_rates, d.harper130, d.period0);

    // ASSERT
    assert_eq!(
        result.err(),
        Some(ScheduleError::Conflict {
            room: d.harper130,
            period: d.period0,
            occupant: d.max_science,
        })
    );
}

#[test]
fn sections_in_different_rooms_at_the_same_period_coexist() {
    let d = init_test_data();

    let schedule = Schedule::empty(d.program.clone())
        .place(d.max_science, d.harper130, d.period0)
        .unwrap()
        .place(d.pi_rates, d.harper135, d.period0)
        .unwrap();

    assert_eq!(schedule.occurring_at(d.period0).len(), 2);
    assert_equal(
        schedule.start_assignments().map(|s| s.section()),
        [d.max_science, d.pi_rates],
    );
}

#[test]
fn a_section_is_placed_at_most_once() {
    let d = init_test_data();
    let schedule = Schedule::empty(d.program.clone())
        .place(d.max_science, d.harper130, d.period0)
        .unwrap();

    let result = schedule.place(d.max_science, d.harper135, d.period0);

    assert_eq!(
        result.err(),
        Some(ScheduleError::AlreadyPlaced {
            section: d.max_science
        })
    );
}

#[test]
fn removing_clears_all_derived_slices() {
    // ARRANGE
    let d = init_test_data();
    let start = StartAssignment::new(d.max_science, d.harper130, d.period0);
    let schedule = Schedule::empty(d.program.clone())
        .place(d.max_science, d.harper130, d.period0)
        .unwrap();

    // ACT
    let cleared = schedule.remove(start).unwrap();

    // ASSERT
    assert_eq!(cleared.number_of_placed_sections(), 0);
    assert!(cleared.occurring_at(d.period0).is_empty());
    // the slot is free again
    assert!(cleared.place(d.pi_rates, d.harper130, d.period0).is_ok());
}

#[test]
fn removing_an_absent_assignment_fails() {
    let d = init_test_data();
    let schedule = Schedule::empty(d.program.clone());

    let result = schedule.remove(StartAssignment::new(d.max_science, d.harper130, d.period0));

    assert_eq!(
        result.err(),
        Some(ScheduleError::NotPlaced {
            section: d.max_science
        })
    );
}

#[test]
fn modifications_do_not_affect_the_original_schedule() {
    // ARRANGE
    let d = init_test_data();
    let original = Schedule::empty(d.program.clone())
        .place(d.max_science, d.harper130, d.period0)
        .unwrap();

    // ACT: derive two different successors from the same schedule
    let with_pirates = original.place(d.pirates, d.harper130, d.period1).unwrap();
    let cleared = original
        .remove(StartAssignment::new(d.max_science, d.harper130, d.period0))
        .unwrap();

    // ASSERT
    assert_eq!(original.number_of_placed_sections(), 1);
    assert_eq!(with_pirates.number_of_placed_sections(), 2);
    assert_eq!(cleared.number_of_placed_sections(), 0);
    assert!(original.is_placed(d.max_science));
    assert!(!cleared.is_placed(d.max_science));
}

#[test]
fn multi_period_sections_occupy_consecutive_periods_of_one_block() {
    // ARRANGE: Marathon Science spans two periods
    let d = init_test_data();
    let schedule = Schedule::empty(d.program.clone());

    // ACT
    let placed = schedule.place(d.marathon, d.harper130, d.period0).unwrap();

    // ASSERT
    assert_eq!(placed.number_of_placed_sections(), 1);
    assert_eq!(placed.occurring_at(d.period0).len(), 1);
    assert_eq!(placed.occurring_at(d.period1).len(), 1);
    assert_eq!(
        placed
            .occurring_at(d.period1)
            .get(&d.harper130)
            .unwrap()
            .start_assignment(),
        StartAssignment::new(d.marathon, d.harper130, d.period0)
    );

    // starting at the last period of the block leaves no room for the second slice
    assert_eq!(
        schedule.place(d.marathon, d.harper130, d.period1).err(),
        Some(ScheduleError::SpanExceedsBlock {
            section: d.marathon,
            start_period: d.period1
        })
    );
}

#[test]
fn a_multi_period_section_conflicts_on_any_overlapping_slice() {
    let d = init_test_data();
    let schedule = Schedule::empty(d.program.clone())
        .place(d.pirates, d.harper130, d.period1)
        .unwrap();

    // the second slice of Marathon Science would collide with Pirates
    let result = schedule.place(d.marathon, d.harper130, d.period0);

    assert_eq!(
        result.err(),
        Some(ScheduleError::Conflict {
            room: d.harper130,
            period: d.period1,
            occupant: d.pirates,
        })
    );
}

#[test]
fn present_assignments_iterate_every_slice() {
    let d = init_test_data();
    let schedule = Schedule::empty(d.program.clone())
        .place(d.max_science, d.harper130, d.period0)
        .unwrap()
        .place(d.pirates, d.harper130, d.period1)
        .unwrap();

    assert_eq!(schedule.present_assignments().count(), 2);
}
