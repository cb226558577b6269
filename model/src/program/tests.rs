use super::entities::{ClassPeriod, Course, Resource, Room, Section, Subject, Teacher, TimeBlock};
use super::{Program, ProgramData};

use crate::base_types::{CourseIdx, PeriodIdx, ResourceIdx, RoomIdx, SectionIdx, TeacherIdx};
use crate::config::CacheConfig;
use crate::errors::ModelError;

use std::collections::BTreeSet;

fn periods(idxs: &[u16]) -> Vec<PeriodIdx> {
    idxs.iter().copied().map(PeriodIdx::from).collect()
}

/// Alice is free at period 0, Bob at period 1, Carol at both. Section 0 is taught by
/// Alice and Carol, section 1 by Bob, section 2 by Alice.
pub fn test_program_data() -> ProgramData {
    ProgramData {
        name: String::from("Test Splash"),
        subjects: vec![Subject::new(0.into(), String::from("Science"))],
        teachers: vec![
            Teacher::new(0.into(), String::from("Alice"), periods(&[0])),
            Teacher::new(2.into(), String::from("Carol"), periods(&[0, 1])),
            Teacher::new(1.into(), String::from("Bob"), periods(&[1])),
        ],
        courses: vec![
            Course::new(0.into(), String::from("Maximum Science"), 0.into()),
            Course::new(1.into(), String::from("Pirates"), 0.into()),
            Course::new(2.into(), String::from("Pi-rates"), 0.into()),
        ],
        sections: vec![
            Section::new(
                0.into(),
                0.into(),
                vec![0.into(), 2.into()],
                8,
                10,
                1,
                vec![0.into()],
                vec![],
            ),
            Section::new(1.into(), 1.into(), vec![1.into()], 30, 40, 1, vec![], vec![]),
            Section::new(
                2.into(),
                2.into(),
                vec![0.into()],
                15,
                20,
                1,
                vec![],
                vec![0.into()],
            ),
        ],
        rooms: vec![
            Room::new(
                0.into(),
                String::from("Harper 130"),
                75,
                periods(&[0, 1]),
                vec![0.into(), 1.into()],
            ),
            Room::new(1.into(), String::from("Harper 135"), 15, periods(&[0]), vec![]),
        ],
        time_blocks: vec![TimeBlock::new(
            0.into(),
            String::from("Morning"),
            periods(&[0, 1]),
        )],
        periods: vec![
            ClassPeriod::new(0.into(), String::from("9AM"), 0.into(), 1.0),
            ClassPeriod::new(1.into(), String::from("10AM"), 0.into(), 1.0),
        ],
        resources: vec![
            Resource::new(0.into(), String::from("Chalkboard"), true),
            Resource::new(1.into(), String::from("Projector"), false),
        ],
    }
}

pub fn test_program() -> Program {
    Program::new(test_program_data(), CacheConfig::default()).unwrap()
}

#[test]
fn well_formed_program_is_built() {
    // ACT
    let program = test_program();

    // ASSERT
    assert_eq!(program.teachers().count(), 3);
    assert_eq!(program.sections().count(), 3);
    assert_eq!(program.rooms().count(), 2);
    assert_eq!(program.periods().count(), 2);
    assert_eq!(program.get_teacher(TeacherIdx::from(0)).unwrap().name(), "Alice");
    assert_eq!(
        program.get_room(RoomIdx::from(1)).unwrap().name(),
        "Harper 135"
    );
}

#[test]
fn estimated_size_above_max_size_is_rejected() {
    // ARRANGE
    let mut data = test_program_data();
    data.sections[1] = Section::new(1.into(), 1.into(), vec![1.into()], 50, 40, 1, vec![], vec![]);

    // ACT
    let result = Program::new(data, CacheConfig::default());

    // ASSERT
    assert!(matches!(result, Err(ModelError::GraphIntegrity { .. })));
}

#[test]
fn dangling_teacher_reference_is_rejected() {
    let mut data = test_program_data();
    data.sections[0] = Section::new(
        0.into(),
        0.into(),
        vec![0.into(), 99.into()],
        8,
        10,
        1,
        vec![],
        vec![],
    );

    let result = Program::new(data, CacheConfig::default());

    assert!(matches!(result, Err(ModelError::GraphIntegrity { .. })));
}

#[test]
fn availability_at_nonexistent_period_is_rejected() {
    let mut data = test_program_data();
    data.teachers[0] = Teacher::new(0.into(), String::from("Alice"), periods(&[0, 7]));

    let result = Program::new(data, CacheConfig::default());

    assert!(matches!(result, Err(ModelError::GraphIntegrity { .. })));
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut data = test_program_data();
    data.teachers
        .push(Teacher::new(1.into(), String::from("Bob again"), periods(&[1])));

    let result = Program::new(data, CacheConfig::default());

    assert!(matches!(result, Err(ModelError::GraphIntegrity { .. })));
}

#[test]
fn lookup_of_unknown_id_fails() {
    let program = test_program();

    assert!(matches!(
        program.get_section(SectionIdx::from(9)),
        Err(ModelError::NotFound { .. })
    ));
    assert!(matches!(
        program.get_resource(ResourceIdx::from(9)),
        Err(ModelError::NotFound { .. })
    ));
}

#[test]
fn course_periods_are_the_intersection_of_its_teachers_periods() {
    // ARRANGE
    let program = test_program();

    // ACT: section 0 is taught by Alice ({0}) and Carol ({0, 1})
    let compatible = program.compatible_periods_of_section(SectionIdx::from(0));

    // ASSERT
    assert_eq!(*compatible, periods(&[0]).into_iter().collect::<BTreeSet<_>>());

    // the same must hold for every course when computed by hand
    for course in program.courses().map(|c| c.idx()).collect::<Vec<_>>() {
        let mut expected: BTreeSet<PeriodIdx> = program.periods().map(|p| p.idx()).collect();
        for &teacher in program.teachers_of_course(course).iter() {
            let teacher_periods = program.compatible_periods_of_teacher(teacher);
            expected.retain(|p| teacher_periods.contains(p));
        }
        assert_eq!(*program.compatible_periods_of_course(course), expected);
    }
}

#[test]
fn requerying_a_cache_returns_equal_content() {
    let program = test_program();

    let first = program.compatible_periods_of_course(CourseIdx::from(0));
    let second = program.compatible_periods_of_course(CourseIdx::from(0));

    assert_eq!(*first, *second);
}

#[test]
fn binding_resources_filter_the_room_resources() {
    let program = test_program();

    // room 0 offers the binding chalkboard and the non-binding projector
    let all = program.resources_of_room(RoomIdx::from(0));
    let binding = program.binding_resources_of_room(RoomIdx::from(0));

    assert_eq!(all.len(), 2);
    assert_eq!(
        *binding,
        [ResourceIdx::from(0)].into_iter().collect::<BTreeSet<_>>()
    );
    assert!(program.binding_resources_of_room(RoomIdx::from(1)).is_empty());
}

#[test]
fn sections_and_courses_of_teacher_are_cross_referenced() {
    let program = test_program();

    // Alice teaches sections 0 and 2
    let sections: BTreeSet<SectionIdx> = program.sections_of_teacher(TeacherIdx::from(0)).collect();
    assert_eq!(
        sections,
        [SectionIdx::from(0), SectionIdx::from(2)].into_iter().collect()
    );

    let prerequisites = program.prerequisites_of_section(SectionIdx::from(2));
    assert_eq!(
        *prerequisites,
        [CourseIdx::from(0)].into_iter().collect::<BTreeSet<_>>()
    );
}

#[test]
fn span_stays_within_one_time_block() {
    let program = test_program();

    assert_eq!(
        program.span_from(PeriodIdx::from(0), 2),
        Some(periods(&[0, 1]))
    );
    assert_eq!(program.span_from(PeriodIdx::from(1), 1), Some(periods(&[1])));
    // a two-period meeting cannot start at the last period of the block
    assert_eq!(program.span_from(PeriodIdx::from(1), 2), None);
}

#[test]
fn programs_with_identical_entities_are_equal() {
    let first = test_program();
    let second = test_program();
    assert_eq!(first, second);

    let mut data = test_program_data();
    data.teachers[0] = Teacher::new(0.into(), String::from("Alicia"), periods(&[0]));
    let third = Program::new(data, CacheConfig::default()).unwrap();
    assert_ne!(first, third);
}

#[test]
fn attendance_ratios_sum_to_one() {
    let program = test_program();

    let total: f64 = program
        .periods()
        .map(|p| program.attendance_ratio(p.idx()))
        .sum();
    assert!((total - 1.0).abs() < 1e-9);
}
