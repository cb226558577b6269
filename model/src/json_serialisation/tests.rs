use std::{fs::File, io::Read};

use crate::{
    base_types::{CourseIdx, PeriodIdx, RoomIdx, SectionIdx, TeacherIdx},
    config::CacheConfig,
    json_serialisation::{load_program_from_json, program_to_json},
};

use std::collections::BTreeSet;

fn read_json(path: &str) -> serde_json::Value {
    let mut file = File::open(path).unwrap();
    let mut input_data = String::new();
    file.read_to_string(&mut input_data).unwrap();
    serde_json::from_str(&input_data).unwrap()
}

#[test]
fn test_load_from_json() {
    // ACT
    let input_data = read_json("resources/small_test_input.json");
    let program = load_program_from_json(input_data, CacheConfig::default()).unwrap();

    // ASSERT
    assert_eq!(program.name(), "Small Splash");
    assert_eq!(program.teachers().count(), 3);
    assert_eq!(program.subjects().count(), 2);
    assert_eq!(program.courses().count(), 3);
    assert_eq!(program.sections().count(), 3);
    assert_eq!(program.rooms().count(), 2);
    assert_eq!(program.time_blocks().count(), 1);
    assert_eq!(program.periods().count(), 2);
    assert_eq!(program.resources().count(), 2);

    let alice = program.get_teacher(TeacherIdx::from(0)).unwrap();
    assert_eq!(alice.name(), "Alice");
    assert_eq!(alice.available_periods(), &vec![PeriodIdx::from(0)]);

    let harper130 = program.get_room(RoomIdx::from(0)).unwrap();
    assert_eq!(harper130.name(), "Harper 130");
    assert_eq!(harper130.capacity(), 75);

    let pirates = program.get_section(SectionIdx::from(1)).unwrap();
    assert_eq!(pirates.estimated_class_size(), 30);
    assert_eq!(pirates.max_class_size(), 40);
    // omitted fields take their defaults
    assert_eq!(pirates.period_length(), 1);
    assert!(pirates.required_resources().is_empty());

    let morning = program.get_time_block(0u16.into()).unwrap();
    assert_eq!(morning.description(), "Morning");
    assert_eq!(
        morning.periods(),
        &vec![PeriodIdx::from(0), PeriodIdx::from(1)]
    );

    assert!(program.get_resource(0u16.into()).unwrap().is_binding());
    assert!(!program.get_resource(1u16.into()).unwrap().is_binding());

    // section 0 is taught by Alice (free at 0) and Carol (free at 0 and 1)
    assert_eq!(
        *program.compatible_periods_of_section(SectionIdx::from(0)),
        [PeriodIdx::from(0)].into_iter().collect::<BTreeSet<_>>()
    );
}

#[test]
fn serialising_and_reloading_reproduces_the_program() {
    // ARRANGE
    let input_data = read_json("resources/small_test_input.json");
    let program = load_program_from_json(input_data, CacheConfig::default()).unwrap();

    // ACT
    let serialised = program_to_json(&program);
    let reloaded = load_program_from_json(serialised, CacheConfig::default()).unwrap();

    // ASSERT: structural equality covers teachers, rooms, sections and time blocks
    assert_eq!(*program, *reloaded);
    assert_eq!(
        program.courses().map(|c| c.idx()).collect::<Vec<CourseIdx>>(),
        reloaded.courses().map(|c| c.idx()).collect::<Vec<CourseIdx>>()
    );
    assert_eq!(
        program_to_json(&program),
        program_to_json(&reloaded)
    );
}

#[test]
fn malformed_description_is_rejected() {
    let result = load_program_from_json(
        serde_json::json!({ "teachers": "not a list" }),
        CacheConfig::default(),
    );

    assert!(result.is_err());
}
