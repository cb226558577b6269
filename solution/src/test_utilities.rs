use model::base_types::{CourseIdx, PeriodIdx, ResourceIdx, RoomIdx, SectionIdx, TeacherIdx};
use model::config::CacheConfig;
use model::json_serialisation::load_program_from_json;
use model::program::Program;

use std::sync::Arc;

pub struct TestData {
    pub program: Arc<Program>,
    pub alice: TeacherIdx,
    pub bob: TeacherIdx,
    pub carol: TeacherIdx,
    pub max_science: SectionIdx,
    pub pirates: SectionIdx,
    pub pi_rates: SectionIdx,
    pub marathon: SectionIdx,
    pub harper130: RoomIdx,
    pub harper135: RoomIdx,
    pub period0: PeriodIdx,
    pub period1: PeriodIdx,
    pub chalkboard: ResourceIdx,
    pub science: CourseIdx,
}

/// Alice is free at period 0, Bob at period 1, Carol at both. "Maximum Science" is
/// taught by Alice and Carol (so its only compatible period is 0), "Pirates" by Bob,
/// "Pi-rates" by Alice and the two-period "Marathon Science" by Carol. Harper 130 is
/// free at both periods, Harper 135 only at period 0, and only Harper 130 has the
/// binding chalkboard.
pub fn init_test_data() -> TestData {
    let input = serde_json::json!({
        "name": "Test Splash",
        "subjects": [
            { "id": 0, "name": "Science" },
            { "id": 1, "name": "Mathematics" }
        ],
        "teachers": [
            { "id": 0, "name": "Alice", "availablePeriods": [0] },
            { "id": 1, "name": "Bob", "availablePeriods": [1] },
            { "id": 2, "name": "Carol", "availablePeriods": [0, 1] }
        ],
        "resources": [
            { "id": 0, "description": "Chalkboard", "isBinding": true },
            { "id": 1, "description": "Projector", "isBinding": false }
        ],
        "timeBlocks": [
            {
                "id": 0,
                "description": "Morning",
                "periods": [
                    { "id": 0, "description": "9AM", "attendanceLevel": 1.0 },
                    { "id": 1, "description": "10AM", "attendanceLevel": 0.5 }
                ]
            }
        ],
        "rooms": [
            {
                "id": 0,
                "name": "Harper 130",
                "capacity": 75,
                "availablePeriods": [0, 1],
                "resources": [0, 1]
            },
            {
                "id": 1,
                "name": "Harper 135",
                "capacity": 15,
                "availablePeriods": [0],
                "resources": []
            }
        ],
        "courses": [
            { "id": 0, "title": "Maximum Science", "subject": 0 },
            { "id": 1, "title": "Pirates", "subject": 1 },
            { "id": 2, "title": "Pi-rates", "subject": 1 },
            { "id": 3, "title": "Marathon Science", "subject": 0 }
        ],
        "sections": [
            {
                "id": 0,
                "course": 0,
                "teachers": [0, 2],
                "estimatedClassSize": 8,
                "maxClassSize": 10,
                "requiredResources": [0]
            },
            {
                "id": 1,
                "course": 1,
                "teachers": [1],
                "estimatedClassSize": 30,
                "maxClassSize": 40
            },
            {
                "id": 2,
                "course": 2,
                "teachers": [0],
                "estimatedClassSize": 15,
                "maxClassSize": 20
            },
            {
                "id": 3,
                "course": 3,
                "teachers": [2],
                "estimatedClassSize": 10,
                "maxClassSize": 20,
                "periodLength": 2
            }
        ]
    });

    let program = load_program_from_json(input, CacheConfig::default()).unwrap();

    TestData {
        program,
        alice: TeacherIdx::from(0),
        bob: TeacherIdx::from(1),
        carol: TeacherIdx::from(2),
        max_science: SectionIdx::from(0),
        pirates: SectionIdx::from(1),
        pi_rates: SectionIdx::from(2),
        marathon: SectionIdx::from(3),
        harper130: RoomIdx::from(0),
        harper135: RoomIdx::from(1),
        period0: PeriodIdx::from(0),
        period1: PeriodIdx::from(1),
        chalkboard: ResourceIdx::from(0),
        science: CourseIdx::from(0),
    }
}
