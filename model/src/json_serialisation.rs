#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::base_types::{ClassSize, Idx, PeriodCount};
use crate::config::CacheConfig;
use crate::errors::ModelError;
use crate::program::entities::{
    ClassPeriod, Course, Resource, Room, Section, Subject, Teacher, TimeBlock,
};
use crate::program::{Program, ProgramData};

use std::sync::Arc;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonSubject {
    id: Idx,
    name: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonTeacher {
    id: Idx,
    name: String,
    available_periods: Vec<Idx>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonResource {
    id: Idx,
    description: String,
    is_binding: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonPeriod {
    id: Idx,
    description: String,
    #[serde(default = "default_attendance_level")]
    attendance_level: f64,
}

fn default_attendance_level() -> f64 {
    1.0
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonTimeBlock {
    id: Idx,
    description: String,
    periods: Vec<JsonPeriod>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonRoom {
    id: Idx,
    name: String,
    capacity: ClassSize,
    available_periods: Vec<Idx>,
    #[serde(default)]
    resources: Vec<Idx>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonCourse {
    id: Idx,
    title: String,
    subject: Idx,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonSection {
    id: Idx,
    course: Idx,
    teachers: Vec<Idx>,
    estimated_class_size: ClassSize,
    max_class_size: ClassSize,
    #[serde(default = "default_period_length")]
    period_length: PeriodCount,
    #[serde(default)]
    required_resources: Vec<Idx>,
    #[serde(default)]
    prerequisites: Vec<Idx>,
}

fn default_period_length() -> PeriodCount {
    1
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonInput {
    #[serde(default)]
    name: String,
    subjects: Vec<JsonSubject>,
    teachers: Vec<JsonTeacher>,
    #[serde(default)]
    resources: Vec<JsonResource>,
    time_blocks: Vec<JsonTimeBlock>,
    rooms: Vec<JsonRoom>,
    courses: Vec<JsonCourse>,
    sections: Vec<JsonSection>,
}

/// Builds the domain graph from a program description in JSON form. This is the sole
/// ingestion point; all referential-integrity checks of [`Program::new`] apply.
pub fn load_program_from_json(
    json_input: serde_json::Value,
    cache_config: CacheConfig,
) -> Result<Arc<Program>, ModelError> {
    let json_input: JsonInput =
        serde_json::from_value(json_input).map_err(|e| ModelError::Parse(e.to_string()))?;

    let mut periods = Vec::new();
    let mut time_blocks = Vec::new();
    for block in &json_input.time_blocks {
        for period in &block.periods {
            periods.push(ClassPeriod::new(
                period.id.into(),
                period.description.clone(),
                block.id.into(),
                period.attendance_level,
            ));
        }
        time_blocks.push(TimeBlock::new(
            block.id.into(),
            block.description.clone(),
            block.periods.iter().map(|p| p.id.into()).collect(),
        ));
    }

    let data = ProgramData {
        name: json_input.name,
        subjects: json_input
            .subjects
            .into_iter()
            .map(|s| Subject::new(s.id.into(), s.name))
            .collect(),
        teachers: json_input
            .teachers
            .into_iter()
            .map(|t| {
                Teacher::new(
                    t.id.into(),
                    t.name,
                    t.available_periods.into_iter().map(Into::into).collect(),
                )
            })
            .collect(),
        courses: json_input
            .courses
            .into_iter()
            .map(|c| Course::new(c.id.into(), c.title, c.subject.into()))
            .collect(),
        sections: json_input
            .sections
            .into_iter()
            .map(|s| {
                Section::new(
                    s.id.into(),
                    s.course.into(),
                    s.teachers.into_iter().map(Into::into).collect(),
                    s.estimated_class_size,
                    s.max_class_size,
                    s.period_length,
                    s.required_resources.into_iter().map(Into::into).collect(),
                    s.prerequisites.into_iter().map(Into::into).collect(),
                )
            })
            .collect(),
        rooms: json_input
            .rooms
            .into_iter()
            .map(|r| {
                Room::new(
                    r.id.into(),
                    r.name,
                    r.capacity,
                    r.available_periods.into_iter().map(Into::into).collect(),
                    r.resources.into_iter().map(Into::into).collect(),
                )
            })
            .collect(),
        time_blocks,
        periods,
        resources: json_input
            .resources
            .into_iter()
            .map(|r| Resource::new(r.id.into(), r.description, r.is_binding))
            .collect(),
    };

    Ok(Arc::new(Program::new(data, cache_config)?))
}

/// Inverse of [`load_program_from_json`]: serialises the graph back into the same
/// JSON shape, reproducing the entity sets up to ordering.
pub fn program_to_json(program: &Program) -> serde_json::Value {
    let json_input = JsonInput {
        name: program.name().clone(),
        subjects: program
            .subjects()
            .map(|s| JsonSubject {
                id: s.idx().0,
                name: s.name().clone(),
            })
            .collect(),
        teachers: program
            .teachers()
            .map(|t| JsonTeacher {
                id: t.idx().0,
                name: t.name().clone(),
                available_periods: t.available_periods().iter().map(|p| p.0).collect(),
            })
            .collect(),
        resources: program
            .resources()
            .map(|r| JsonResource {
                id: r.idx().0,
                description: r.description().clone(),
                is_binding: r.is_binding(),
            })
            .collect(),
        time_blocks: program
            .time_blocks()
            .map(|block| JsonTimeBlock {
                id: block.idx().0,
                description: block.description().clone(),
                periods: block
                    .periods()
                    .iter()
                    .map(|&period| {
                        let period = program.get_period(period).unwrap();
                        JsonPeriod {
                            id: period.idx().0,
                            description: period.description().clone(),
                            attendance_level: period.attendance_level(),
                        }
                    })
                    .collect(),
            })
            .collect(),
        rooms: program
            .rooms()
            .map(|r| JsonRoom {
                id: r.idx().0,
                name: r.name().clone(),
                capacity: r.capacity(),
                available_periods: r.available_periods().iter().map(|p| p.0).collect(),
                resources: r.resources().iter().map(|res| res.0).collect(),
            })
            .collect(),
        courses: program
            .courses()
            .map(|c| JsonCourse {
                id: c.idx().0,
                title: c.title().clone(),
                subject: c.subject().0,
            })
            .collect(),
        sections: program
            .sections()
            .map(|s| JsonSection {
                id: s.idx().0,
                course: s.course().0,
                teachers: s.teachers().iter().map(|t| t.0).collect(),
                estimated_class_size: s.estimated_class_size(),
                max_class_size: s.max_class_size(),
                period_length: s.period_length(),
                required_resources: s.required_resources().iter().map(|r| r.0).collect(),
                prerequisites: s.prerequisites().iter().map(|c| c.0).collect(),
            })
            .collect(),
    };

    serde_json::to_value(json_input).expect("program serialisation cannot fail")
}
