pub mod entities;
#[cfg(test)]
mod tests;

use entities::{ClassPeriod, Course, Resource, Room, Section, Subject, Teacher, TimeBlock};

use crate::base_types::{
    CourseIdx, PeriodCount, PeriodIdx, ResourceIdx, RoomIdx, SectionIdx, SubjectIdx, TeacherIdx,
    TimeBlockIdx,
};
use crate::caches::RelationCache;
use crate::config::CacheConfig;
use crate::errors::ModelError;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// All entities of one program description, as handed to [`Program::new`].
///
/// The time blocks reference the declared periods and each period names its block;
/// construction checks that the two views agree.
pub struct ProgramData {
    pub name: String,
    pub subjects: Vec<Subject>,
    pub teachers: Vec<Teacher>,
    pub courses: Vec<Course>,
    pub sections: Vec<Section>,
    pub rooms: Vec<Room>,
    pub time_blocks: Vec<TimeBlock>,
    pub periods: Vec<ClassPeriod>,
    pub resources: Vec<Resource>,
}

#[derive(Debug)]
struct ProgramCaches {
    teacher_periods: RelationCache<TeacherIdx, PeriodIdx>,
    room_periods: RelationCache<RoomIdx, PeriodIdx>,
    course_periods: RelationCache<CourseIdx, PeriodIdx>,
    course_teachers: RelationCache<CourseIdx, TeacherIdx>,
    required_resources: RelationCache<SectionIdx, ResourceIdx>,
    room_resources: RelationCache<RoomIdx, ResourceIdx>,
    binding_resources: RelationCache<RoomIdx, ResourceIdx>,
    prerequisites: RelationCache<SectionIdx, CourseIdx>,
}

impl ProgramCaches {
    fn new(config: &CacheConfig) -> ProgramCaches {
        let level = config.concurrency_level;
        ProgramCaches {
            teacher_periods: RelationCache::new(config.teacher_periods_cache_size, level),
            room_periods: RelationCache::new(config.room_periods_cache_size, level),
            course_periods: RelationCache::new(config.course_periods_cache_size, level),
            course_teachers: RelationCache::new(config.course_teachers_cache_size, level),
            required_resources: RelationCache::new(config.required_resources_cache_size, level),
            room_resources: RelationCache::new(config.room_resources_cache_size, level),
            binding_resources: RelationCache::new(config.binding_resources_cache_size, level),
            prerequisites: RelationCache::new(config.prerequisites_cache_size, level),
        }
    }
}

/// The immutable domain graph of one program: all entities keyed by their idx, the
/// raw cross references derived from the sections, and the derived-relation caches.
///
/// A program either exists fully valid or not at all: `new` checks every referential
/// integrity invariant eagerly and fails with a descriptive [`ModelError`] otherwise.
#[derive(Debug)]
pub struct Program {
    name: String,
    teachers: BTreeMap<TeacherIdx, Teacher>,
    subjects: BTreeMap<SubjectIdx, Subject>,
    courses: BTreeMap<CourseIdx, Course>,
    sections: BTreeMap<SectionIdx, Section>,
    rooms: BTreeMap<RoomIdx, Room>,
    time_blocks: BTreeMap<TimeBlockIdx, TimeBlock>,
    periods: BTreeMap<PeriodIdx, ClassPeriod>,
    resources: BTreeMap<ResourceIdx, Resource>,

    sections_of_course: BTreeMap<CourseIdx, BTreeSet<SectionIdx>>,
    courses_of_teacher: BTreeMap<TeacherIdx, BTreeSet<CourseIdx>>,

    total_attendance_level: f64,

    caches: ProgramCaches,
}

// construction
impl Program {
    pub fn new(data: ProgramData, cache_config: CacheConfig) -> Result<Program, ModelError> {
        let subjects = keyed_by_idx(data.subjects, Subject::idx, "subject")?;
        let teachers = keyed_by_idx(data.teachers, Teacher::idx, "teacher")?;
        let courses = keyed_by_idx(data.courses, Course::idx, "course")?;
        let sections = keyed_by_idx(data.sections, Section::idx, "section")?;
        let rooms = keyed_by_idx(data.rooms, Room::idx, "room")?;
        let time_blocks = keyed_by_idx(data.time_blocks, TimeBlock::idx, "time block")?;
        let periods = keyed_by_idx(data.periods, ClassPeriod::idx, "period")?;
        let resources = keyed_by_idx(data.resources, Resource::idx, "resource")?;

        let mut sections_of_course: BTreeMap<CourseIdx, BTreeSet<SectionIdx>> = BTreeMap::new();
        let mut courses_of_teacher: BTreeMap<TeacherIdx, BTreeSet<CourseIdx>> = BTreeMap::new();
        for section in sections.values() {
            sections_of_course
                .entry(section.course())
                .or_default()
                .insert(section.idx());
            for &teacher in section.teachers() {
                courses_of_teacher
                    .entry(teacher)
                    .or_default()
                    .insert(section.course());
            }
        }

        let total_attendance_level = periods.values().map(ClassPeriod::attendance_level).sum();

        let program = Program {
            name: data.name,
            teachers,
            subjects,
            courses,
            sections,
            rooms,
            time_blocks,
            periods,
            resources,
            sections_of_course,
            courses_of_teacher,
            total_attendance_level,
            caches: ProgramCaches::new(&cache_config),
        };

        program.check_time_blocks_valid()?;
        program.check_teachers_valid()?;
        program.check_sections_valid()?;
        program.check_rooms_valid()?;

        Ok(program)
    }

    fn check_time_blocks_valid(&self) -> Result<(), ModelError> {
        for block in self.time_blocks.values() {
            for &period in block.periods() {
                let class_period = self.periods.get(&period).ok_or_else(|| {
                    ModelError::integrity(
                        format!("time block {}", block.idx()),
                        format!("references nonexistent period {}", period),
                    )
                })?;
                if class_period.block() != block.idx() {
                    return Err(ModelError::integrity(
                        format!("period {}", period),
                        format!(
                            "declares block {} but is listed in block {}",
                            class_period.block(),
                            block.idx()
                        ),
                    ));
                }
            }
        }
        for period in self.periods.values() {
            let block = self.time_blocks.get(&period.block()).ok_or_else(|| {
                ModelError::integrity(
                    format!("period {}", period.idx()),
                    format!("references nonexistent time block {}", period.block()),
                )
            })?;
            if !block.periods().contains(&period.idx()) {
                return Err(ModelError::integrity(
                    format!("period {}", period.idx()),
                    format!("is missing from the period list of block {}", block.idx()),
                ));
            }
        }
        Ok(())
    }

    fn check_teachers_valid(&self) -> Result<(), ModelError> {
        for teacher in self.teachers.values() {
            for &period in teacher.available_periods() {
                if !self.periods.contains_key(&period) {
                    return Err(ModelError::integrity(
                        format!("teacher {} ({})", teacher.idx(), teacher.name()),
                        format!("claims to be available at nonexistent period {}", period),
                    ));
                }
            }
        }
        Ok(())
    }

    fn check_sections_valid(&self) -> Result<(), ModelError> {
        for course in self.courses.values() {
            if !self.subjects.contains_key(&course.subject()) {
                return Err(ModelError::integrity(
                    format!("course {} ({})", course.idx(), course.title()),
                    format!("references nonexistent subject {}", course.subject()),
                ));
            }
        }
        for section in self.sections.values() {
            let entity = format!("section {}", section.idx());
            if !self.courses.contains_key(&section.course()) {
                return Err(ModelError::integrity(
                    entity,
                    format!("references nonexistent course {}", section.course()),
                ));
            }
            if section.estimated_class_size() > section.max_class_size() {
                return Err(ModelError::integrity(
                    entity,
                    format!(
                        "has estimated class size {} > max class size {}",
                        section.estimated_class_size(),
                        section.max_class_size()
                    ),
                ));
            }
            if section.teachers().is_empty() {
                return Err(ModelError::integrity(entity, "has no teachers"));
            }
            if section.period_length() == 0 {
                return Err(ModelError::integrity(entity, "has period length 0"));
            }
            for &teacher in section.teachers() {
                if !self.teachers.contains_key(&teacher) {
                    return Err(ModelError::integrity(
                        entity,
                        format!("references nonexistent teacher {}", teacher),
                    ));
                }
            }
            for &resource in section.required_resources() {
                if !self.resources.contains_key(&resource) {
                    return Err(ModelError::integrity(
                        entity,
                        format!("requires nonexistent resource {}", resource),
                    ));
                }
            }
            for &prerequisite in section.prerequisites() {
                if !self.courses.contains_key(&prerequisite) {
                    return Err(ModelError::integrity(
                        entity,
                        format!("references nonexistent prerequisite course {}", prerequisite),
                    ));
                }
            }
        }
        Ok(())
    }

    fn check_rooms_valid(&self) -> Result<(), ModelError> {
        for room in self.rooms.values() {
            let entity = format!("room {} ({})", room.idx(), room.name());
            for &period in room.available_periods() {
                if !self.periods.contains_key(&period) {
                    return Err(ModelError::integrity(
                        entity.clone(),
                        format!("claims to be available at nonexistent period {}", period),
                    ));
                }
            }
            for &resource in room.resources() {
                if !self.resources.contains_key(&resource) {
                    return Err(ModelError::integrity(
                        entity.clone(),
                        format!("offers nonexistent resource {}", resource),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn keyed_by_idx<I: Ord + Copy + fmt::Display, T>(
    entities: Vec<T>,
    idx_of: impl Fn(&T) -> I,
    entity_type: &'static str,
) -> Result<BTreeMap<I, T>, ModelError> {
    let mut map = BTreeMap::new();
    for entity in entities {
        let idx = idx_of(&entity);
        if map.insert(idx, entity).is_some() {
            return Err(ModelError::integrity(
                format!("{} {}", entity_type, idx),
                "is declared twice",
            ));
        }
    }
    Ok(map)
}

// accessors
impl Program {
    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn get_teacher(&self, idx: TeacherIdx) -> Result<&Teacher, ModelError> {
        self.teachers
            .get(&idx)
            .ok_or_else(|| ModelError::not_found("teacher", idx))
    }

    pub fn get_subject(&self, idx: SubjectIdx) -> Result<&Subject, ModelError> {
        self.subjects
            .get(&idx)
            .ok_or_else(|| ModelError::not_found("subject", idx))
    }

    pub fn get_course(&self, idx: CourseIdx) -> Result<&Course, ModelError> {
        self.courses
            .get(&idx)
            .ok_or_else(|| ModelError::not_found("course", idx))
    }

    pub fn get_section(&self, idx: SectionIdx) -> Result<&Section, ModelError> {
        self.sections
            .get(&idx)
            .ok_or_else(|| ModelError::not_found("section", idx))
    }

    pub fn get_room(&self, idx: RoomIdx) -> Result<&Room, ModelError> {
        self.rooms
            .get(&idx)
            .ok_or_else(|| ModelError::not_found("room", idx))
    }

    pub fn get_time_block(&self, idx: TimeBlockIdx) -> Result<&TimeBlock, ModelError> {
        self.time_blocks
            .get(&idx)
            .ok_or_else(|| ModelError::not_found("time block", idx))
    }

    pub fn get_period(&self, idx: PeriodIdx) -> Result<&ClassPeriod, ModelError> {
        self.periods
            .get(&idx)
            .ok_or_else(|| ModelError::not_found("period", idx))
    }

    pub fn get_resource(&self, idx: ResourceIdx) -> Result<&Resource, ModelError> {
        self.resources
            .get(&idx)
            .ok_or_else(|| ModelError::not_found("resource", idx))
    }

    pub fn teachers(&self) -> impl Iterator<Item = &Teacher> {
        self.teachers.values()
    }

    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.values()
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn time_blocks(&self) -> impl Iterator<Item = &TimeBlock> {
        self.time_blocks.values()
    }

    pub fn periods(&self) -> impl Iterator<Item = &ClassPeriod> {
        self.periods.values()
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    pub fn sections_of_course(&self, course: CourseIdx) -> impl Iterator<Item = SectionIdx> + '_ {
        self.sections_of_course
            .get(&course)
            .into_iter()
            .flatten()
            .copied()
    }

    pub fn courses_of_teacher(&self, teacher: TeacherIdx) -> impl Iterator<Item = CourseIdx> + '_ {
        self.courses_of_teacher
            .get(&teacher)
            .into_iter()
            .flatten()
            .copied()
    }

    pub fn sections_of_teacher(
        &self,
        teacher: TeacherIdx,
    ) -> impl Iterator<Item = SectionIdx> + '_ {
        self.courses_of_teacher(teacher)
            .flat_map(|course| self.sections_of_course(course))
    }

    /// Fraction of the day's total attendance-weight falling on this period.
    pub fn attendance_ratio(&self, period: PeriodIdx) -> f64 {
        if self.total_attendance_level <= 0.0 {
            return 0.0;
        }
        self.periods
            .get(&period)
            .map(|p| p.attendance_level() / self.total_attendance_level)
            .unwrap_or(0.0)
    }

    /// The run of `length` consecutive periods of one time block starting at
    /// `start_period`, or `None` if the block ends too early.
    pub fn span_from(&self, start_period: PeriodIdx, length: PeriodCount) -> Option<Vec<PeriodIdx>> {
        let period = self.periods.get(&start_period)?;
        let block = self.time_blocks.get(&period.block()).unwrap();
        let position = block.periods().iter().position(|&p| p == start_period)?;
        let span: Vec<PeriodIdx> = block
            .periods()
            .iter()
            .skip(position)
            .take(length as usize)
            .copied()
            .collect();
        if span.len() == length as usize {
            Some(span)
        } else {
            None
        }
    }
}

// cache-backed derived relations
impl Program {
    pub fn compatible_periods_of_teacher(&self, teacher: TeacherIdx) -> Arc<BTreeSet<PeriodIdx>> {
        self.caches.teacher_periods.get_or_load(teacher, || {
            self.teachers
                .get(&teacher)
                .expect("teacher was validated at construction")
                .available_periods()
                .iter()
                .copied()
                .collect()
        })
    }

    pub fn compatible_periods_of_room(&self, room: RoomIdx) -> Arc<BTreeSet<PeriodIdx>> {
        self.caches.room_periods.get_or_load(room, || {
            self.rooms
                .get(&room)
                .expect("room was validated at construction")
                .available_periods()
                .iter()
                .copied()
                .collect()
        })
    }

    /// Periods during which all teachers of the course are simultaneously free.
    pub fn compatible_periods_of_course(&self, course: CourseIdx) -> Arc<BTreeSet<PeriodIdx>> {
        self.caches.course_periods.get_or_load(course, || {
            let mut periods: BTreeSet<PeriodIdx> = self.periods.keys().copied().collect();
            for &teacher in self.teachers_of_course(course).iter() {
                let teacher_periods = self.compatible_periods_of_teacher(teacher);
                periods.retain(|period| teacher_periods.contains(period));
            }
            periods
        })
    }

    pub fn compatible_periods_of_section(&self, section: SectionIdx) -> Arc<BTreeSet<PeriodIdx>> {
        let course = self
            .sections
            .get(&section)
            .expect("section was validated at construction")
            .course();
        self.compatible_periods_of_course(course)
    }

    pub fn teachers_of_course(&self, course: CourseIdx) -> Arc<BTreeSet<TeacherIdx>> {
        self.caches.course_teachers.get_or_load(course, || {
            self.sections_of_course(course)
                .flat_map(|section| {
                    self.sections
                        .get(&section)
                        .expect("section was validated at construction")
                        .teachers()
                        .iter()
                        .copied()
                })
                .collect()
        })
    }

    pub fn teachers_of_section(&self, section: SectionIdx) -> Arc<BTreeSet<TeacherIdx>> {
        let course = self
            .sections
            .get(&section)
            .expect("section was validated at construction")
            .course();
        self.teachers_of_course(course)
    }

    pub fn required_resources_of_section(&self, section: SectionIdx) -> Arc<BTreeSet<ResourceIdx>> {
        self.caches.required_resources.get_or_load(section, || {
            self.sections
                .get(&section)
                .expect("section was validated at construction")
                .required_resources()
                .iter()
                .copied()
                .collect()
        })
    }

    pub fn resources_of_room(&self, room: RoomIdx) -> Arc<BTreeSet<ResourceIdx>> {
        self.caches.room_resources.get_or_load(room, || {
            self.rooms
                .get(&room)
                .expect("room was validated at construction")
                .resources()
                .iter()
                .copied()
                .collect()
        })
    }

    /// The room's resources restricted to binding ones.
    pub fn binding_resources_of_room(&self, room: RoomIdx) -> Arc<BTreeSet<ResourceIdx>> {
        self.caches.binding_resources.get_or_load(room, || {
            self.resources_of_room(room)
                .iter()
                .copied()
                .filter(|resource| {
                    self.resources
                        .get(resource)
                        .expect("resource was validated at construction")
                        .is_binding()
                })
                .collect()
        })
    }

    pub fn prerequisites_of_section(&self, section: SectionIdx) -> Arc<BTreeSet<CourseIdx>> {
        self.caches.prerequisites.get_or_load(section, || {
            self.sections
                .get(&section)
                .expect("section was validated at construction")
                .prerequisites()
                .iter()
                .copied()
                .collect()
        })
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.teachers == other.teachers
            && self.rooms == other.rooms
            && self.sections == other.sections
            && self.time_blocks == other.time_blocks
    }
}

impl Eq for Program {}

impl Hash for Program {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.teachers.hash(state);
        self.rooms.hash(state);
        self.sections.hash(state);
        self.time_blocks.hash(state);
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "** program {} with {} sections, {} teachers, {} rooms:",
            self.name,
            self.sections.len(),
            self.teachers.len(),
            self.rooms.len()
        )?;
        for block in self.time_blocks.values() {
            let periods = block
                .periods()
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "\t{}: {}", block.description(), periods)?;
        }
        Ok(())
    }
}
