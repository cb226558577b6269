use crate::base_types::{
    ClassSize, CourseIdx, PeriodCount, PeriodIdx, ResourceIdx, RoomIdx, SectionIdx, SubjectIdx,
    TeacherIdx, TimeBlockIdx,
};

/// A person who can teach, with the periods they are available.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Teacher {
    idx: TeacherIdx,
    name: String,
    available_periods: Vec<PeriodIdx>,
}

impl Teacher {
    pub fn new(idx: TeacherIdx, name: String, available_periods: Vec<PeriodIdx>) -> Teacher {
        Teacher {
            idx,
            name,
            available_periods,
        }
    }

    pub fn idx(&self) -> TeacherIdx {
        self.idx
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn available_periods(&self) -> &Vec<PeriodIdx> {
        &self.available_periods
    }
}

/// A topic category classifying courses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject {
    idx: SubjectIdx,
    name: String,
}

impl Subject {
    pub fn new(idx: SubjectIdx, name: String) -> Subject {
        Subject { idx, name }
    }

    pub fn idx(&self) -> SubjectIdx {
        self.idx
    }

    pub fn name(&self) -> &String {
        &self.name
    }
}

/// A logical offering; its meetings are the sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Course {
    idx: CourseIdx,
    title: String,
    subject: SubjectIdx,
}

impl Course {
    pub fn new(idx: CourseIdx, title: String, subject: SubjectIdx) -> Course {
        Course {
            idx,
            title,
            subject,
        }
    }

    pub fn idx(&self) -> CourseIdx {
        self.idx
    }

    pub fn title(&self) -> &String {
        &self.title
    }

    pub fn subject(&self) -> SubjectIdx {
        self.subject
    }
}

/// One meeting instance of a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Section {
    idx: SectionIdx,
    course: CourseIdx,
    teachers: Vec<TeacherIdx>,
    estimated_class_size: ClassSize,
    max_class_size: ClassSize,
    period_length: PeriodCount,
    required_resources: Vec<ResourceIdx>,
    prerequisites: Vec<CourseIdx>,
}

impl Section {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        idx: SectionIdx,
        course: CourseIdx,
        teachers: Vec<TeacherIdx>,
        estimated_class_size: ClassSize,
        max_class_size: ClassSize,
        period_length: PeriodCount,
        required_resources: Vec<ResourceIdx>,
        prerequisites: Vec<CourseIdx>,
    ) -> Section {
        Section {
            idx,
            course,
            teachers,
            estimated_class_size,
            max_class_size,
            period_length,
            required_resources,
            prerequisites,
        }
    }

    pub fn idx(&self) -> SectionIdx {
        self.idx
    }

    pub fn course(&self) -> CourseIdx {
        self.course
    }

    pub fn teachers(&self) -> &Vec<TeacherIdx> {
        &self.teachers
    }

    pub fn estimated_class_size(&self) -> ClassSize {
        self.estimated_class_size
    }

    pub fn max_class_size(&self) -> ClassSize {
        self.max_class_size
    }

    /// Number of consecutive periods one meeting of this section occupies.
    pub fn period_length(&self) -> PeriodCount {
        self.period_length
    }

    pub fn required_resources(&self) -> &Vec<ResourceIdx> {
        &self.required_resources
    }

    pub fn prerequisites(&self) -> &Vec<CourseIdx> {
        &self.prerequisites
    }
}

/// A physical space that can host sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Room {
    idx: RoomIdx,
    name: String,
    capacity: ClassSize,
    available_periods: Vec<PeriodIdx>,
    resources: Vec<ResourceIdx>,
}

impl Room {
    pub fn new(
        idx: RoomIdx,
        name: String,
        capacity: ClassSize,
        available_periods: Vec<PeriodIdx>,
        resources: Vec<ResourceIdx>,
    ) -> Room {
        Room {
            idx,
            name,
            capacity,
            available_periods,
            resources,
        }
    }

    pub fn idx(&self) -> RoomIdx {
        self.idx
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn capacity(&self) -> ClassSize {
        self.capacity
    }

    pub fn available_periods(&self) -> &Vec<PeriodIdx> {
        &self.available_periods
    }

    pub fn resources(&self) -> &Vec<ResourceIdx> {
        &self.resources
    }
}

/// A contiguous span of the day holding an ordered run of class periods.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeBlock {
    idx: TimeBlockIdx,
    description: String,
    periods: Vec<PeriodIdx>,
}

impl TimeBlock {
    pub fn new(idx: TimeBlockIdx, description: String, periods: Vec<PeriodIdx>) -> TimeBlock {
        TimeBlock {
            idx,
            description,
            periods,
        }
    }

    pub fn idx(&self) -> TimeBlockIdx {
        self.idx
    }

    pub fn description(&self) -> &String {
        &self.description
    }

    /// Periods in day order.
    pub fn periods(&self) -> &Vec<PeriodIdx> {
        &self.periods
    }
}

/// An atomic schedulable slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPeriod {
    idx: PeriodIdx,
    description: String,
    block: TimeBlockIdx,
    attendance_level: f64,
}

impl ClassPeriod {
    pub fn new(
        idx: PeriodIdx,
        description: String,
        block: TimeBlockIdx,
        attendance_level: f64,
    ) -> ClassPeriod {
        ClassPeriod {
            idx,
            description,
            block,
            attendance_level,
        }
    }

    pub fn idx(&self) -> PeriodIdx {
        self.idx
    }

    pub fn description(&self) -> &String {
        &self.description
    }

    pub fn block(&self) -> TimeBlockIdx {
        self.block
    }

    /// Relative expected attendance during this period.
    pub fn attendance_level(&self) -> f64 {
        self.attendance_level
    }
}

/// Equipment or property a room may offer. Binding resources are hard requirements;
/// non-binding ones are preferences.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    idx: ResourceIdx,
    description: String,
    is_binding: bool,
}

impl Resource {
    pub fn new(idx: ResourceIdx, description: String, is_binding: bool) -> Resource {
        Resource {
            idx,
            description,
            is_binding,
        }
    }

    pub fn idx(&self) -> ResourceIdx {
        self.idx
    }

    pub fn description(&self) -> &String {
        &self.description
    }

    pub fn is_binding(&self) -> bool {
        self.is_binding
    }
}
