
use model::base_types::SectionIdx;

use crate::assignment::{PresentAssignment, StartAssignment};
use crate::Schedule;

use std::collections::BTreeSet;
use std::fmt;

/// Whether a violation concerns the candidate assignment alone or its interaction
/// with other currently-present assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Local,
    Global,
}

/// One discovered constraint violation, tagged with the assignments it conflicts
/// with (empty for local violations) and a human-readable constraint description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    scope: Scope,
    assignment: PresentAssignment,
    conflicts: Vec<PresentAssignment>,
    description: &'static str,
}

impl Violation {
    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn assignment(&self) -> &PresentAssignment {
        &self.assignment
    }

    pub fn conflicts(&self) -> &[PresentAssignment] {
        &self.conflicts
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.assignment, self.description)?;
        for conflict in &self.conflicts {
            write!(f, " (conflicts with {})", conflict)?;
        }
        Ok(())
    }
}

/// Accumulates the violations discovered by a chain of checkers. The validator only
/// records; accepting or rejecting a candidate is the optimizer's business.
#[derive(Debug, Default)]
pub struct ScheduleValidator {
    violations: Vec<Violation>,
}

impl ScheduleValidator {
    pub fn new() -> ScheduleValidator {
        ScheduleValidator::default()
    }

    /// Records a local violation unless the condition holds.
    pub fn validate_local(
        &mut self,
        assignment: &PresentAssignment,
        satisfied: bool,
        description: &'static str,
    ) {
        if !satisfied {
            self.violations.push(Violation {
                scope: Scope::Local,
                assignment: *assignment,
                conflicts: Vec::new(),
                description,
            });
        }
    }

    /// Records a global violation unless the conflict set is empty.
    pub fn validate_global(
        &mut self,
        assignment: &PresentAssignment,
        conflicts: Vec<PresentAssignment>,
        description: &'static str,
    ) {
        if !conflicts.is_empty() {
            self.violations.push(Violation {
                scope: Scope::Global,
                assignment: *assignment,
                conflicts,
                description,
            });
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// One polymorphic constraint checker. Checkers are composed as an ordered
/// collection (see [`CompositeLogic`]), not by delegation through inheritance.
pub trait ScheduleLogic: Send + Sync {
    fn validate(
        &self,
        validator: &mut ScheduleValidator,
        schedule: &Schedule,
        assignment: &PresentAssignment,
    );
}

/// The room must be available during the assignment's period.
pub struct RoomAvailableLogic;

impl ScheduleLogic for RoomAvailableLogic {
    fn validate(
        &self,
        validator: &mut ScheduleValidator,
        schedule: &Schedule,
        assignment: &PresentAssignment,
    ) {
        let available = schedule
            .program()
            .compatible_periods_of_room(assignment.room())
            .contains(&assignment.period());
        validator.validate_local(
            assignment,
            available,
            "Rooms must be available during their assignments",
        );
    }
}

/// The room must hold the section's estimated attendance.
pub struct RoomCapacityLogic;

impl ScheduleLogic for RoomCapacityLogic {
    fn validate(
        &self,
        validator: &mut ScheduleValidator,
        schedule: &Schedule,
        assignment: &PresentAssignment,
    ) {
        let program = schedule.program();
        let estimated = program
            .get_section(assignment.section())
            .expect("assignment references the schedule's program")
            .estimated_class_size();
        let capacity = program
            .get_room(assignment.room())
            .expect("assignment references the schedule's program")
            .capacity();
        validator.validate_local(
            assignment,
            estimated <= capacity,
            "Rooms must hold the estimated class size",
        );
    }
}

/// All teachers of the section must be free during the assignment's period.
pub struct CoursePeriodLogic;

impl ScheduleLogic for CoursePeriodLogic {
    fn validate(
        &self,
        validator: &mut ScheduleValidator,
        schedule: &Schedule,
        assignment: &PresentAssignment,
    ) {
        let compatible = schedule
            .program()
            .compatible_periods_of_section(assignment.section())
            .contains(&assignment.period());
        validator.validate_local(
            assignment,
            compatible,
            "All teachers of a section must be free during its periods",
        );
    }
}

/// Binding required resources must be present in the room.
pub struct BindingResourceLogic;

impl ScheduleLogic for BindingResourceLogic {
    fn validate(
        &self,
        validator: &mut ScheduleValidator,
        schedule: &Schedule,
        assignment: &PresentAssignment,
    ) {
        let program = schedule.program();
        let binding_offered = program.binding_resources_of_room(assignment.room());
        let satisfied = program
            .required_resources_of_section(assignment.section())
            .iter()
            .filter(|resource| {
                program
                    .get_resource(**resource)
                    .expect("assignment references the schedule's program")
                    .is_binding()
            })
            .all(|resource| binding_offered.contains(resource));
        validator.validate_local(
            assignment,
            satisfied,
            "Rooms must offer all binding resources a section requires",
        );
    }
}

/// Teachers must not teach two sections at once.
pub struct TeacherConflictLogic;

impl ScheduleLogic for TeacherConflictLogic {
    fn validate(
        &self,
        validator: &mut ScheduleValidator,
        schedule: &Schedule,
        assignment: &PresentAssignment,
    ) {
        let program = schedule.program();
        // Collecting the sections taught by the same teachers once is cheaper than
        // going through every teacher who teaches during this period.
        let sections_taught_by_same: BTreeSet<SectionIdx> = program
            .teachers_of_section(assignment.section())
            .iter()
            .flat_map(|&teacher| program.sections_of_teacher(teacher))
            .collect();

        let conflicts: Vec<PresentAssignment> = schedule
            .occurring_at(assignment.period())
            .values()
            .filter(|occupant| occupant.section() != assignment.section())
            .filter(|occupant| sections_taught_by_same.contains(&occupant.section()))
            .copied()
            .collect();

        validator.validate_global(
            assignment,
            conflicts,
            "Teachers must not be assigned to teach more than one section at a time",
        );
    }
}

/// An ordered chain of checkers, invoked in a fixed, explicit order.
pub struct CompositeLogic {
    logics: Vec<Box<dyn ScheduleLogic>>,
}

impl CompositeLogic {
    pub fn new(logics: Vec<Box<dyn ScheduleLogic>>) -> CompositeLogic {
        CompositeLogic { logics }
    }

    /// The full standard constraint set: local checks first, then the global ones.
    pub fn standard() -> CompositeLogic {
        CompositeLogic::new(vec![
            Box::new(RoomAvailableLogic),
            Box::new(RoomCapacityLogic),
            Box::new(CoursePeriodLogic),
            Box::new(BindingResourceLogic),
            Box::new(TeacherConflictLogic),
        ])
    }

    /// Validates every period-slice of a placement against the whole chain.
    pub fn validate_start_assignment(
        &self,
        schedule: &Schedule,
        start: StartAssignment,
    ) -> ScheduleValidator {
        let mut validator = ScheduleValidator::new();
        for present in schedule.present_assignments_of(start) {
            self.validate(&mut validator, schedule, &present);
        }
        validator
    }
}

impl ScheduleLogic for CompositeLogic {
    fn validate(
        &self,
        validator: &mut ScheduleValidator,
        schedule: &Schedule,
        assignment: &PresentAssignment,
    ) {
        for logic in &self.logics {
            logic.validate(validator, schedule, assignment);
        }
    }
}
