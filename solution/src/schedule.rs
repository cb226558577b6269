#[cfg(test)]
mod tests;

use im::HashMap;
use im::OrdMap;
use itertools::Itertools;
use thiserror::Error;

use model::base_types::{PeriodIdx, RoomIdx, SectionIdx};
use model::program::Program;

use crate::assignment::{PresentAssignment, StartAssignment};

use std::fmt;
use std::sync::Arc;

/// Structural placement failures. All variants are expected, recoverable control flow
/// for the perturbers: try a different edit instead of aborting the search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("{room} is already occupied at {period} by {occupant}")]
    Conflict {
        room: RoomIdx,
        period: PeriodIdx,
        occupant: SectionIdx,
    },

    #[error("{section} is already placed")]
    AlreadyPlaced { section: SectionIdx },

    #[error("{section} starting at {start_period} runs past the end of its time block")]
    SpanExceedsBlock {
        section: SectionIdx,
        start_period: PeriodIdx,
    },

    #[error("{section} is not placed as assumed")]
    NotPlaced { section: SectionIdx },
}

/// One candidate assignment of sections to rooms and periods over a fixed program.
///
/// A schedule is an immutable object: `place` and `remove` return a modified copy and
/// leave `self` untouched, so older schedules the optimizer may revert to are never
/// affected. The im-maps make those copies cheap.
#[derive(Clone)]
pub struct Schedule {
    // the top-level placements, one per placed section
    start_assignments: OrdMap<SectionIdx, StartAssignment>,

    // per period, the room occupancy expanded from the start assignments; every
    // period of the program has an entry
    occupancy: OrdMap<PeriodIdx, HashMap<RoomIdx, PresentAssignment>>,

    program: Arc<Program>,
}

// basic methods
impl Schedule {
    pub fn empty(program: Arc<Program>) -> Schedule {
        let occupancy = program
            .periods()
            .map(|period| (period.idx(), HashMap::new()))
            .collect();
        Schedule {
            start_assignments: OrdMap::new(),
            occupancy,
            program,
        }
    }

    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    pub fn number_of_placed_sections(&self) -> usize {
        self.start_assignments.len()
    }

    pub fn is_placed(&self, section: SectionIdx) -> bool {
        self.start_assignments.contains_key(&section)
    }

    pub fn start_assignment_of(&self, section: SectionIdx) -> Option<&StartAssignment> {
        self.start_assignments.get(&section)
    }

    /// All top-level placements in section order.
    pub fn start_assignments(&self) -> impl Iterator<Item = &StartAssignment> {
        self.start_assignments.values()
    }

    /// The room occupancy during the given period.
    pub fn occurring_at(&self, period: PeriodIdx) -> &HashMap<RoomIdx, PresentAssignment> {
        self.occupancy.get(&period).unwrap()
    }

    /// All period-slices of all placements.
    pub fn present_assignments(&self) -> impl Iterator<Item = &PresentAssignment> {
        self.occupancy.values().flat_map(|rooms| rooms.values())
    }

    /// The period-slices a start assignment expands to.
    pub fn present_assignments_of(&self, start: StartAssignment) -> Vec<PresentAssignment> {
        let length = self
            .program
            .get_section(start.section())
            .expect("section must belong to the schedule's program")
            .period_length();
        self.program
            .span_from(start.start_period(), length)
            .map(|span| {
                span.into_iter()
                    .map(|period| {
                        PresentAssignment::new(
                            start.section(),
                            start.room(),
                            period,
                            start.start_period(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

// modifications
impl Schedule {
    /// Places a section at a room starting at a period, expanding the meeting over
    /// the section's span of consecutive periods.
    ///
    /// Only structural exclusivity is enforced here (one occupant per room and
    /// period, one placement per section); all other constraint checks are the
    /// business of the validation logic and the perturbers.
    pub fn place(
        &self,
        section: SectionIdx,
        room: RoomIdx,
        start_period: PeriodIdx,
    ) -> Result<Schedule, ScheduleError> {
        if self.start_assignments.contains_key(&section) {
            return Err(ScheduleError::AlreadyPlaced { section });
        }

        let length = self
            .program
            .get_section(section)
            .expect("section must belong to the schedule's program")
            .period_length();
        let span = self
            .program
            .span_from(start_period, length)
            .ok_or(ScheduleError::SpanExceedsBlock {
                section,
                start_period,
            })?;

        for &period in &span {
            if let Some(occupant) = self.occupancy.get(&period).unwrap().get(&room) {
                return Err(ScheduleError::Conflict {
                    room,
                    period,
                    occupant: occupant.section(),
                });
            }
        }

        let mut start_assignments = self.start_assignments.clone();
        let mut occupancy = self.occupancy.clone();
        start_assignments.insert(section, StartAssignment::new(section, room, start_period));
        for &period in &span {
            let rooms = occupancy.get_mut(&period).unwrap();
            rooms.insert(
                room,
                PresentAssignment::new(section, room, period, start_period),
            );
        }

        Ok(Schedule {
            start_assignments,
            occupancy,
            program: self.program.clone(),
        })
    }

    /// Clears a placement and all period-slices derived from it.
    pub fn remove(&self, start: StartAssignment) -> Result<Schedule, ScheduleError> {
        match self.start_assignments.get(&start.section()) {
            Some(recorded) if *recorded == start => {}
            _ => {
                return Err(ScheduleError::NotPlaced {
                    section: start.section(),
                })
            }
        }

        let mut start_assignments = self.start_assignments.clone();
        let mut occupancy = self.occupancy.clone();
        start_assignments.remove(&start.section());
        for present in self.present_assignments_of(start) {
            occupancy.get_mut(&present.period()).unwrap().remove(&present.room());
        }

        Ok(Schedule {
            start_assignments,
            occupancy,
            program: self.program.clone(),
        })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "** schedule with {} placed sections:",
            self.start_assignments.len()
        )?;
        for period in self.occupancy.keys().sorted() {
            let rooms = self.occupancy.get(period).unwrap();
            let occupants = rooms
                .values()
                .sorted()
                .map(|present| format!("{} in {}", present.section(), present.room()))
                .join(", ");
            writeln!(f, "\t{}: {}", period, occupants)?;
        }
        Ok(())
    }
}
