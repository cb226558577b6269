
use rand::{Rng, RngCore};

use model::base_types::{PeriodIdx, RoomIdx, SectionIdx};
use solution::logic::CompositeLogic;
use solution::Schedule;

/// Produces a random neighbor of a schedule. Every returned schedule satisfies the
/// standard constraint chain for the edited placement; a structurally impossible or
/// constraint-violating edit is retried with a different random pick, never
/// returned. If no valid edit is found the input schedule is returned unchanged.
pub trait Perturber: Send + Sync {
    fn perturb(&self, schedule: &Schedule, rng: &mut dyn RngCore) -> Schedule;
}

const MAX_ATTEMPTS: usize = 64;

fn random_section(sections: &[SectionIdx], rng: &mut dyn RngCore) -> SectionIdx {
    sections[rng.random_range(0..sections.len())]
}

/// Tries to place the section at a uniformly drawn room and start period, keeping
/// the result only if the new placement passes the constraint chain.
fn try_place_randomly(
    schedule: &Schedule,
    section: SectionIdx,
    logic: &CompositeLogic,
    rng: &mut dyn RngCore,
) -> Option<Schedule> {
    let program = schedule.program();
    let rooms: Vec<RoomIdx> = program.rooms().map(|room| room.idx()).collect();
    let periods: Vec<PeriodIdx> = program.periods().map(|period| period.idx()).collect();

    let room = rooms[rng.random_range(0..rooms.len())];
    let start_period = periods[rng.random_range(0..periods.len())];

    let placed = schedule.place(section, room, start_period).ok()?;
    let start = *placed
        .start_assignment_of(section)
        .expect("section was just placed");
    if logic.validate_start_assignment(&placed, start).is_valid() {
        Some(placed)
    } else {
        None
    }
}

/// Picks an unplaced section and places it at a random valid slot.
pub struct RandomPlacer {
    logic: CompositeLogic,
}

impl RandomPlacer {
    pub fn new() -> RandomPlacer {
        RandomPlacer {
            logic: CompositeLogic::standard(),
        }
    }
}

impl Default for RandomPlacer {
    fn default() -> Self {
        RandomPlacer::new()
    }
}

impl Perturber for RandomPlacer {
    fn perturb(&self, schedule: &Schedule, rng: &mut dyn RngCore) -> Schedule {
        let unplaced: Vec<SectionIdx> = schedule
            .program()
            .sections()
            .map(|section| section.idx())
            .filter(|&section| !schedule.is_placed(section))
            .collect();
        if unplaced.is_empty() {
            return schedule.clone();
        }

        for _ in 0..MAX_ATTEMPTS {
            let section = random_section(&unplaced, rng);
            if let Some(placed) = try_place_randomly(schedule, section, &self.logic, rng) {
                return placed;
            }
        }
        schedule.clone()
    }
}

/// Picks a placed section and moves it to a different random valid slot. The section
/// stays placed: if no valid target slot is found the move is abandoned.
pub struct RandomMover {
    logic: CompositeLogic,
}

impl RandomMover {
    pub fn new() -> RandomMover {
        RandomMover {
            logic: CompositeLogic::standard(),
        }
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        RandomMover::new()
    }
}

impl Perturber for RandomMover {
    fn perturb(&self, schedule: &Schedule, rng: &mut dyn RngCore) -> Schedule {
        let placed: Vec<SectionIdx> = schedule
            .start_assignments()
            .map(|start| start.section())
            .collect();
        if placed.is_empty() {
            return schedule.clone();
        }

        for _ in 0..MAX_ATTEMPTS {
            let section = random_section(&placed, rng);
            let start = *schedule
                .start_assignment_of(section)
                .expect("section is recorded as placed");
            let removed = schedule
                .remove(start)
                .expect("recorded start assignment must be removable");
            if let Some(moved) = try_place_randomly(&removed, section, &self.logic, rng) {
                let new_start = moved
                    .start_assignment_of(section)
                    .expect("section was just placed");
                if *new_start != start {
                    return moved;
                }
            }
        }
        schedule.clone()
    }
}
