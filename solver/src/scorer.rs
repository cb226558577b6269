
use solution::Schedule;

use std::collections::BTreeSet;

/// Maps a schedule to the score the optimizer maximizes. Scorers only read the
/// schedule; constraint violations are not their business.
pub trait Scorer: Send + Sync {
    fn score(&self, schedule: &Schedule) -> f64;
}

/// Counts the distinct courses that got at least one section placed. Favors a broad
/// program over placing many sections of the same course.
pub struct DistinctCoursesScorer;

impl Scorer for DistinctCoursesScorer {
    fn score(&self, schedule: &Schedule) -> f64 {
        let program = schedule.program();
        let courses: BTreeSet<_> = schedule
            .start_assignments()
            .map(|start| {
                program
                    .get_section(start.section())
                    .expect("schedule only places sections of its program")
                    .course()
            })
            .collect();
        courses.len() as f64
    }
}

/// Weights every placed period-slice by the expected attendance during its period,
/// so popular sections gravitate towards well-attended periods.
pub struct AttendanceScorer;

impl Scorer for AttendanceScorer {
    fn score(&self, schedule: &Schedule) -> f64 {
        let program = schedule.program();
        schedule
            .present_assignments()
            .map(|present| {
                let estimated = program
                    .get_section(present.section())
                    .expect("schedule only places sections of its program")
                    .estimated_class_size();
                estimated as f64 * program.attendance_ratio(present.period())
            })
            .sum()
    }
}
