pub mod acceptance;
pub mod annealing;
pub mod perturber;
pub mod registry;
pub mod scorer;
pub mod temperature;

use solution::Schedule;

/// A schedule together with the score its optimizer assigned to it. Scores are
/// maximized.
#[derive(Clone)]
pub struct EvaluatedSchedule {
    schedule: Schedule,
    score: f64,
}

impl EvaluatedSchedule {
    pub fn new(schedule: Schedule, score: f64) -> EvaluatedSchedule {
        EvaluatedSchedule { schedule, score }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}
