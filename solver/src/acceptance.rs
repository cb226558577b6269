use rand::{Rng, RngCore};

/// Decides whether an optimizer moves from its current schedule to a candidate.
pub trait AcceptanceFunction: Send + Sync {
    fn accept(
        &self,
        current_score: f64,
        candidate_score: f64,
        temperature: f64,
        rng: &mut dyn RngCore,
    ) -> bool;
}

/// Metropolis acceptance: improvements are always taken, regressions are taken with
/// probability `exp((candidate - current) / temperature)` against a uniform draw
/// from [0, 1). At temperature 0.0 a regression is never taken.
pub struct StandardAcceptanceFunction;

impl AcceptanceFunction for StandardAcceptanceFunction {
    fn accept(
        &self,
        current_score: f64,
        candidate_score: f64,
        temperature: f64,
        rng: &mut dyn RngCore,
    ) -> bool {
        if candidate_score >= current_score {
            return true;
        }
        if temperature <= 0.0 {
            return false;
        }
        let probability = ((candidate_score - current_score) / temperature).exp();
        rng.random::<f64>() < probability
    }
}
