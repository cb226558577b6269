
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon::ThreadPoolBuilder;

use solution::Schedule;

use crate::acceptance::AcceptanceFunction;
use crate::perturber::Perturber;
use crate::scorer::Scorer;
use crate::temperature::TemperatureFunction;
use crate::EvaluatedSchedule;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time as stdtime;

/// Two-level simulated annealing. Each outer step spawns `n_sub_optimizers`
/// independent annealing branches from the current schedule on a worker pool, takes
/// the best branch result and subjects it to one outer acceptance decision. The
/// primary temperature is a function of the outer step only; within an outer step
/// every branch additionally cools along the sub temperature curve over its own
/// step counter, scaled by the outer step's temperature.
pub struct ConcurrentOptimizer {
    n_steps: u32,
    n_sub_optimizers: usize,
    sub_optimizer_steps: u32,
    temperature: Arc<dyn TemperatureFunction>,
    sub_temperature: Arc<dyn TemperatureFunction>,
    acceptance: Arc<dyn AcceptanceFunction>,
    scorer: Arc<dyn Scorer>,
    perturber: Arc<dyn Perturber>,
    seed: u64,
}

impl ConcurrentOptimizer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n_steps: u32,
        n_sub_optimizers: usize,
        sub_optimizer_steps: u32,
        temperature: Arc<dyn TemperatureFunction>,
        sub_temperature: Arc<dyn TemperatureFunction>,
        acceptance: Arc<dyn AcceptanceFunction>,
        scorer: Arc<dyn Scorer>,
        perturber: Arc<dyn Perturber>,
        seed: u64,
    ) -> ConcurrentOptimizer {
        ConcurrentOptimizer {
            n_steps,
            n_sub_optimizers,
            sub_optimizer_steps,
            temperature,
            sub_temperature,
            acceptance,
            scorer,
            perturber,
            seed,
        }
    }

    pub fn optimize(&self, initial: Schedule, cancel: &AtomicBool) -> EvaluatedSchedule {
        self.optimize_traced(initial, cancel).0
    }

    /// Like [`optimize`](ConcurrentOptimizer::optimize), but additionally returns
    /// the best score seen after each completed outer step.
    pub fn optimize_traced(
        &self,
        initial: Schedule,
        cancel: &AtomicBool,
    ) -> (EvaluatedSchedule, Vec<f64>) {
        let start_time = stdtime::Instant::now();
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.n_sub_optimizers)
            .build()
            .expect("sub-optimizer worker pool can be built");

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let initial_score = self.scorer.score(&initial);
        let mut current = EvaluatedSchedule::new(initial, initial_score);
        let mut best = current.clone();
        let mut trace = Vec::with_capacity(self.n_steps as usize);

        println!(
            "starting optimization: {} steps, {} sub-optimizers with {} steps each, initial score {:.3}",
            self.n_steps, self.n_sub_optimizers, self.sub_optimizer_steps, initial_score
        );

        for step in 0..self.n_steps {
            if cancel.load(Ordering::Relaxed) {
                println!("optimization cancelled after {} steps", step);
                break;
            }
            let temperature = self.temperature.temperature(step, self.n_steps);
            let branch_seeds: Vec<u64> = (0..self.n_sub_optimizers).map(|_| rng.random()).collect();

            let branches: Vec<EvaluatedSchedule> = pool.install(|| {
                branch_seeds
                    .into_par_iter()
                    .map(|branch_seed| self.run_sub_optimizer(&current, temperature, branch_seed))
                    .collect()
            });

            // ties go to the earliest branch
            let champion = branches
                .into_iter()
                .reduce(|sofar, next| if next.score() > sofar.score() { next } else { sofar })
                .expect("at least one sub-optimizer runs per step");

            if champion.score() > best.score() {
                println!(
                    "step {}: new best score {:.3} (temperature {:.3}, {:0.2}sec)",
                    step,
                    champion.score(),
                    temperature,
                    stdtime::Instant::now()
                        .duration_since(start_time)
                        .as_secs_f32()
                );
                best = champion.clone();
            }
            if self
                .acceptance
                .accept(current.score(), champion.score(), temperature, &mut rng)
            {
                current = champion;
            }
            trace.push(best.score());
        }

        println!(
            "optimization finished: best score {:.3} with {} placed sections ({:0.2}sec)",
            best.score(),
            best.schedule().number_of_placed_sections(),
            stdtime::Instant::now()
                .duration_since(start_time)
                .as_secs_f32()
        );
        (best, trace)
    }

    /// One annealing branch: a random walk of `sub_optimizer_steps` perturbations,
    /// cooling along the sub temperature curve scaled by the outer step's
    /// temperature, returning the best schedule it came across.
    fn run_sub_optimizer(
        &self,
        start: &EvaluatedSchedule,
        outer_temperature: f64,
        seed: u64,
    ) -> EvaluatedSchedule {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut current = start.clone();
        let mut best = start.clone();

        for sub_step in 0..self.sub_optimizer_steps {
            let temperature = outer_temperature
                * self
                    .sub_temperature
                    .temperature(sub_step, self.sub_optimizer_steps);
            let schedule = self.perturber.perturb(current.schedule(), &mut rng);
            let score = self.scorer.score(&schedule);
            let candidate = EvaluatedSchedule::new(schedule, score);

            if candidate.score() > best.score() {
                best = candidate.clone();
            }
            if self
                .acceptance
                .accept(current.score(), candidate.score(), temperature, &mut rng)
            {
                current = candidate;
            }
        }
        best
    }
}
