
use serde::Deserialize;
use thiserror::Error;

use crate::acceptance::{AcceptanceFunction, StandardAcceptanceFunction};
use crate::annealing::ConcurrentOptimizer;
use crate::perturber::{Perturber, RandomMover, RandomPlacer};
use crate::scorer::{AttendanceScorer, DistinctCoursesScorer, Scorer};
use crate::temperature::{ExponentialFunction, LinearFunction, TemperatureFunction};

use std::sync::Arc;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("unknown {kind} \"{name}\"")]
    UnknownStrategy { kind: &'static str, name: String },

    #[error("could not parse optimizer spec: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Declarative description of a [`ConcurrentOptimizer`], as found in the run
/// configuration file. Strategies are picked by name; the listing of known names
/// lives in [`resolve`](OptimizerSpec::resolve), nowhere else.
///
/// Outer steps and sub-optimizer steps are configured independently. Unknown keys
/// are rejected at parse time, so a misspelled option fails the run instead of
/// silently falling back to its default.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptimizerSpec {
    #[serde(default = "default_n_steps")]
    pub n_steps: u32,
    #[serde(default = "default_n_sub_optimizers")]
    pub n_sub_optimizers: usize,
    #[serde(default = "default_sub_optimizer_steps")]
    pub sub_optimizer_steps: u32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_temperature_function")]
    pub temperature_function: String,
    #[serde(default = "default_temperature_function")]
    pub sub_temperature_function: String,
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,
    #[serde(default = "default_decay")]
    pub decay: f64,
    #[serde(default = "default_acceptance_function")]
    pub acceptance_function: String,
    #[serde(default = "default_scorer")]
    pub scorer: String,
    #[serde(default = "default_perturber")]
    pub perturber: String,
}

fn default_n_steps() -> u32 {
    1000
}

fn default_n_sub_optimizers() -> usize {
    4
}

fn default_sub_optimizer_steps() -> u32 {
    100
}

fn default_temperature_function() -> String {
    "linear".to_string()
}

fn default_initial_temperature() -> f64 {
    1.0
}

fn default_decay() -> f64 {
    0.99
}

fn default_acceptance_function() -> String {
    "standard".to_string()
}

fn default_scorer() -> String {
    "distinctCourses".to_string()
}

fn default_perturber() -> String {
    "randomPlacer".to_string()
}

impl Default for OptimizerSpec {
    fn default() -> OptimizerSpec {
        serde_json::from_value(serde_json::json!({}))
            .expect("the empty spec consists of defaults only")
    }
}

impl OptimizerSpec {
    pub fn from_json(json: serde_json::Value) -> Result<OptimizerSpec, ConfigurationError> {
        Ok(serde_json::from_value(json)?)
    }

    /// Looks every named strategy up and assembles the optimizer. Unknown names are
    /// rejected with the offending name, never silently defaulted.
    pub fn resolve(&self) -> Result<ConcurrentOptimizer, ConfigurationError> {
        let temperature =
            self.resolve_temperature("temperature function", &self.temperature_function)?;
        let sub_temperature =
            self.resolve_temperature("sub temperature function", &self.sub_temperature_function)?;

        let acceptance: Arc<dyn AcceptanceFunction> = match self.acceptance_function.as_str() {
            "standard" => Arc::new(StandardAcceptanceFunction),
            name => {
                return Err(ConfigurationError::UnknownStrategy {
                    kind: "acceptance function",
                    name: name.to_string(),
                })
            }
        };

        let scorer: Arc<dyn Scorer> = match self.scorer.as_str() {
            "distinctCourses" => Arc::new(DistinctCoursesScorer),
            "attendance" => Arc::new(AttendanceScorer),
            name => {
                return Err(ConfigurationError::UnknownStrategy {
                    kind: "scorer",
                    name: name.to_string(),
                })
            }
        };

        let perturber: Arc<dyn Perturber> = match self.perturber.as_str() {
            "randomPlacer" => Arc::new(RandomPlacer::new()),
            "randomMover" => Arc::new(RandomMover::new()),
            name => {
                return Err(ConfigurationError::UnknownStrategy {
                    kind: "perturber",
                    name: name.to_string(),
                })
            }
        };

        Ok(ConcurrentOptimizer::new(
            self.n_steps,
            self.n_sub_optimizers,
            self.sub_optimizer_steps,
            temperature,
            sub_temperature,
            acceptance,
            scorer,
            perturber,
            self.seed,
        ))
    }

    fn resolve_temperature(
        &self,
        kind: &'static str,
        name: &str,
    ) -> Result<Arc<dyn TemperatureFunction>, ConfigurationError> {
        match name {
            "linear" => Ok(Arc::new(LinearFunction)),
            "exponential" => Ok(Arc::new(ExponentialFunction::new(
                self.initial_temperature,
                self.decay,
            ))),
            _ => Err(ConfigurationError::UnknownStrategy {
                kind,
                name: name.to_string(),
            }),
        }
    }
}
