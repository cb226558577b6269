/// Cooling policy of the annealing run. The temperature only depends on the step
/// counter, so sub-optimizers spawned during the same outer step all share one
/// temperature.
pub trait TemperatureFunction: Send + Sync {
    /// The temperature of outer step `step` out of `n_steps`. Must reach 0.0 on (or
    /// before) the final step so the run ends greedy.
    fn temperature(&self, step: u32, n_steps: u32) -> f64;
}

/// Cools linearly from just below 1.0 down to exactly 0.0 on the final step.
pub struct LinearFunction;

impl TemperatureFunction for LinearFunction {
    fn temperature(&self, step: u32, n_steps: u32) -> f64 {
        (n_steps - 1 - step) as f64 / n_steps as f64
    }
}

/// Geometric cooling. Never reaches exactly 0.0 by itself, so the final step is
/// clamped to 0.0 to keep the last step greedy.
pub struct ExponentialFunction {
    initial_temperature: f64,
    decay: f64,
}

impl ExponentialFunction {
    pub fn new(initial_temperature: f64, decay: f64) -> ExponentialFunction {
        ExponentialFunction {
            initial_temperature,
            decay,
        }
    }
}

impl TemperatureFunction for ExponentialFunction {
    fn temperature(&self, step: u32, n_steps: u32) -> f64 {
        if step + 1 >= n_steps {
            return 0.0;
        }
        self.initial_temperature * self.decay.powi(step as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_cooling_starts_below_one_and_ends_at_zero() {
        let function = LinearFunction;

        assert_eq!(function.temperature(0, 100), 0.99);
        assert_eq!(function.temperature(49, 100), 0.5);
        assert_eq!(function.temperature(99, 100), 0.0);
    }

    #[test]
    fn linear_cooling_is_strictly_decreasing() {
        let function = LinearFunction;

        for step in 1..50 {
            assert!(function.temperature(step, 50) < function.temperature(step - 1, 50));
        }
    }

    #[test]
    fn exponential_cooling_decays_geometrically_and_ends_at_zero() {
        let function = ExponentialFunction::new(2.0, 0.5);

        assert_eq!(function.temperature(0, 10), 2.0);
        assert_eq!(function.temperature(1, 10), 1.0);
        assert_eq!(function.temperature(2, 10), 0.5);
        assert_eq!(function.temperature(9, 10), 0.0);
    }
}
