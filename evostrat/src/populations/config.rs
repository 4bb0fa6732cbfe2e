use crate::ConfigError;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for a single evolutionary run.
///
/// The configuration is copied into the [`Strategy`] when
/// it is built and is never modified during a run.
///
/// [`Strategy`]: crate::Strategy
///
/// # Note
/// `mutation_rate` is a probability and must be in the
/// range [0.0, 1.0]; [`validate`] rejects anything else.
///
/// [`validate`]: RunConfig::validate
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Size the population is restored to every generation.
    pub maximum_population: NonZeroUsize,
    /// Chance that an offspring is mutated.
    pub mutation_rate: f32,
    /// Number of generations to archive when not
    /// running until fit.
    pub maximum_iterations: NonZeroUsize,
    /// Whether to keep evolving until the best individual
    /// reaches [`fitness_threshold`], ignoring
    /// [`maximum_iterations`].
    ///
    /// [`fitness_threshold`]: RunConfig::fitness_threshold
    /// [`maximum_iterations`]: RunConfig::maximum_iterations
    pub continue_until_fit: bool,
    /// Fitness at which a run-until-fit stops.
    pub fitness_threshold: f32,
}

impl RunConfig {
    /// Checks the real-valued fields.
    ///
    /// # Errors
    /// Returns an error if the mutation rate is not in
    /// [0.0, 1.0] or the fitness threshold is not finite.
    ///
    /// # Examples
    /// ```
    /// use evostrat::{ConfigError, RunConfig};
    ///
    /// assert!(RunConfig::default().validate().is_ok());
    ///
    /// let config = RunConfig {
    ///     mutation_rate: 1.5,
    ///     ..RunConfig::default()
    /// };
    /// assert_eq!(config.validate(), Err(ConfigError::MutationRateOutOfRange(1.5)));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange(self.mutation_rate));
        }
        if !self.fitness_threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold(self.fitness_threshold));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    /// Population of 100, 2.5% mutation rate, 10000 iterations,
    /// and a fitness threshold of 100 which is only consulted
    /// once `continue_until_fit` is set.
    fn default() -> RunConfig {
        RunConfig {
            // SAFETY: 100 and 10000 are valid NonZeroUsizes.
            maximum_population: unsafe { NonZeroUsize::new_unchecked(100) },
            mutation_rate: 0.025,
            maximum_iterations: unsafe { NonZeroUsize::new_unchecked(10000) },
            continue_until_fit: false,
            fitness_threshold: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_real_fields() {
        for rate in [-0.1, 1.01, f32::NAN] {
            let config = RunConfig {
                mutation_rate: rate,
                ..RunConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::MutationRateOutOfRange(_))
            ));
        }
        let config = RunConfig {
            fitness_threshold: f32::INFINITY,
            ..RunConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFiniteThreshold(f32::INFINITY))
        );
    }

    #[test]
    fn accepts_boundary_rates() {
        for rate in [0.0, 1.0] {
            let config = RunConfig {
                mutation_rate: rate,
                ..RunConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn zero_population_does_not_deserialize() {
        let json = r#"{
            "maximum_population": 0,
            "mutation_rate": 0.1,
            "maximum_iterations": 5,
            "continue_until_fit": false,
            "fitness_threshold": 100.0
        }"#;
        assert!(serde_json::from_str::<RunConfig>(json).is_err());

        let json = json.replace("\"maximum_population\": 0", "\"maximum_population\": 20");
        let config: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.maximum_population.get(), 20);
        assert_eq!(config.maximum_iterations.get(), 5);
    }
}
