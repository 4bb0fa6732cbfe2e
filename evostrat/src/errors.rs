use crate::IndividualId;

use thiserror::Error;

/// An error type indicating an invalid [`RunConfig`].
///
/// Zero population sizes and iteration bounds are
/// unrepresentable, so only the real-valued fields
/// can be rejected.
///
/// [`RunConfig`]: crate::RunConfig
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The mutation rate is not a probability.
    #[error("mutation rate {0} is outside of [0.0, 1.0]")]
    MutationRateOutOfRange(f32),
    /// The fitness threshold is NaN or infinite.
    #[error("fitness threshold {0} is not a finite number")]
    NonFiniteThreshold(f32),
}

/// An error type indicating a failure during evolution.
/// Any of these aborts the current run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvolutionError {
    /// A parent was requested from an empty population.
    #[error("attempted parent selection on an empty population")]
    EmptyPopulation,
    /// An individual was ranked or selected before
    /// its first evaluation.
    #[error("individual {0} has not been evaluated")]
    Unevaluated(IndividualId),
    /// A scorer returned NaN or an infinite value.
    #[error("individual {id} was assigned invalid fitness {fitness}")]
    InvalidFitness { id: IndividualId, fitness: f32 },
    /// Fitness-proportional selection requires
    /// non-negative fitness values.
    #[error("individual {id} has negative fitness {fitness}")]
    NegativeFitness { id: IndividualId, fitness: f32 },
    /// The strategy has already run. Terminated runs
    /// cannot be resumed.
    #[error("strategy has already been run")]
    AlreadyRun,
    /// The run configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
