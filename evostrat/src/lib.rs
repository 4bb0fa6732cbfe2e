//! A generic generational evolutionary strategy.
//!
//! Users supply a genome representation via the [`Genome`] trait
//! and a [`FitnessScorer`]; a [`Strategy`] then evolves a bounded
//! [`Population`] by repeatedly
//! 1. evaluating every individual,
//! 2. removing the weakest quarter,
//! 3. archiving the not-yet-archived individuals as a [`Generation`],
//! 4. refilling the population with the offspring of selected parents,
//!
//! until either a fixed number of generations has been archived or
//! the best individual reaches a fitness threshold. Parents are
//! chosen by a [`ParentSelector`], fitness-proportionally
//! ([`RouletteWheel`]) by default.
//!
//! A fixed-length bit-vector genome is supplied by the
//! `evostrat-bits` crate.
//!
//! All randomness is drawn from a single generator owned by the
//! strategy, so seeded runs are reproducible. Progress is reported
//! through the [`log`](https://docs.rs/log) facade.
//!
//! # Example usage: maximizing set bits
//! ```
//! use evostrat::{Generation, GenerationEvent, RunConfig, Strategy};
//! use evostrat_bits::{BitConfig, BitGenome, PercentSet};
//! use std::num::NonZeroUsize;
//! use std::ops::ControlFlow;
//!
//! let config = RunConfig {
//!     maximum_population: NonZeroUsize::new(20).unwrap(),
//!     mutation_rate: 0.1,
//!     maximum_iterations: NonZeroUsize::new(50).unwrap(),
//!     ..RunConfig::default()
//! };
//!
//! let mut strategy: Strategy<BitGenome, _> =
//!     Strategy::new(config, BitConfig::default(), PercentSet).unwrap();
//! strategy
//!     .evolve_with(&mut |event: GenerationEvent, generation: &Generation<BitGenome>| {
//!         if event == GenerationEvent::Evolved {
//!             println!(
//!                 "{}: best {:?}, average {:?}",
//!                 generation.index(),
//!                 generation.best_fit().and_then(|i| i.fitness()),
//!                 generation.average_fitness(),
//!             );
//!         }
//!         ControlFlow::Continue(())
//!     })
//!     .unwrap();
//!
//! println!("Champion: {}", strategy.champion().unwrap());
//! ```

mod errors;
mod generations;
mod genome;
mod individual;
pub mod logging;
pub mod persistence;
mod populations;
mod strategy;

pub use errors::{ConfigError, EvolutionError};
pub use generations::{Generation, GenerationId};
pub use genome::{FitnessScorer, Genome};
pub use individual::{Individual, IndividualId};
pub use populations::{ParentSelector, Population, RouletteWheel, RunConfig, Uniform};
pub use strategy::{GenerationEvent, Observer, Strategy, StrategyState, Termination};
