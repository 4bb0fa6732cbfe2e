//! # evostrat-bits
//! A fixed-length bit-vector implementation of the [`evostrat`] crate's `Genome` trait.
//!
//! Provides a [`BitGenome`] type usable in `evostrat` `Strategy`s, as well as
//! [`PercentSet`], a fitness scorer rewarding genomes for the share of their
//! bits that are set.
//!
//! [`BitGenome`]: crate::genomics::BitGenome
//! [`PercentSet`]: crate::scoring::PercentSet
//!
//! # Example usage: evolving a saturated bit string
//! ```
//! use evostrat::{RunConfig, Strategy};
//! use evostrat_bits::{BitConfig, BitGenome, PercentSet};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use std::num::NonZeroUsize;
//!
//! let run_config = RunConfig {
//!     maximum_population: NonZeroUsize::new(40).unwrap(),
//!     mutation_rate: 0.2,
//!     continue_until_fit: true,
//!     fitness_threshold: 100.0,
//!     ..RunConfig::default()
//! };
//!
//! let mut strategy: Strategy<BitGenome, _> = Strategy::with_rng(
//!     run_config,
//!     BitConfig::default(),
//!     PercentSet,
//!     StdRng::seed_from_u64(42),
//! )
//! .unwrap();
//! strategy.evolve().unwrap();
//!
//! let champion = strategy.champion().unwrap();
//! assert!(champion.genome().is_saturated());
//! println!("Found {} after {} generations", champion.genome(), strategy.generations().len());
//! ```

pub mod genomics;
pub mod scoring;

pub use genomics::{BitConfig, BitGenome};
pub use scoring::PercentSet;
