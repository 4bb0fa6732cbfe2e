use crate::Individual;

use rand::Rng;

/// An interface for genomes that can be evolved by a [`Strategy`].
///
/// [`Strategy`]: crate::Strategy
pub trait Genome: Sized {
    /// Genetic configuration, opaque to the strategy.
    type Config;

    /// Returns a randomized genome.
    fn random<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Self;

    /// Combines `self` with `other` and returns a single "child" genome.
    ///
    /// Neither parent may be modified. Mutation should be applied
    /// to the child with probability `mutation_rate`, unless the
    /// implementor documents a different interpretation.
    fn reproduce<R: Rng + ?Sized>(
        &self,
        other: &Self,
        mutation_rate: f32,
        config: &Self::Config,
        rng: &mut R,
    ) -> Self;
}

/// Scores a genome. Higher is better.
///
/// Scoring must not alter the genome. The live population
/// is passed along for scorers that rank relatively.
///
/// Any `Fn(&[Individual<G>], &G) -> f32` is a scorer.
///
/// # Examples
/// ```
/// use evostrat::{FitnessScorer, Individual};
/// use evostrat_bits::BitGenome;
///
/// let ones = |_: &[Individual<BitGenome>], g: &BitGenome| g.ones() as f32;
/// let genome = BitGenome::from_bits(vec![true, false, true]);
///
/// assert_eq!(ones.score(&[], &genome), 2.0);
/// ```
pub trait FitnessScorer<G> {
    fn score(&self, population: &[Individual<G>], genome: &G) -> f32;
}

impl<G, F> FitnessScorer<G> for F
where
    F: Fn(&[Individual<G>], &G) -> f32,
{
    fn score(&self, population: &[Individual<G>], genome: &G) -> f32 {
        self(population, genome)
    }
}
