use crate::BitGenome;

use evostrat::{FitnessScorer, Individual};

/// Scores a genome by the percentage of its bits
/// that are set, in [0.0, 100.0].
///
/// # Examples
/// ```
/// use evostrat::FitnessScorer;
/// use evostrat_bits::{BitGenome, PercentSet};
///
/// let genome = BitGenome::from_bits(vec![true, true, false, true]);
/// assert_eq!(PercentSet.score(&[], &genome), 75.0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PercentSet;

impl FitnessScorer<BitGenome> for PercentSet {
    fn score(&self, _: &[Individual<BitGenome>], genome: &BitGenome) -> f32 {
        if genome.is_empty() {
            return 0.0;
        }
        genome.ones() as f32 / genome.len() as f32 * 100.0
    }
}
