//! Fixed-length bit-string genomes.

mod config;

pub use config::BitConfig;

use evostrat::Genome;
use rand::Rng;
use serde::{Deserialize, Serialize};

use std::fmt;

/// A string of bits.
///
/// Supports Serde for convenient genome saving and loading.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BitGenome {
    bits: Vec<bool>,
}

impl BitGenome {
    /// Creates a genome with exactly the specified bits.
    ///
    /// # Examples
    /// ```
    /// use evostrat_bits::BitGenome;
    ///
    /// let genome = BitGenome::from_bits(vec![true, false, true]);
    /// assert_eq!(genome.to_string(), "101");
    /// ```
    pub fn from_bits(bits: Vec<bool>) -> BitGenome {
        BitGenome { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the number of set bits.
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Returns whether every bit is set.
    pub fn is_saturated(&self) -> bool {
        self.bits.iter().all(|b| *b)
    }
}

impl Genome for BitGenome {
    type Config = BitConfig;

    /// Returns a genome of `config.length` fair coin flips.
    fn random<R: Rng + ?Sized>(config: &BitConfig, rng: &mut R) -> BitGenome {
        BitGenome {
            bits: (0..config.length.get()).map(|_| rng.gen::<bool>()).collect(),
        }
    }

    /// Single-point crossover: the child takes the bits before the
    /// [crossover point] from `self` and the rest from `other`.
    /// Then, with probability `mutation_rate`, one uniformly chosen
    /// bit of the child is flipped.
    ///
    /// Bits missing from a short parent are inherited as unset.
    ///
    /// [crossover point]: BitConfig::crossover_point
    fn reproduce<R: Rng + ?Sized>(
        &self,
        other: &BitGenome,
        mutation_rate: f32,
        config: &BitConfig,
        rng: &mut R,
    ) -> BitGenome {
        let crossover = config.crossover_point();
        let mut bits: Vec<bool> = (0..config.length.get())
            .map(|i| {
                let parent = if i < crossover { self } else { other };
                parent.bits.get(i).copied().unwrap_or(false)
            })
            .collect();
        if rng.gen::<f32>() < mutation_rate {
            let flipped = rng.gen_range(0..bits.len());
            bits[flipped] = !bits[flipped];
        }
        BitGenome { bits }
    }
}

impl fmt::Display for BitGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::num::NonZeroUsize;

    fn parse(bits: &str) -> BitGenome {
        BitGenome::from_bits(bits.chars().map(|c| c == '1').collect())
    }

    fn config(length: usize) -> BitConfig {
        BitConfig {
            length: NonZeroUsize::new(length).unwrap(),
        }
    }

    #[test]
    fn random_genomes_have_configured_length() {
        let mut rng = StdRng::seed_from_u64(0);
        for length in 1..40 {
            assert_eq!(BitGenome::random(&config(length), &mut rng).len(), length);
        }
    }

    #[test]
    fn random_bits_are_fair() {
        let mut rng = StdRng::seed_from_u64(0);
        let genome = BitGenome::random(&config(10_000), &mut rng);
        let share = genome.ones() as f32 / 10_000.0;
        assert!((share - 0.5).abs() < 0.03, "{}", share);
    }

    #[test]
    fn unmutated_child_splits_parents_in_half() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = parse("1111111111111111");
        let b = parse("0000000000000000");
        let child = a.reproduce(&b, 0.0, &BitConfig::default(), &mut rng);
        assert_eq!(child.to_string(), "1111111100000000");
        let child = b.reproduce(&a, 0.0, &BitConfig::default(), &mut rng);
        assert_eq!(child.to_string(), "0000000011111111");
    }

    #[test]
    fn reproduction_leaves_parents_untouched() {
        let mut rng = StdRng::seed_from_u64(5);
        let a = BitGenome::random(&BitConfig::default(), &mut rng);
        let b = BitGenome::random(&BitConfig::default(), &mut rng);
        let (a_before, b_before) = (a.clone(), b.clone());
        for _ in 0..100 {
            a.reproduce(&b, 1.0, &BitConfig::default(), &mut rng);
            b.reproduce(&a, 0.5, &BitConfig::default(), &mut rng);
        }
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn certain_mutation_flips_exactly_one_bit() {
        let mut rng = StdRng::seed_from_u64(9);
        let a = parse("1111111111111111");
        for _ in 0..50 {
            let child = a.reproduce(&a, 1.0, &BitConfig::default(), &mut rng);
            assert_eq!(child.ones(), 15);
        }
    }

    #[test]
    fn every_bit_can_mutate() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = parse("0000");
        let mut flipped = [false; 4];
        for _ in 0..200 {
            let child = a.reproduce(&a, 1.0, &config(4), &mut rng);
            for (i, bit) in child.bits().iter().enumerate() {
                flipped[i] |= *bit;
            }
        }
        assert_eq!(flipped, [true; 4]);
    }

    #[test]
    fn short_parents_contribute_unset_bits() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = parse("1111");
        let b = parse("11");
        let child = a.reproduce(&b, 0.0, &config(4), &mut rng);
        assert_eq!(child.to_string(), "1100");
    }

    #[test]
    fn serializes_with_serde() {
        let genome = parse("1001");
        let json = serde_json::to_string(&genome).unwrap();
        assert_eq!(serde_json::from_str::<BitGenome>(&json).unwrap(), genome);
    }
}
