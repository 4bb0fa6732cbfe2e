use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for bit genome generation
/// and reproduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitConfig {
    /// Number of bits in a genome.
    pub length: NonZeroUsize,
}

impl Default for BitConfig {
    /// Sixteen-bit genomes.
    fn default() -> BitConfig {
        BitConfig {
            // SAFETY: 16 is a valid NonZeroUsize.
            length: unsafe { NonZeroUsize::new_unchecked(16) },
        }
    }
}

impl BitConfig {
    /// Index of the first bit a child inherits
    /// from its second parent.
    ///
    /// # Examples
    /// ```
    /// use evostrat_bits::BitConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// assert_eq!(BitConfig::default().crossover_point(), 8);
    /// let odd = BitConfig { length: NonZeroUsize::new(5).unwrap() };
    /// assert_eq!(odd.crossover_point(), 2);
    /// ```
    pub fn crossover_point(&self) -> usize {
        self.length.get() / 2
    }
}
