//! Summary statistics for reporting on runs.

use serde::{Deserialize, Serialize};

use std::fmt;

/// A struct for reporting basic statistical data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub maximum: f32,
    pub minimum: f32,
    pub mean: f32,
    pub median: f32,
}

impl Stats {
    /// Returns statistics about numbers in a sequence,
    /// or `None` if the sequence is empty.
    ///
    /// # Examples
    /// ```
    /// use evostrat::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied()).unwrap();
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    ///
    /// assert!(Stats::from(std::iter::empty()).is_none());
    /// ```
    pub fn from(data: impl Iterator<Item = f32>) -> Option<Stats> {
        let mut data: Vec<f32> = data.collect();
        if data.is_empty() {
            return None;
        }
        let (mut max, mut min, mut sum) = (f32::MIN, f32::MAX, 0.0);
        for d in &data {
            max = d.max(max);
            min = d.min(min);
            sum += d;
        }
        data.sort_by(|a, b| a.total_cmp(b));
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Some(Stats {
            maximum: max,
            minimum: min,
            mean: sum / data.len() as f32,
            median,
        })
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max {:.2} / min {:.2} / mean {:.2} / median {:.2}",
            self.maximum, self.minimum, self.mean, self.median
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Stats;

    #[test]
    fn even_length_median_averages_middle_pair() {
        let stats = Stats::from([4.0, 1.0, 3.0, 2.0].iter().copied()).unwrap();
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.mean, 2.5);
    }

    #[test]
    fn single_value() {
        let stats = Stats::from(std::iter::once(7.0)).unwrap();
        assert_eq!(
            stats,
            Stats {
                maximum: 7.0,
                minimum: 7.0,
                mean: 7.0,
                median: 7.0
            }
        );
    }
}
