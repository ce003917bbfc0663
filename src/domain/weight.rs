//! Tag-cloud weight normalization
//!
//! Maps each tag's usage frequency linearly onto `[t_min, t_max]` relative to
//! the smallest and largest frequency in the current set.

use crate::domain::model::{TagCount, WeightedTag};

/// Linear frequency → weight mapping for one result set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightFn {
    t_min: f64,
    t_max: f64,
    f_min: u64,
    f_max: u64,
}

impl WeightFn {
    pub fn new(t_min: f64, t_max: f64, f_min: u64, f_max: u64) -> Self {
        WeightFn {
            t_min,
            t_max,
            f_min,
            f_max,
        }
    }

    /// Build the mapping from the frequencies actually present
    ///
    /// Returns `None` for an empty set.
    pub fn for_frequencies(t_min: f64, t_max: f64, frequencies: &[u64]) -> Option<Self> {
        let f_min = *frequencies.iter().min()?;
        let f_max = *frequencies.iter().max()?;
        Some(WeightFn::new(t_min, t_max, f_min, f_max))
    }

    pub fn weight(&self, frequency: u64) -> f64 {
        // A uniform set would divide by zero; every tag gets the max weight
        let mult_fac = if self.f_max == self.f_min {
            1.0
        } else {
            (self.t_max - self.t_min) / (self.f_max - self.f_min) as f64
        };
        self.t_max - (self.f_max as f64 - frequency as f64) * mult_fac
    }
}

/// Attach a weight to each counted tag, preserving input order
pub fn weigh(tags: Vec<TagCount>, t_min: f64, t_max: f64) -> Vec<WeightedTag> {
    let frequencies: Vec<u64> = tags.iter().map(|t| t.num_times).collect();
    let Some(weight_fn) = WeightFn::for_frequencies(t_min, t_max, &frequencies) else {
        return Vec::new();
    };

    tags.into_iter()
        .map(|count| WeightedTag {
            weight: weight_fn.weight(count.num_times),
            count,
        })
        .collect()
}
