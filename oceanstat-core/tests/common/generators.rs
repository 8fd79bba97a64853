//! Mock sample generators
//!
//! Stand-ins for the upstream collectors when no real export is available.
//! Samples are normal-distributed around the middle of each data type's
//! typical range with σ = 15 % of the span, then clamped into the range.
//! Every generator is seeded so test runs are reproducible.

use oceanstat_core::DataType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Fraction of the range span used as the standard deviation
const SPREAD_FRACTION: f64 = 0.15;

/// Smallest and largest batch a mock collector produces
pub const MOCK_BATCH_MIN: usize = 50;
pub const MOCK_BATCH_MAX: usize = 200;

/// Seeded generator of realistic-looking sensor batches
pub struct MockSampleGenerator {
    rng: StdRng,
}

impl MockSampleGenerator {
    /// Create a generator with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Batch of random size within the mock bounds; empty for unknown types
    pub fn batch(&mut self, data_type: &DataType) -> Vec<f64> {
        let len = self.rng.gen_range(MOCK_BATCH_MIN..=MOCK_BATCH_MAX);
        self.batch_of(data_type, len)
    }

    /// Batch of exactly `len` readings; empty for unknown types
    pub fn batch_of(&mut self, data_type: &DataType, len: usize) -> Vec<f64> {
        let Some((min, max)) = data_type.typical_range() else {
            return Vec::new();
        };

        let mid = (min + max) / 2.0;
        let normal = Normal::new(mid, (max - min) * SPREAD_FRACTION)
            .expect("spread is positive for every known range");

        (0..len)
            .map(|_| normal.sample(&mut self.rng).clamp(min, max))
            .collect()
    }

    /// Evenly spread readings across `[min, max]`
    pub fn uniform_spread(min: f64, max: f64, len: usize) -> Vec<f64> {
        if len <= 1 {
            return vec![min; len];
        }
        let step = (max - min) / (len - 1) as f64;
        (0..len).map(|i| min + step * i as f64).collect()
    }

    /// Replace every `every`-th reading with a non-finite value
    pub fn inject_gaps(values: &mut [f64], every: usize) {
        let gaps = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY];
        for (n, value) in values.iter_mut().step_by(every.max(1)).enumerate() {
            *value = gaps[n % gaps.len()];
        }
    }
}
