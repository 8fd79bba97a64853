//! Descriptive Statistics
//!
//! ## Computed Fields
//!
//! | Field     | Definition                                           |
//! |-----------|------------------------------------------------------|
//! | `average` | arithmetic mean                                      |
//! | `min`     | smallest reading                                     |
//! | `max`     | largest reading                                      |
//! | `count`   | number of cleaned readings                           |
//! | `median`  | central order statistic; mean of the two for even n  |
//! | `std_dev` | sample standard deviation (n-1), `0.0` when n <= 1   |
//!
//! ## Numeric Guarantees
//!
//! For any non-empty finite input:
//! ```text
//! min <= average <= max
//! min <= median  <= max
//! std_dev >= 0
//! ```
//! Rounding in the running sum can push a mean one ulp past an extremum
//! (three copies of `0.1` sum to `0.30000000000000004`), so the mean is
//! clamped into `[min, max]`.
//!
//! Extreme-but-finite batches still produce a result. When the plain sum or
//! the sum of squared deviations overflows, the pass is repeated on readings
//! scaled by a power of two so that the largest magnitude falls in
//! `[0.5, 1)`, and the result is scaled back. Only a standard deviation that
//! is itself beyond `f64::MAX` (e.g. `[-f64::MAX, f64::MAX]`) is reported as
//! [`AnalysisError::Internal`].

use alloc::vec::Vec;

use crate::errors::{AnalysisError, EngineResult};

/// Statistics over one cleaned batch
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    /// Arithmetic mean
    pub average: f64,
    /// Smallest reading
    pub min: f64,
    /// Largest reading
    pub max: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Number of readings the statistics cover
    pub count: usize,
    /// Median
    pub median: f64,
}

impl AnalysisResult {
    /// Compute statistics over finite readings
    ///
    /// Fails with `InvalidArgument` on an empty slice and with `Internal` if
    /// the standard deviation exceeds `f64::MAX`. Callers are expected to have cleaned the
    /// batch first; a non-finite reading surfaces as `Internal`.
    pub fn from_values(values: &[f64]) -> EngineResult<Self> {
        if values.is_empty() {
            return Err(AnalysisError::no_valid_values());
        }

        let mut sorted: Vec<f64> = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Compute statistics over readings already sorted ascending
    pub(crate) fn from_sorted(sorted: &[f64]) -> EngineResult<Self> {
        debug_assert!(
            sorted.windows(2).all(|w| w[0].total_cmp(&w[1]).is_le()),
            "values must be sorted in ascending order"
        );

        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return Err(AnalysisError::no_valid_values());
        };
        if !min.is_finite() || !max.is_finite() {
            return Err(AnalysisError::internal("non-finite reading reached statistics"));
        }

        let count = sorted.len();
        let exponent = magnitude_exponent(min, max);
        let average = mean(sorted, exponent).clamp(min, max);
        let median = median(sorted);
        let std_dev = sample_std_dev(sorted, average, exponent)?;

        Ok(Self {
            average,
            min,
            max,
            std_dev,
            count,
            median,
        })
    }

    /// Spread between the extrema
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Binary exponent of the largest magnitude, so `x * 2^-exponent` lies in `(-1, 1)`
fn magnitude_exponent(min: f64, max: f64) -> i32 {
    let (_, exponent) = libm::frexp(min.abs().max(max.abs()));
    exponent
}

fn mean(values: &[f64], exponent: i32) -> f64 {
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return sum / n;
    }

    // Scaled sum is bounded by n
    let scaled: f64 = values.iter().map(|&v| libm::ldexp(v, -exponent)).sum();
    libm::ldexp(scaled / n, exponent)
}

/// Median of a non-empty sorted slice, always within its extrema
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return sorted[mid];
    }

    let (lo, hi) = (sorted[mid - 1], sorted[mid]);
    let centre = (lo + hi) / 2.0;
    let centre = if centre.is_finite() {
        centre
    } else {
        // lo + hi overflowed
        lo / 2.0 + hi / 2.0
    };
    centre.clamp(lo, hi)
}

/// Bessel-corrected standard deviation; exactly `0.0` below two readings
fn sample_std_dev(values: &[f64], mean: f64, exponent: i32) -> EngineResult<f64> {
    if values.len() <= 1 {
        return Ok(0.0);
    }

    let plain = variance(values, mean, 0);
    if plain.is_finite() {
        return Ok(libm::sqrt(plain));
    }

    // Deviations are within (-2, 2) once scaled
    let scaled = variance(values, libm::ldexp(mean, -exponent), exponent);
    let std_dev = libm::ldexp(libm::sqrt(scaled), exponent);
    if !std_dev.is_finite() {
        return Err(AnalysisError::internal("standard deviation exceeds f64 range"));
    }
    Ok(std_dev)
}

/// Sample variance of `values * 2^-exponent` around `mean`
fn variance(values: &[f64], mean: f64, exponent: i32) -> f64 {
    let squared_deviations: f64 = values
        .iter()
        .map(|&v| {
            let d = libm::ldexp(v, -exponent) - mean;
            d * d
        })
        .sum();
    squared_deviations / (values.len() - 1) as f64
}
