//! Batch Cleaning
//!
//! Removes readings that cannot take part in arithmetic. Only NaN and the
//! two infinities are dropped; zero, negative and extreme-but-finite values
//! all survive, because range plausibility is a sensor concern and not a
//! statistics concern.
//!
//! Relative order is preserved, and the number of dropped readings is kept
//! so the quality score can penalize incomplete batches:
//!
//! ```text
//! [5.0, NaN, 7.0, inf]  ->  values = [5.0, 7.0], discarded = 2
//! ```

use alloc::vec::Vec;

use crate::traits::Validatable;

/// Readings left after cleaning, plus how many were removed
///
/// Invariant: `values.len() + discarded == original_len()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanedBatch {
    /// Finite readings in original order
    pub values: Vec<f64>,
    /// Number of NaN or infinite readings removed
    pub discarded: usize,
}

impl CleanedBatch {
    /// Length of the batch before cleaning
    pub fn original_len(&self) -> usize {
        self.values.len() + self.discarded
    }

    /// Number of readings that survived
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing survived
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fraction of readings that survived, `0.0` for an empty original batch
    pub fn completeness(&self) -> f64 {
        match self.original_len() {
            0 => 0.0,
            total => self.values.len() as f64 / total as f64,
        }
    }
}

/// Drop non-finite readings, keeping order
pub fn clean(values: &[f64]) -> CleanedBatch {
    let kept: Vec<f64> = values.iter().copied().filter(|v| v.is_valid()).collect();
    let discarded = values.len() - kept.len();

    CleanedBatch {
        values: kept,
        discarded,
    }
}
