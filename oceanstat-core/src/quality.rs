//! Data-Quality Scoring
//!
//! The quality score is a 0-10 heuristic describing how much trust a batch
//! deserves. It looks only at counts, never at the readings themselves, so
//! it cannot influence the statistics.
//!
//! ## Formula
//!
//! ```text
//! score  = 10.0 × cleaned / original          (completeness)
//! score ×= 0.4   if cleaned <   5              (tiny sample)
//! score ×= 0.7   if 5 <= cleaned < 10          (small sample)
//! score  = min(score × 1.1, 10.0)
//!                if cleaned >= 100             (large sample)
//! score  = clamp(score, 0.0, 10.0)
//! ```
//!
//! The tiny and small penalties are exclusive: a batch of 3 readings is
//! multiplied by 0.4 only.
//!
//! ## Examples
//!
//! | cleaned / original | score |
//! |--------------------|-------|
//! | 2 / 4              | 2.0   |
//! | 8 / 8              | 7.0   |
//! | 50 / 100           | 5.0   |
//! | 150 / 150          | 10.0  |

use core::fmt;

use crate::constants::quality::{
    LARGE_SAMPLE_FACTOR, LARGE_SAMPLE_THRESHOLD, QUALITY_SCORE_MAX, QUALITY_SCORE_MIN,
    SMALL_SAMPLE_FACTOR, SMALL_SAMPLE_THRESHOLD, TINY_SAMPLE_FACTOR, TINY_SAMPLE_THRESHOLD,
};

/// Quality score in `[0.0, 10.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QualityScore(f64);

impl QualityScore {
    /// Lowest possible score
    pub const MIN: Self = Self(QUALITY_SCORE_MIN);

    /// Highest possible score
    pub const MAX: Self = Self(QUALITY_SCORE_MAX);

    /// Score a batch from its cleaned and original sizes
    ///
    /// An empty original batch scores `0.0`.
    pub fn compute(cleaned_count: usize, original_count: usize) -> Self {
        if original_count == 0 {
            return Self::MIN;
        }

        let completeness = cleaned_count.min(original_count) as f64 / original_count as f64;
        let mut score = QUALITY_SCORE_MAX * completeness;

        if cleaned_count < TINY_SAMPLE_THRESHOLD {
            score *= TINY_SAMPLE_FACTOR;
        } else if cleaned_count < SMALL_SAMPLE_THRESHOLD {
            score *= SMALL_SAMPLE_FACTOR;
        }

        if cleaned_count >= LARGE_SAMPLE_THRESHOLD {
            score = (score * LARGE_SAMPLE_FACTOR).min(QUALITY_SCORE_MAX);
        }

        Self(score.clamp(QUALITY_SCORE_MIN, QUALITY_SCORE_MAX))
    }

    /// Raw score value
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<QualityScore> for f64 {
    fn from(score: QualityScore) -> Self {
        score.0
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}/10", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn tiny_batch_takes_stricter_penalty_only() {
        // 2 of 4 survived: 10 × 0.5 × 0.4
        assert!(close(QualityScore::compute(2, 4).value(), 2.0));
        assert!(close(QualityScore::compute(4, 4).value(), 4.0));
    }

    #[test]
    fn small_batch_penalty() {
        assert!(close(QualityScore::compute(5, 5).value(), 7.0));
        assert!(close(QualityScore::compute(9, 9).value(), 7.0));
    }

    #[test]
    fn medium_batch_is_completeness_only() {
        assert!(close(QualityScore::compute(10, 10).value(), 10.0));
        assert!(close(QualityScore::compute(50, 100).value(), 5.0));
        assert!(close(QualityScore::compute(99, 99).value(), 10.0));
    }

    #[test]
    fn large_batch_bonus_is_capped() {
        assert_eq!(QualityScore::compute(150, 150), QualityScore::MAX);
        // 100 of 200: 5.0 × 1.1
        assert!(close(QualityScore::compute(100, 200).value(), 5.5));
    }

    #[test]
    fn degenerate_counts() {
        assert_eq!(QualityScore::compute(0, 0), QualityScore::MIN);
        assert_eq!(QualityScore::compute(0, 10).value(), 0.0);
        // More cleaned than original cannot raise completeness above 1
        assert!(QualityScore::compute(20, 10).value() <= 10.0);
    }

    #[test]
    fn always_in_bounds() {
        for original in 0..=250 {
            for cleaned in 0..=original {
                let score = QualityScore::compute(cleaned, original).value();
                assert!((0.0..=10.0).contains(&score), "{cleaned}/{original} -> {score}");
            }
        }
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(QualityScore::compute(2, 4).to_string(), "2.00/10");
    }
}
