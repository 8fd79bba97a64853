//! Statistics & Quality Engine
//!
//! ## Pipeline
//!
//! ```text
//! AnalysisRequest
//!   │ empty?                 ──► InvalidArgument("no values provided")
//!   ▼
//! clean()  ─► CleanedBatch { values, discarded }
//!   │ nothing left?          ──► InvalidArgument("no valid values after cleaning")
//!   ▼
//! AnalysisResult::from_values()   (spread beyond f64 ──► Internal)
//!   ▼
//! QualityScore::compute(cleaned, original)
//!   ▼
//! AnalysisReport { result, quality, discarded }
//! ```
//!
//! The engine holds no state. One instance can be shared across any number
//! of threads, and two calls with the same batch return bit-identical
//! reports.

use crate::cleaner::clean;
use crate::errors::{AnalysisError, EngineResult};
use crate::quality::QualityScore;
use crate::request::AnalysisRequest;
use crate::stats::AnalysisResult;
use crate::traits::Analyzer;

/// Successful analysis of one batch
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisReport {
    /// Descriptive statistics over the cleaned batch
    pub result: AnalysisResult,
    /// Completeness and volume score
    pub quality: QualityScore,
    /// Readings dropped as NaN or infinite
    pub discarded: usize,
}

/// Default analyzer: clean, describe, score
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsEngine;

impl StatisticsEngine {
    /// Create an engine
    pub const fn new() -> Self {
        Self
    }
}

impl Analyzer for StatisticsEngine {
    fn analyze(&self, request: &AnalysisRequest) -> EngineResult<AnalysisReport> {
        log_info!(
            "Analyzing {} data with {} values",
            request.data_type,
            request.values.len()
        );

        if request.is_empty() {
            return Err(AnalysisError::no_values());
        }

        let batch = clean(&request.values);
        if batch.discarded > 0 {
            log_warn!(
                "Discarded {} non-finite {} readings of {}",
                batch.discarded,
                request.data_type,
                batch.original_len()
            );
        }
        if batch.is_empty() {
            return Err(AnalysisError::no_valid_values());
        }

        let result = AnalysisResult::from_values(&batch.values)?;
        let quality = QualityScore::compute(batch.len(), batch.original_len());

        log_info!(
            "Analysis complete for {}: avg={:.2}, min={:.2}, max={:.2}, std_dev={:.2}, quality={}",
            request.data_type,
            result.average,
            result.min,
            result.max,
            result.std_dev,
            quality
        );

        Ok(AnalysisReport {
            result,
            quality,
            discarded: batch.discarded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use alloc::vec;
    use alloc::vec::Vec;

    fn analyze(values: Vec<f64>) -> EngineResult<AnalysisReport> {
        StatisticsEngine::new().analyze(&AnalysisRequest::new("temperature", values))
    }

    #[test]
    fn empty_batch_fails_before_cleaning() {
        let err = analyze(Vec::new()).unwrap_err();
        assert_eq!(err, AnalysisError::no_values());
    }

    #[test]
    fn all_non_finite_fails_after_cleaning() {
        let err = analyze(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.detail(), "no valid values after cleaning");
    }

    #[test]
    fn mixed_batch_is_cleaned_and_scored() {
        let report = analyze(vec![5.0, f64::NAN, 7.0, f64::INFINITY]).unwrap();
        assert_eq!(report.result.average, 6.0);
        assert_eq!(report.result.median, 6.0);
        assert_eq!(report.result.min, 5.0);
        assert_eq!(report.result.max, 7.0);
        assert_eq!(report.result.count, 2);
        assert_eq!(report.discarded, 2);
        assert!((report.quality.value() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn extreme_finite_readings_are_retained() {
        let report = analyze(vec![1e308, 1e308]).unwrap();
        assert_eq!(report.result.average, 1e308);
        assert_eq!(report.result.count, 2);
        assert_eq!(report.discarded, 0);
    }

    #[test]
    fn unrepresentable_spread_is_internal_not_zero() {
        let err = analyze(vec![-f64::MAX, f64::MAX]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn unknown_labels_are_analyzed() {
        let request = AnalysisRequest::new("salinity", vec![34.0, 35.0, 36.0]);
        let report = StatisticsEngine::new().analyze(&request).unwrap();
        assert_eq!(report.result.median, 35.0);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let values = vec![3.25, -1.5, 8.0, 0.0, 12.75, f64::NAN];
        let first = analyze(values.clone()).unwrap();
        let second = analyze(values).unwrap();
        assert_eq!(first.result.average.to_bits(), second.result.average.to_bits());
        assert_eq!(first.result.std_dev.to_bits(), second.result.std_dev.to_bits());
        assert_eq!(first.quality.value().to_bits(), second.quality.value().to_bits());
    }
}
