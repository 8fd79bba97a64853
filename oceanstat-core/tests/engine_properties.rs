//! Property tests for the analysis engine
//!
//! Invariants that must hold for every batch, not just hand-picked ones.

use oceanstat_core::{AnalysisRequest, Analyzer, ErrorKind, StatisticsEngine};
use proptest::prelude::*;

/// Finite readings in a range whose sums and squares cannot overflow
fn reading() -> impl Strategy<Value = f64> {
    -1.0e9..1.0e9_f64
}

/// Any reading, including NaN and both infinities
fn raw_reading() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => reading(),
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

fn analyze(values: Vec<f64>) -> Result<oceanstat_core::AnalysisReport, oceanstat_core::AnalysisError> {
    StatisticsEngine::new().analyze(&AnalysisRequest::new("temperature", values))
}

proptest! {
    #[test]
    fn prop_ordering_invariants(values in prop::collection::vec(reading(), 1..300)) {
        let result = analyze(values).unwrap().result;
        prop_assert!(result.min <= result.average && result.average <= result.max);
        prop_assert!(result.min <= result.median && result.median <= result.max);
        prop_assert!(result.std_dev >= 0.0);
    }

    #[test]
    fn prop_single_reading_has_zero_std_dev(value in reading()) {
        let result = analyze(vec![value]).unwrap().result;
        prop_assert_eq!(result.std_dev, 0.0);
        prop_assert_eq!(result.count, 1);
        prop_assert_eq!(result.median, value);
    }

    #[test]
    fn prop_quality_in_bounds(values in prop::collection::vec(raw_reading(), 1..300)) {
        if let Ok(report) = analyze(values) {
            let q = report.quality.value();
            prop_assert!((0.0..=10.0).contains(&q));
        }
    }

    #[test]
    fn prop_counts_add_up(values in prop::collection::vec(raw_reading(), 1..300)) {
        let total = values.len();
        let non_finite = values.iter().filter(|v| !v.is_finite()).count();
        match analyze(values) {
            Ok(report) => {
                prop_assert_eq!(report.discarded, non_finite);
                prop_assert_eq!(report.result.count + report.discarded, total);
            }
            Err(err) => {
                prop_assert_eq!(non_finite, total);
                prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            }
        }
    }

    #[test]
    fn prop_all_non_finite_is_invalid_argument(
        values in prop::collection::vec(
            prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)],
            1..50,
        )
    ) {
        let err = analyze(values).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        prop_assert_eq!(err.detail(), "no valid values after cleaning");
    }

    #[test]
    fn prop_idempotent(values in prop::collection::vec(raw_reading(), 0..200)) {
        let first = analyze(values.clone());
        let second = analyze(values);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.result.average.to_bits(), b.result.average.to_bits());
                prop_assert_eq!(a.result.median.to_bits(), b.result.median.to_bits());
                prop_assert_eq!(a.result.std_dev.to_bits(), b.result.std_dev.to_bits());
                prop_assert_eq!(a.result.min.to_bits(), b.result.min.to_bits());
                prop_assert_eq!(a.result.max.to_bits(), b.result.max.to_bits());
                prop_assert_eq!(a.quality.value().to_bits(), b.quality.value().to_bits());
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "diverged: {:?} vs {:?}", a, b),
        }
    }

    #[test]
    fn prop_order_does_not_matter(mut values in prop::collection::vec(reading(), 1..100)) {
        let forward = analyze(values.clone()).unwrap().result;
        values.reverse();
        let backward = analyze(values).unwrap().result;
        prop_assert_eq!(forward.median, backward.median);
        prop_assert_eq!(forward.min, backward.min);
        prop_assert_eq!(forward.max, backward.max);
    }
}

#[test]
fn empty_batch_is_invalid_argument() {
    let err = analyze(Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.detail(), "no values provided");
}
