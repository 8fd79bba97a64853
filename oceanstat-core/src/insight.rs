//! Human-readable interpretation of a result
//!
//! Presentation only. Everything here is derived from a finished
//! [`AnalysisResult`]; the engine never consults it.

use core::fmt;

use crate::constants::variability::{CV_LOW_PCT, CV_MODERATE_PCT};
use crate::stats::AnalysisResult;

/// How much readings vary relative to their mean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variability {
    /// CV below 10 %
    Low,
    /// CV from 10 % up to 30 %
    Moderate,
    /// CV of 30 % or more
    High,
}

impl Variability {
    /// Classify a coefficient of variation given in percent
    pub fn from_cv(cv_pct: f64) -> Self {
        if cv_pct < CV_LOW_PCT {
            Self::Low
        } else if cv_pct < CV_MODERATE_PCT {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// Sentence used in reports
    pub fn description(self) -> &'static str {
        match self {
            Self::Low => "Low variability (consistent readings)",
            Self::Moderate => "Moderate variability",
            Self::High => "High variability (readings vary significantly)",
        }
    }
}

impl fmt::Display for Variability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Derived figures for reporting a result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insight {
    /// `max - min`
    pub range: f64,
    /// `std_dev / average × 100`, or `0.0` when the average is zero
    pub coefficient_of_variation: f64,
    /// Band the coefficient falls in
    pub variability: Variability,
}

impl Insight {
    /// Derive reporting figures from a result
    pub fn from_result(result: &AnalysisResult) -> Self {
        let coefficient_of_variation = if result.average != 0.0 {
            result.std_dev / result.average * 100.0
        } else {
            0.0
        };

        Self {
            range: result.range(),
            coefficient_of_variation,
            variability: Variability::from_cv(coefficient_of_variation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(average: f64, std_dev: f64) -> AnalysisResult {
        AnalysisResult {
            average,
            min: average - 1.0,
            max: average + 1.0,
            std_dev,
            count: 10,
            median: average,
        }
    }

    #[test]
    fn bands() {
        assert_eq!(Variability::from_cv(0.0), Variability::Low);
        assert_eq!(Variability::from_cv(9.99), Variability::Low);
        assert_eq!(Variability::from_cv(10.0), Variability::Moderate);
        assert_eq!(Variability::from_cv(29.9), Variability::Moderate);
        assert_eq!(Variability::from_cv(30.0), Variability::High);
    }

    #[test]
    fn coefficient_of_variation() {
        let insight = Insight::from_result(&result(20.0, 10.0));
        assert_eq!(insight.coefficient_of_variation, 50.0);
        assert_eq!(insight.variability, Variability::High);
        assert_eq!(insight.range, 2.0);
    }

    #[test]
    fn zero_average_has_zero_cv() {
        let insight = Insight::from_result(&result(0.0, 3.0));
        assert_eq!(insight.coefficient_of_variation, 0.0);
        assert_eq!(insight.variability, Variability::Low);
    }
}
