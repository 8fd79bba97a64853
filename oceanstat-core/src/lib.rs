//! Core analysis engine for OceanStat
//!
//! Turns a batch of raw sensor readings into descriptive statistics and a
//! data-quality score. Each call is a pure function of its batch: no shared
//! state, no I/O, no hidden randomness.
//!
//! Processing order:
//! - Reject empty batches
//! - Drop non-finite readings (NaN, ±infinity)
//! - Reject batches that are empty after cleaning
//! - Compute mean, extrema, count, median and sample standard deviation
//! - Score completeness and volume on a 0-10 scale
//!
//! ```
//! use oceanstat_core::{AnalysisRequest, Analyzer, StatisticsEngine};
//!
//! let engine = StatisticsEngine::new();
//! let request = AnalysisRequest::new("temperature", vec![10.0, 20.0, 30.0]);
//!
//! let report = engine.analyze(&request).unwrap();
//! assert_eq!(report.result.average, 20.0);
//! assert_eq!(report.result.std_dev, 10.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Optional logging; compiles away without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod cleaner;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod insight;
pub mod quality;
pub mod records;
pub mod request;
pub mod stats;
pub mod traits;

// Public API
pub use cleaner::{clean, CleanedBatch};
pub use engine::{AnalysisReport, StatisticsEngine};
pub use errors::{AnalysisError, EngineResult, ErrorKind};
pub use insight::{Insight, Variability};
pub use quality::QualityScore;
pub use records::{ReadingsByType, SensorRecord};
pub use request::{AnalysisRequest, DataType};
pub use stats::AnalysisResult;
pub use traits::{Analyzer, DataSource, Validatable};

/// Crate version, reported by the service host on startup
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
