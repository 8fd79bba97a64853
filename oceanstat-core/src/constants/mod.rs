//! Constants for OceanStat Core
//!
//! Every numeric threshold the engine and its presentation layer use lives
//! here, next to the reasoning behind it.
//!
//! ## Organization
//!
//! - **Quality**: quality-score scale, sample-size penalties and bonus
//! - **Sensors**: the data-type vocabulary and typical reading ranges
//! - **Variability**: coefficient-of-variation bands for reports

/// Quality-score scale and sample-size thresholds.
pub mod quality;

/// Data-type labels and typical physical ranges per label.
pub mod sensors;

/// Coefficient-of-variation bands used to describe spread.
pub mod variability;

// Re-export commonly used constants for convenience
pub use quality::{
    QUALITY_SCORE_MAX, QUALITY_SCORE_MIN, LARGE_SAMPLE_THRESHOLD, SMALL_SAMPLE_THRESHOLD,
    TINY_SAMPLE_THRESHOLD,
};

pub use sensors::{DATA_TYPE_HUMIDITY, DATA_TYPE_TEMPERATURE, DATA_TYPE_WATER_LEVEL, DATA_TYPE_WIND_SPEED};

pub use variability::{CV_LOW_PCT, CV_MODERATE_PCT};
