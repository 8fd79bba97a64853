//! Coefficient-of-Variation Bands
//!
//! CV = `std_dev / average × 100`. Used only when describing a result to a
//! human; the engine never looks at these.

/// Below this CV (%) readings are considered consistent.
pub const CV_LOW_PCT: f64 = 10.0;

/// Below this CV (%) variability is moderate; at or above it, high.
pub const CV_MODERATE_PCT: f64 = 30.0;
