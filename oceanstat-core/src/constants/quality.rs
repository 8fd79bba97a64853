//! Quality Score Scale and Sample-Size Thresholds
//!
//! The quality score summarizes how complete and how large a batch is. It
//! starts at [`QUALITY_SCORE_MAX`], is scaled by the fraction of readings
//! that survived cleaning, then adjusted for sample size.

// ===== SCALE =====

/// Upper bound of the quality score, also the starting value.
pub const QUALITY_SCORE_MAX: f64 = 10.0;

/// Lower bound of the quality score.
pub const QUALITY_SCORE_MIN: f64 = 0.0;

// ===== SAMPLE-SIZE PENALTIES =====

/// Batches with fewer cleaned readings than this are "small".
///
/// Descriptive statistics over a handful of readings say little about the
/// sensor, so the score is damped.
pub const SMALL_SAMPLE_THRESHOLD: usize = 10;

/// Multiplier applied to small batches.
pub const SMALL_SAMPLE_FACTOR: f64 = 0.7;

/// Batches with fewer cleaned readings than this are "tiny".
///
/// Takes precedence over the small-sample penalty; the two never stack.
pub const TINY_SAMPLE_THRESHOLD: usize = 5;

/// Multiplier applied to tiny batches.
pub const TINY_SAMPLE_FACTOR: f64 = 0.4;

// ===== SAMPLE-SIZE BONUS =====

/// Batches with at least this many cleaned readings earn a bonus.
pub const LARGE_SAMPLE_THRESHOLD: usize = 100;

/// Multiplier applied to large batches before clamping to the maximum.
pub const LARGE_SAMPLE_FACTOR: f64 = 1.1;
