//! Data-Type Vocabulary and Typical Ranges
//!
//! Labels as emitted by the ocean monitoring collectors. The engine accepts
//! any label; these only drive [`DataType`](crate::DataType) parsing and the
//! test-data generators.

// ===== LABELS =====

/// Water or air temperature readings.
pub const DATA_TYPE_TEMPERATURE: &str = "temperature";

/// Relative humidity readings.
pub const DATA_TYPE_HUMIDITY: &str = "humidity";

/// Water level readings.
pub const DATA_TYPE_WATER_LEVEL: &str = "waterLevel";

/// Wind speed readings.
pub const DATA_TYPE_WIND_SPEED: &str = "windSpeed";

// ===== TYPICAL RANGES =====

/// Typical temperature range at buoy depth (°C).
pub const TEMPERATURE_RANGE_C: (f64, f64) = (0.0, 30.0);

/// Typical relative humidity range over open water (%).
pub const HUMIDITY_RANGE_PCT: (f64, f64) = (30.0, 100.0);

/// Typical water level range at coastal gauges (m).
pub const WATER_LEVEL_RANGE_M: (f64, f64) = (0.0, 10.0);

/// Typical wind speed range including storm conditions (km/h).
pub const WIND_SPEED_RANGE_KMH: (f64, f64) = (0.0, 150.0);
