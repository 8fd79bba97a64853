//! Analysis requests and data-type labels

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::constants::sensors::{
    DATA_TYPE_HUMIDITY, DATA_TYPE_TEMPERATURE, DATA_TYPE_WATER_LEVEL, DATA_TYPE_WIND_SPEED,
    HUMIDITY_RANGE_PCT, TEMPERATURE_RANGE_C, WATER_LEVEL_RANGE_M, WIND_SPEED_RANGE_KMH,
};

/// One batch of readings submitted for analysis
///
/// The label is free-form. Known labels map to a [`DataType`] variant, but
/// an unknown label is analyzed exactly like a known one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisRequest {
    /// Sensor data-type label, e.g. `"temperature"`
    pub data_type: String,
    /// Raw readings in arrival order; may contain NaN or infinities
    pub values: Vec<f64>,
}

impl AnalysisRequest {
    /// Create a request from a label and readings
    pub fn new(data_type: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            data_type: data_type.into(),
            values,
        }
    }

    /// Parsed data type; never fails, unknown labels become [`DataType::Other`]
    pub fn kind(&self) -> DataType {
        DataType::from_label(&self.data_type)
    }

    /// Number of raw readings, before cleaning
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the batch has no readings at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sensor data types known to the ocean monitoring network
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Temperature in °C
    Temperature,
    /// Relative humidity in %
    Humidity,
    /// Water level in m
    WaterLevel,
    /// Wind speed in km/h
    WindSpeed,
    /// Any other label, kept verbatim
    Other(String),
}

impl DataType {
    /// Map a label to a data type; matching is exact
    pub fn from_label(label: &str) -> Self {
        match label {
            DATA_TYPE_TEMPERATURE => Self::Temperature,
            DATA_TYPE_HUMIDITY => Self::Humidity,
            DATA_TYPE_WATER_LEVEL => Self::WaterLevel,
            DATA_TYPE_WIND_SPEED => Self::WindSpeed,
            other => Self::Other(String::from(other)),
        }
    }

    /// Label as it appears on the wire and in exports
    pub fn label(&self) -> &str {
        match self {
            Self::Temperature => DATA_TYPE_TEMPERATURE,
            Self::Humidity => DATA_TYPE_HUMIDITY,
            Self::WaterLevel => DATA_TYPE_WATER_LEVEL,
            Self::WindSpeed => DATA_TYPE_WIND_SPEED,
            Self::Other(label) => label,
        }
    }

    /// Typical `(min, max)` reading range, if the type is known
    pub fn typical_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Temperature => Some(TEMPERATURE_RANGE_C),
            Self::Humidity => Some(HUMIDITY_RANGE_PCT),
            Self::WaterLevel => Some(WATER_LEVEL_RANGE_M),
            Self::WindSpeed => Some(WIND_SPEED_RANGE_KMH),
            Self::Other(_) => None,
        }
    }

    /// The four data types the collectors emit
    pub fn known() -> [DataType; 4] {
        [Self::Temperature, Self::Humidity, Self::WaterLevel, Self::WindSpeed]
    }
}

impl FromStr for DataType {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
