//! Wire format for the analysis RPC
//!
//! ## Framing
//!
//! One JSON document per line, UTF-8, terminated by `\n`. Frames longer than
//! the configured limit are rejected with `RESOURCE_EXHAUSTED` and the
//! connection is closed.
//!
//! ## Request
//!
//! ```json
//! {"id":7,"method":"AnalyzeSensorData","params":{"data_type":"temperature","values":[18.5,"NaN",19.0]}}
//! ```
//!
//! JSON has no literal for NaN or the infinities, so `values` accepts the
//! strings `"NaN"`, `"Infinity"` and `"-Infinity"` (and `null` as NaN).
//! Encoders emit the strings; finite readings are plain numbers.
//!
//! ## Reply
//!
//! ```json
//! {"status":"ok","id":7,"result":{"average":18.75,"min":18.5,"max":19.0,"std_dev":0.35,"count":2,"median":18.75,"quality_score":2.67,"discarded":1}}
//! {"status":"error","id":7,"code":"INVALID_ARGUMENT","detail":"no values provided"}
//! ```
//!
//! A reply is either a complete result or an error, never both.

use std::fmt;

use oceanstat_core::{AnalysisReport, AnalysisResult, ErrorKind};
use serde::{Deserialize, Serialize};

/// Name of the only method the service implements
pub const METHOD_ANALYZE: &str = "AnalyzeSensorData";

/// Default upper bound on a single frame, in bytes
pub const DEFAULT_MAX_FRAME_BYTES: usize = 4 * 1024 * 1024;

/// Status codes carried by error replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    /// Caller sent an unusable batch or a malformed frame
    InvalidArgument,
    /// Engine or host fault
    Internal,
    /// Method not implemented by this service
    Unimplemented,
    /// Frame exceeded the size limit
    ResourceExhausted,
}

impl From<ErrorKind> for StatusCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidArgument => Self::InvalidArgument,
            ErrorKind::Internal => Self::Internal,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::Internal => "INTERNAL",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
        })
    }
}

/// Request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestFrame {
    /// Correlation id echoed in the reply
    #[serde(default)]
    pub id: u64,
    /// Method name
    pub method: String,
    /// Method parameters
    #[serde(default)]
    pub params: serde_json::Value,
}

impl RequestFrame {
    /// Envelope for an `AnalyzeSensorData` call
    pub fn analyze(id: u64, request: &SensorDataRequest) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id,
            method: METHOD_ANALYZE.to_string(),
            params: serde_json::to_value(request)?,
        })
    }
}

/// Parameters of `AnalyzeSensorData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDataRequest {
    /// Data-type label
    pub data_type: String,
    /// Raw readings, non-finite values included
    #[serde(default, with = "lossless_f64")]
    pub values: Vec<f64>,
}

/// Successful result of `AnalyzeSensorData`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorDataAnalysisResponse {
    /// Arithmetic mean
    pub average: f64,
    /// Smallest reading
    pub min: f64,
    /// Largest reading
    pub max: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Number of readings after cleaning
    pub count: u64,
    /// Median
    pub median: f64,
    /// Quality score, 0-10
    pub quality_score: f64,
    /// Readings dropped as NaN or infinite
    #[serde(default)]
    pub discarded: u64,
}

impl From<&AnalysisReport> for SensorDataAnalysisResponse {
    fn from(report: &AnalysisReport) -> Self {
        let result = &report.result;
        Self {
            average: result.average,
            min: result.min,
            max: result.max,
            std_dev: result.std_dev,
            count: result.count as u64,
            median: result.median,
            quality_score: report.quality.value(),
            discarded: report.discarded as u64,
        }
    }
}

impl SensorDataAnalysisResponse {
    /// Statistical fields as a core result, for presentation helpers
    pub fn statistics(&self) -> AnalysisResult {
        AnalysisResult {
            average: self.average,
            min: self.min,
            max: self.max,
            std_dev: self.std_dev,
            count: usize::try_from(self.count).unwrap_or(usize::MAX),
            median: self.median,
        }
    }
}

/// Reply envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reply {
    /// Complete result
    Ok {
        /// Correlation id of the request
        id: u64,
        /// Statistics and quality score
        result: SensorDataAnalysisResponse,
    },
    /// Failure with status code and detail
    Error {
        /// Correlation id of the request, `0` if it could not be read
        id: u64,
        /// Machine-readable status
        code: StatusCode,
        /// Human-readable detail
        detail: String,
    },
}

impl Reply {
    /// Error reply
    pub fn error(id: u64, code: StatusCode, detail: impl Into<String>) -> Self {
        Self::Error {
            id,
            code,
            detail: detail.into(),
        }
    }

    /// Correlation id
    pub fn id(&self) -> u64 {
        match self {
            Self::Ok { id, .. } | Self::Error { id, .. } => *id,
        }
    }
}

/// Serialize a message as one frame, newline included
pub fn encode_frame<T: Serialize>(message: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = serde_json::to_vec(message)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Lossless (de)serialization of `f64` sequences through JSON
pub mod lossless_f64 {
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Encoding of NaN
    pub const NAN: &str = "NaN";
    /// Encoding of +∞
    pub const INFINITY: &str = "Infinity";
    /// Encoding of -∞
    pub const NEG_INFINITY: &str = "-Infinity";

    struct Reading(f64);

    impl Serialize for Reading {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let value = self.0;
            if value.is_finite() {
                serializer.serialize_f64(value)
            } else if value.is_nan() {
                serializer.serialize_str(NAN)
            } else if value > 0.0 {
                serializer.serialize_str(INFINITY)
            } else {
                serializer.serialize_str(NEG_INFINITY)
            }
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireReading {
        Number(f64),
        Text(String),
    }

    /// Parse a textual reading
    pub fn parse_text(text: &str) -> Option<f64> {
        match text.trim() {
            NAN | "nan" => Some(f64::NAN),
            INFINITY | "+Infinity" | "inf" => Some(f64::INFINITY),
            NEG_INFINITY | "-inf" => Some(f64::NEG_INFINITY),
            other => other.parse().ok(),
        }
    }

    /// Serialize readings, non-finite ones as strings
    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for &value in values {
            seq.serialize_element(&Reading(value))?;
        }
        seq.end()
    }

    /// Deserialize readings from numbers, strings or nulls
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let raw: Vec<Option<WireReading>> = Vec::deserialize(deserializer)?;
        raw.into_iter()
            .map(|reading| match reading {
                None => Ok(f64::NAN),
                Some(WireReading::Number(value)) => Ok(value),
                Some(WireReading::Text(text)) => parse_text(&text)
                    .ok_or_else(|| D::Error::custom(format!("invalid reading {text:?}"))),
            })
            .collect()
    }
}
