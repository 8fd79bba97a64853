//! Error Types for Analysis Failures
//!
//! ## Design
//!
//! Analysis errors follow the same rules as every other hot-path type in
//! this crate:
//!
//! 1. **Small and `Copy`**: one discriminant plus a `&'static str` detail.
//!    No heap allocation, so the engine stays usable without `std`.
//!
//! 2. **Two kinds only**: the transport maps [`ErrorKind`] straight onto its
//!    status codes, and the detail text is surfaced to the caller verbatim.
//!
//! ## Error Categories
//!
//! ### Caller input
//! - `InvalidArgument`: the batch was empty, or nothing finite was left
//!   after cleaning. The caller can fix it and resubmit.
//!
//! ### Engine faults
//! - `Internal`: arithmetic went somewhere the input checks did not
//!   anticipate (e.g. a standard deviation beyond `f64::MAX`).
//!   Treat it as a bug signal, not as something to retry.
//!
//! ```rust
//! use oceanstat_core::{AnalysisError, AnalysisRequest, Analyzer, ErrorKind, StatisticsEngine};
//!
//! let engine = StatisticsEngine::new();
//! let request = AnalysisRequest::new("humidity", Vec::new());
//!
//! match engine.analyze(&request) {
//!     Ok(report) => println!("quality {}", report.quality),
//!     Err(e) if e.kind() == ErrorKind::InvalidArgument => {
//!         // Resubmit with data
//!         assert_eq!(e.detail(), "no values provided");
//!     }
//!     Err(e) => panic!("engine fault: {e}"),
//! }
//! ```

use core::fmt;

use thiserror_no_std::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, AnalysisError>;

/// Detail for a batch with no readings at all
pub const DETAIL_NO_VALUES: &str = "no values provided";

/// Detail for a batch whose readings were all NaN or infinite
pub const DETAIL_NO_VALID_VALUES: &str = "no valid values after cleaning";

/// Analysis errors - kept small so they can be returned by value
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisError {
    /// Caller supplied a batch the engine cannot analyze
    #[error("invalid argument: {detail}")]
    InvalidArgument {
        /// Human-readable reason, surfaced to the caller unchanged
        detail: &'static str,
    },

    /// Unexpected numeric fault inside the engine
    #[error("internal error: {detail}")]
    Internal {
        /// Human-readable description of the fault
        detail: &'static str,
    },
}

/// Machine-readable error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ErrorKind {
    /// Bad input, fixable by the caller
    InvalidArgument,
    /// Engine fault
    Internal,
}

impl AnalysisError {
    /// Empty batch
    pub const fn no_values() -> Self {
        Self::InvalidArgument { detail: DETAIL_NO_VALUES }
    }

    /// Batch reduced to nothing by cleaning
    pub const fn no_valid_values() -> Self {
        Self::InvalidArgument { detail: DETAIL_NO_VALID_VALUES }
    }

    /// Numeric fault with the given description
    pub const fn internal(detail: &'static str) -> Self {
        Self::Internal { detail }
    }

    /// Machine-readable kind of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Detail text without the kind prefix
    pub const fn detail(&self) -> &'static str {
        match self {
            Self::InvalidArgument { detail } | Self::Internal { detail } => *detail,
        }
    }

    /// Whether the caller can fix the failure by changing its input
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => f.write_str("INVALID_ARGUMENT"),
            Self::Internal => f.write_str("INTERNAL"),
        }
    }
}
