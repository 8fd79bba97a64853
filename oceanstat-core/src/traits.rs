//! Core traits for the analysis engine and its data sources
//!
//! Kept deliberately small: one trait for anything that can analyze a
//! batch, one for anything that can supply batches, and a helper for
//! deciding which readings are usable at all.

use crate::engine::AnalysisReport;
use crate::errors::EngineResult;
use crate::records::ReadingsByType;
use crate::request::AnalysisRequest;

/// Anything that turns a request into a report
///
/// Implementations must be stateless across calls: the service host shares
/// one analyzer between all workers and gives no ordering guarantees.
pub trait Analyzer {
    /// Analyze one batch
    fn analyze(&self, request: &AnalysisRequest) -> EngineResult<AnalysisReport>;
}

/// Source of readings grouped by data type
///
/// Upstream collectors (CSV exports, collection servers, generators) are
/// adapted behind this trait so the engine never performs I/O itself.
pub trait DataSource {
    /// Error raised while fetching readings
    type Error;

    /// Fetch all readings currently available, grouped by data-type label
    fn readings(&mut self) -> Result<ReadingsByType, Self::Error>;
}

/// Trait for values that can be checked for usability
pub trait Validatable {
    /// Check if the value is usable for statistics (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
