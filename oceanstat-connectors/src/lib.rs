//! Protocol Connectors for the OceanStat Service
//!
//! ## Overview
//!
//! The analysis engine in `oceanstat-core` performs no I/O. Everything that
//! touches a socket or a file lives here:
//!
//! - [`rpc`]: the `AnalyzeSensorData` service and its client
//! - [`upstream`]: the handshake with the ocean monitoring collection server
//! - [`export`]: the CSV export that server writes
//!
//! ### Analysis RPC
//!
//! **Transport:** TCP, newline-delimited JSON frames (see [`protocol`]).
//!
//! **Characteristics:**
//! - One request in flight per connection; replies come back in order
//! - Concurrency across connections bounded by a fixed worker pool
//! - Non-finite readings survive the wire as `"NaN"`, `"Infinity"`,
//!   `"-Infinity"`
//! - Failures carry a status code and the engine's detail text verbatim
//!
//! ### Upstream collector
//!
//! **Transport:** TCP, ASCII frames `TYPE|payload|END`.
//!
//! ```text
//! client                       collector
//!   │ CONN_REQ|<client id>|END   │
//!   │ ─────────────────────────► │
//!   │           CONN_ACK|...|END │
//!   │ ◄───────────────────────── │
//!   │ DISC_REQ||END              │
//!   │ ─────────────────────────► │
//! ```
//!
//! The collector has no query API; readings are taken from its CSV export.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use oceanstat_connectors::{AsyncConnector, rpc::{AnalysisClient, ClientConfig}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = AnalysisClient::new(ClientConfig::new("127.0.0.1:50052"));
//! client.connect().await?;
//!
//! let reply = client.analyze("temperature", &[18.5, 19.0, f64::NAN]).await?;
//! println!("avg={:.2} quality={:.1}", reply.average, reply.quality_score);
//!
//! client.disconnect().await?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "rpc")]
pub mod protocol;

#[cfg(feature = "rpc")]
pub mod rpc;

#[cfg(feature = "upstream")]
pub mod upstream;

#[cfg(feature = "export")]
pub mod export;

// Re-export common types
#[cfg(feature = "rpc")]
pub use protocol::{Reply, SensorDataAnalysisResponse, SensorDataRequest, StatusCode};

#[cfg(feature = "rpc")]
pub use rpc::{AnalysisClient, AnalysisServer, ClientConfig, ClientError, ServerConfig, ServerError};

#[cfg(feature = "upstream")]
pub use upstream::{UpstreamClient, UpstreamConfig, UpstreamError, UpstreamMessage};

#[cfg(feature = "export")]
pub use export::{CsvExportSource, ExportError, ExportStats};

/// Trait for connection-oriented connectors
#[async_trait::async_trait]
pub trait AsyncConnector: Send {
    /// Error raised by connection management
    type Error;

    /// Open the connection, performing any handshake
    async fn connect(&mut self) -> Result<(), Self::Error>;

    /// Close the connection gracefully
    async fn disconnect(&mut self) -> Result<(), Self::Error>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Get connection statistics
    fn stats(&self) -> ConnectionStats;
}

/// Connection statistics common to all connectors
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConnectionStats {
    /// Total messages sent successfully
    pub messages_sent: u64,
    /// Total messages that failed or were answered with an error
    pub messages_failed: u64,
    /// Total bytes sent
    pub bytes_sent: u64,
    /// Number of times the connection was (re)opened
    pub connections: u32,
    /// Last error message
    pub last_error: Option<String>,
}

impl ConnectionStats {
    pub(crate) fn record_sent(&mut self, bytes: usize) {
        self.messages_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    pub(crate) fn record_failure(&mut self, error: impl ToString) {
        self.messages_failed += 1;
        self.last_error = Some(error.to_string());
    }
}
