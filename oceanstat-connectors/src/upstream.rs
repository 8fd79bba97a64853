//! Upstream Collector Connector
//!
//! ## Overview
//!
//! The ocean monitoring collection server speaks a small ASCII protocol over
//! TCP. Every message is one frame:
//!
//! ```text
//! TYPE|payload|END
//! ```
//!
//! Frames carry no length prefix and no newline. A reply is read until the
//! `END` terminator appears, a `CONN_ACK` arrives, the peer closes, or 1 KiB
//! has arrived. Collectors that acknowledge without a terminator and keep
//! the socket open are accepted.
//!
//! This client only performs the session handshake. The collector has no
//! query API, so readings are taken from its CSV export
//! (see [`crate::export`]); connecting first confirms the collector is up.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use oceanstat_connectors::{AsyncConnector, upstream::{UpstreamClient, UpstreamConfig}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut upstream = UpstreamClient::new(UpstreamConfig::new("10.0.0.5:8080"));
//! upstream.connect().await?;
//! upstream.disconnect().await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;

use crate::{AsyncConnector, ConnectionStats};

/// Frame terminator
pub const FRAME_END: &str = "END";

/// Field separator
pub const FIELD_SEPARATOR: char = '|';

/// Connection request type
pub const CONN_REQ: &str = "CONN_REQ";

/// Connection acknowledgement type
pub const CONN_ACK: &str = "CONN_ACK";

/// Disconnect request type
pub const DISC_REQ: &str = "DISC_REQ";

/// Largest reply read from the collector
pub const MAX_REPLY_BYTES: usize = 1024;

/// Upstream errors
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Socket error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Operation did not finish in time
    #[error("Upstream timed out after {0:?}")]
    Timeout(Duration),

    /// Collector answered without acknowledging
    #[error("Handshake rejected: {0}")]
    Rejected(String),

    /// Frame could not be parsed
    #[error("Malformed frame: {0}")]
    Malformed(String),

    /// Operation requires an open session
    #[error("Not connected")]
    NotConnected,
}

/// Upstream connection configuration
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Collector address
    pub server_addr: String,
    /// Identifier announced in the handshake
    pub client_id: String,
    /// Connect and read timeout
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new("127.0.0.1:8080")
    }
}

impl UpstreamConfig {
    /// Create configuration for `server_addr`
    pub fn new(server_addr: impl Into<String>) -> Self {
        Self {
            server_addr: server_addr.into(),
            client_id: "OceanStatAnalysisClient".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set the announced client id
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Set timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// One `TYPE|payload|END` frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamMessage {
    /// Message type, e.g. `CONN_REQ`
    pub kind: String,
    /// Payload, possibly empty
    pub payload: String,
}

impl UpstreamMessage {
    /// Create a message
    pub fn new(kind: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: payload.into(),
        }
    }

    /// Handshake opening a session for `client_id`
    pub fn connect_request(client_id: &str) -> Self {
        Self::new(CONN_REQ, client_id)
    }

    /// Session close request
    pub fn disconnect_request() -> Self {
        Self::new(DISC_REQ, "")
    }

    /// Wire form
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parse one frame
    ///
    /// The payload may itself contain separators; only the first and last
    /// fields are structural.
    pub fn parse(frame: &str) -> Result<Self, UpstreamError> {
        let frame = frame.trim();
        let body = frame
            .strip_suffix(FRAME_END)
            .and_then(|rest| rest.strip_suffix(FIELD_SEPARATOR))
            .ok_or_else(|| UpstreamError::Malformed(format!("missing terminator in {frame:?}")))?;

        let (kind, payload) = body
            .split_once(FIELD_SEPARATOR)
            .ok_or_else(|| UpstreamError::Malformed(format!("missing payload field in {frame:?}")))?;

        if kind.is_empty() {
            return Err(UpstreamError::Malformed(format!("missing type in {frame:?}")));
        }
        Ok(Self::new(kind, payload))
    }
}

impl fmt::Display for UpstreamMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.kind,
            self.payload,
            FRAME_END,
            sep = FIELD_SEPARATOR
        )
    }
}

/// Handshake client for the collection server
pub struct UpstreamClient {
    config: UpstreamConfig,
    stream: Option<TcpStream>,
    stats: ConnectionStats,
}

impl UpstreamClient {
    /// Create a disconnected client
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            config,
            stream: None,
            stats: ConnectionStats::default(),
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Send one message and return the raw reply
    pub async fn request(&mut self, message: &UpstreamMessage) -> Result<String, UpstreamError> {
        let timeout = self.config.timeout;
        let stream = self.stream.as_mut().ok_or(UpstreamError::NotConnected)?;
        let frame = message.encode();

        let reply = match time::timeout(timeout, exchange(stream, frame.as_bytes())).await {
            Ok(reply) => reply,
            Err(_) => Err(UpstreamError::Timeout(timeout)),
        };

        match &reply {
            Ok(_) => self.stats.record_sent(frame.len()),
            Err(e) => self.stats.record_failure(e),
        }
        reply
    }
}

async fn exchange(stream: &mut TcpStream, frame: &[u8]) -> Result<String, UpstreamError> {
    stream.write_all(frame).await?;
    stream.flush().await?;

    let mut reply = Vec::with_capacity(MAX_REPLY_BYTES);
    let mut chunk = [0u8; 256];
    while reply.len() < MAX_REPLY_BYTES {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        reply.extend_from_slice(&chunk[..read]);
        if reply_complete(&String::from_utf8_lossy(&reply)) {
            break;
        }
    }
    reply.truncate(MAX_REPLY_BYTES);

    Ok(String::from_utf8_lossy(&reply).into_owned())
}

/// Whether a collector reply needs no further reads
fn reply_complete(text: &str) -> bool {
    text.trim_end().ends_with(FRAME_END) || text.contains(CONN_ACK)
}

#[async_trait::async_trait]
impl AsyncConnector for UpstreamClient {
    type Error = UpstreamError;

    async fn connect(&mut self) -> Result<(), UpstreamError> {
        let timeout = self.config.timeout;
        let stream = time::timeout(timeout, TcpStream::connect(&self.config.server_addr))
            .await
            .map_err(|_| UpstreamError::Timeout(timeout))??;
        self.stream = Some(stream);

        let request = UpstreamMessage::connect_request(&self.config.client_id);
        let reply = match self.request(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                self.stream = None;
                return Err(e);
            }
        };
        log::info!("Collector response: {}", reply.trim());

        if !reply.contains(CONN_ACK) {
            self.stream = None;
            self.stats.record_failure("handshake not acknowledged");
            return Err(UpstreamError::Rejected(reply.trim().to_string()));
        }

        log::info!(
            "Connected to collector at {} as {}",
            self.config.server_addr,
            self.config.client_id
        );
        self.stats.connections += 1;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), UpstreamError> {
        if self.stream.is_none() {
            return Ok(());
        }

        let result = self.request(&UpstreamMessage::disconnect_request()).await;
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.shutdown().await;
        }

        match result {
            Ok(reply) => {
                log::info!("Disconnect response: {}", reply.trim());
                Ok(())
            }
            Err(e) => {
                log::warn!("Error during disconnect: {}", e);
                Err(e)
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn stats(&self) -> ConnectionStats {
        self.stats.clone()
    }
}
