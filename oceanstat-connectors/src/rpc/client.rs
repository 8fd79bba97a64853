use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time;

use super::{read_frame, Frame};
use crate::protocol::{
    encode_frame, Reply, RequestFrame, SensorDataAnalysisResponse, SensorDataRequest, StatusCode,
    DEFAULT_MAX_FRAME_BYTES,
};
use crate::{AsyncConnector, ConnectionStats};

/// Client-side errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Socket error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No reply within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// `analyze` called before `connect`
    #[error("Not connected")]
    NotConnected,

    /// Reply could not be understood
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Server answered with an error status
    #[error("{code}: {detail}")]
    Status { code: StatusCode, detail: String },

    /// Request could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// Status code of an error reply, if this is one
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server address
    pub server_addr: String,
    /// Connect and per-request timeout
    pub timeout: Duration,
    /// Largest accepted reply frame, in bytes
    pub max_frame_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("127.0.0.1:50052")
    }
}

impl ClientConfig {
    /// Create configuration for `server_addr`
    pub fn new(server_addr: impl Into<String>) -> Self {
        Self {
            server_addr: server_addr.into(),
            timeout: Duration::from_secs(30),
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }

    /// Set timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set maximum reply size in bytes
    pub fn max_frame_bytes(mut self, bytes: usize) -> Self {
        self.max_frame_bytes = bytes;
        self
    }
}

/// Caller of `AnalyzeSensorData`
pub struct AnalysisClient {
    config: ClientConfig,
    stream: Option<BufReader<TcpStream>>,
    next_id: u64,
    stats: ConnectionStats,
}

impl AnalysisClient {
    /// Create a disconnected client
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            stream: None,
            next_id: 1,
            stats: ConnectionStats::default(),
        }
    }

    /// Analyze one batch
    ///
    /// An error reply from the server becomes [`ClientError::Status`] with
    /// the server's code and detail.
    pub async fn analyze(
        &mut self,
        data_type: &str,
        values: &[f64],
    ) -> Result<SensorDataAnalysisResponse, ClientError> {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        let params = SensorDataRequest {
            data_type: data_type.to_string(),
            values: values.to_vec(),
        };
        let frame = RequestFrame::analyze(id, &params)
            .and_then(|frame| encode_frame(&frame))
            .map_err(|e| ClientError::Serialization(e.to_string()))?;

        let outcome = match self.exchange(&frame).await {
            Ok(Reply::Ok { id: reply_id, result }) if reply_id == id => Ok(result),
            Ok(Reply::Error { id: reply_id, code, detail }) if reply_id == id || reply_id == 0 => {
                Err(ClientError::Status { code, detail })
            }
            Ok(reply) => Err(ClientError::Protocol(format!(
                "reply id {} does not match request id {}",
                reply.id(),
                id
            ))),
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(_) => self.stats.record_sent(frame.len()),
            Err(e) => {
                self.stats.record_failure(e);
                if !matches!(e, ClientError::Status { .. }) {
                    // Stream position is unknown after a transport failure
                    self.stream = None;
                }
            }
        }
        outcome
    }

    async fn exchange(&mut self, frame: &[u8]) -> Result<Reply, ClientError> {
        let timeout = self.config.timeout;
        let limit = self.config.max_frame_bytes;
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;

        time::timeout(timeout, round_trip(stream, frame, limit))
            .await
            .map_err(|_| ClientError::Timeout(timeout))?
    }
}

async fn round_trip(
    stream: &mut BufReader<TcpStream>,
    frame: &[u8],
    limit: usize,
) -> Result<Reply, ClientError> {
    stream.get_mut().write_all(frame).await?;
    stream.get_mut().flush().await?;

    let mut line = Vec::new();
    match read_frame(stream, &mut line, limit).await? {
        Frame::Line => serde_json::from_slice(&line)
            .map_err(|e| ClientError::Protocol(format!("malformed reply: {e}"))),
        Frame::Closed => Err(ClientError::Protocol("connection closed by server".into())),
        Frame::Oversized => Err(ClientError::Protocol(format!("reply exceeds {limit} bytes"))),
    }
}

#[async_trait::async_trait]
impl AsyncConnector for AnalysisClient {
    type Error = ClientError;

    async fn connect(&mut self) -> Result<(), ClientError> {
        let timeout = self.config.timeout;
        let stream = time::timeout(timeout, TcpStream::connect(&self.config.server_addr))
            .await
            .map_err(|_| ClientError::Timeout(timeout))??;
        stream.set_nodelay(true)?;

        log::debug!("Connected to analysis server at {}", self.config.server_addr);
        self.stream = Some(BufReader::new(stream));
        self.stats.connections += 1;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), ClientError> {
        if let Some(mut stream) = self.stream.take() {
            stream.get_mut().shutdown().await?;
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn stats(&self) -> ConnectionStats {
        self.stats.clone()
    }
}
