use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use oceanstat_core::{AnalysisRequest, Analyzer};
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tokio::time;

use super::{read_frame, Frame};
use crate::protocol::{
    encode_frame, Reply, RequestFrame, SensorDataAnalysisResponse, SensorDataRequest, StatusCode,
    DEFAULT_MAX_FRAME_BYTES, METHOD_ANALYZE,
};

/// Default listen address, all interfaces
pub const DEFAULT_LISTEN_ADDR: &str = "[::]:50052";

/// Default number of analyses allowed to run at once
pub const DEFAULT_WORKERS: usize = 10;

const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Server-side errors
#[derive(Debug, Error)]
pub enum ServerError {
    /// Listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Socket error outside a connection
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Service host configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub listen_addr: String,
    /// Size of the worker pool
    pub workers: usize,
    /// Idle time after which a silent connection is closed
    pub read_timeout: Duration,
    /// Largest accepted request frame, in bytes
    pub max_frame_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LISTEN_ADDR)
    }
}

impl ServerConfig {
    /// Create configuration listening on `listen_addr`
    pub fn new(listen_addr: impl Into<String>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            workers: DEFAULT_WORKERS,
            read_timeout: Duration::from_secs(30),
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }

    /// Set worker pool size
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set idle read timeout in seconds
    pub fn read_timeout_secs(mut self, secs: u64) -> Self {
        self.read_timeout = Duration::from_secs(secs);
        self
    }

    /// Set maximum frame size in bytes
    pub fn max_frame_bytes(mut self, bytes: usize) -> Self {
        self.max_frame_bytes = bytes;
        self
    }

    fn validate(&self) -> Result<(), ServerError> {
        if self.workers == 0 || self.workers > Semaphore::MAX_PERMITS {
            return Err(ServerError::Config(format!(
                "worker count must be between 1 and {}",
                Semaphore::MAX_PERMITS
            )));
        }
        if self.max_frame_bytes == 0 {
            return Err(ServerError::Config("maximum frame size must be positive".into()));
        }
        Ok(())
    }
}

struct Shared<A> {
    analyzer: Arc<A>,
    workers: Arc<Semaphore>,
    config: ServerConfig,
    requests: AtomicU64,
    failures: AtomicU64,
}

/// TCP host for an [`Analyzer`]
pub struct AnalysisServer<A> {
    listener: TcpListener,
    shared: Arc<Shared<A>>,
}

impl<A> AnalysisServer<A>
where
    A: Analyzer + Send + Sync + 'static,
{
    /// Bind the listener
    pub async fn bind(config: ServerConfig, analyzer: A) -> Result<Self, ServerError> {
        config.validate()?;

        let listener = TcpListener::bind(&config.listen_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.listen_addr.clone(),
                source,
            })?;

        Ok(Self {
            listener,
            shared: Arc::new(Shared {
                analyzer: Arc::new(analyzer),
                workers: Arc::new(Semaphore::new(config.workers)),
                config,
                requests: AtomicU64::new(0),
                failures: AtomicU64::new(0),
            }),
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the process ends
    pub async fn serve(self) -> Result<(), ServerError> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves
    ///
    /// After shutdown no connection is accepted. Open connections finish the
    /// request they are processing, then close.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        log::info!(
            "Analysis server listening on {} with {} workers",
            addr,
            self.shared.config.workers
        );

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    log::info!("Shutdown requested, no longer accepting connections");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        log::debug!("Accepted connection from {}", peer);
                        let shared = Arc::clone(&self.shared);
                        let stop = stop_rx.clone();
                        connections.spawn(async move {
                            if let Err(e) = handle_connection(shared, stream, stop).await {
                                log::warn!("Connection {} ended with error: {}", peer, e);
                            }
                        });
                    }
                    Err(e) => log::warn!("Accept failed: {}", e),
                },
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        let _ = stop_tx.send(true);
        while connections.join_next().await.is_some() {}

        log::info!(
            "Analysis server stopped after {} requests ({} failed)",
            self.shared.requests.load(Ordering::Relaxed),
            self.shared.failures.load(Ordering::Relaxed)
        );
        Ok(())
    }
}

async fn handle_connection<A>(
    shared: Arc<Shared<A>>,
    stream: TcpStream,
    mut stop: watch::Receiver<bool>,
) -> io::Result<()>
where
    A: Analyzer + Send + Sync + 'static,
{
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::new();
    let limit = shared.config.max_frame_bytes;

    loop {
        let frame = tokio::select! {
            _ = stop.changed() => return Ok(()),
            read = time::timeout(shared.config.read_timeout, read_frame(&mut reader, &mut buf, limit)) => match read {
                Ok(frame) => frame?,
                Err(_) => {
                    log::debug!("Closing idle connection");
                    return Ok(());
                }
            },
        };

        let reply = match frame {
            Frame::Closed => return Ok(()),
            Frame::Oversized => {
                shared.failures.fetch_add(1, Ordering::Relaxed);
                log::warn!("Rejected frame larger than {} bytes", limit);
                let reply = Reply::error(
                    0,
                    StatusCode::ResourceExhausted,
                    format!("frame exceeds {limit} bytes"),
                );
                write_reply(&mut write_half, &reply).await?;
                write_half.shutdown().await?;
                // Drain pending input before closing
                let mut sink = tokio::io::sink();
                let drain = tokio::io::copy(&mut reader, &mut sink);
                let _ = time::timeout(DRAIN_TIMEOUT, drain).await;
                return Ok(());
            }
            Frame::Line if buf.iter().all(u8::is_ascii_whitespace) => continue,
            Frame::Line => dispatch(&shared, &buf).await,
        };

        shared.requests.fetch_add(1, Ordering::Relaxed);
        write_reply(&mut write_half, &reply).await?;
    }
}

async fn write_reply<W>(writer: &mut W, reply: &Reply) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = encode_frame(reply).map_err(io::Error::other)?;
    writer.write_all(&bytes).await?;
    writer.flush().await
}

async fn dispatch<A>(shared: &Arc<Shared<A>>, frame: &[u8]) -> Reply
where
    A: Analyzer + Send + Sync + 'static,
{
    let request: RequestFrame = match serde_json::from_slice(frame) {
        Ok(request) => request,
        Err(e) => return reject(shared, 0, StatusCode::InvalidArgument, format!("malformed frame: {e}")),
    };

    if request.method != METHOD_ANALYZE {
        let detail = format!("unknown method {:?}", request.method);
        return reject(shared, request.id, StatusCode::Unimplemented, detail);
    }

    match serde_json::from_value::<SensorDataRequest>(request.params) {
        Ok(params) => analyze(shared, request.id, params).await,
        Err(e) => reject(shared, request.id, StatusCode::InvalidArgument, format!("invalid params: {e}")),
    }
}

async fn analyze<A>(shared: &Arc<Shared<A>>, id: u64, params: SensorDataRequest) -> Reply
where
    A: Analyzer + Send + Sync + 'static,
{
    let permit = match Arc::clone(&shared.workers).acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => return reject(shared, id, StatusCode::Internal, "worker pool closed".into()),
    };

    let analyzer = Arc::clone(&shared.analyzer);
    let request = AnalysisRequest::new(params.data_type, params.values);
    let outcome = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        analyzer.analyze(&request)
    })
    .await;

    match outcome {
        Ok(Ok(report)) => Reply::Ok {
            id,
            result: SensorDataAnalysisResponse::from(&report),
        },
        Ok(Err(e)) => {
            if !e.is_caller_error() {
                log::error!("Analysis fault on request {}: {}", id, e);
            }
            reject(shared, id, e.kind().into(), e.detail().to_string())
        }
        Err(e) => {
            log::error!("Analysis task failed: {}", e);
            reject(shared, id, StatusCode::Internal, "analysis task failed".into())
        }
    }
}

fn reject<A>(shared: &Shared<A>, id: u64, code: StatusCode, detail: String) -> Reply {
    shared.failures.fetch_add(1, Ordering::Relaxed);
    log::warn!("Request {} failed with {}: {}", id, code, detail);
    Reply::error(id, code, detail)
}
