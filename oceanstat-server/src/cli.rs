//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use oceanstat_connectors::protocol::DEFAULT_MAX_FRAME_BYTES;
use oceanstat_connectors::rpc::{ClientConfig, ServerConfig, DEFAULT_LISTEN_ADDR, DEFAULT_WORKERS};
use oceanstat_connectors::upstream::UpstreamConfig;

/// Ocean sensor statistics service
#[derive(Parser, Debug, Clone)]
#[command(name = "oceanstat-server")]
#[command(version)]
#[command(about = "Serve AnalyzeSensorData over newline-delimited JSON")]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "OCEANSTAT_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// Number of analyses allowed to run at once
    #[arg(long, env = "OCEANSTAT_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Seconds a connection may stay silent before it is closed
    #[arg(long, env = "OCEANSTAT_READ_TIMEOUT_SECS", default_value_t = 30)]
    pub read_timeout_secs: u64,

    /// Largest accepted request frame (in bytes)
    #[arg(long, env = "OCEANSTAT_MAX_FRAME_BYTES", default_value_t = DEFAULT_MAX_FRAME_BYTES)]
    pub max_frame_bytes: usize,
}

impl ServeArgs {
    /// Server configuration from the parsed flags
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.listen.clone())
            .workers(self.workers)
            .read_timeout_secs(self.read_timeout_secs)
            .max_frame_bytes(self.max_frame_bytes)
    }
}

/// Analyze a collector export through a running analysis server
#[derive(Parser, Debug, Clone)]
#[command(name = "oceanstat-report")]
#[command(version)]
#[command(about = "Print per-type statistics for a collector CSV export")]
pub struct ReportArgs {
    /// CSV export written by the collection server
    #[arg(long, env = "OCEANSTAT_EXPORT", default_value = "SensorDataExport.csv")]
    pub export: PathBuf,

    /// Analysis server address
    #[arg(long, env = "OCEANSTAT_ANALYSIS_ADDR", default_value = "127.0.0.1:50052")]
    pub analysis_addr: String,

    /// Collection server address, probed before reading the export
    #[arg(long, env = "OCEANSTAT_UPSTREAM_ADDR", default_value = "127.0.0.1:8080")]
    pub upstream_addr: String,

    /// Client id announced to the collection server
    #[arg(long, env = "OCEANSTAT_CLIENT_ID", default_value = "OceanStatAnalysisClient")]
    pub client_id: String,

    /// Skip the collection server probe
    #[arg(long, env = "OCEANSTAT_NO_UPSTREAM", default_value_t = false)]
    pub no_upstream: bool,

    /// Include data types other than temperature, humidity, waterLevel and windSpeed
    #[arg(long, env = "OCEANSTAT_ALL_TYPES", default_value_t = false)]
    pub all_types: bool,

    /// Network timeout in seconds
    #[arg(long, env = "OCEANSTAT_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl ReportArgs {
    /// Analysis client configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.analysis_addr.clone()).timeout_secs(self.timeout_secs)
    }

    /// Collection server configuration, `None` when the probe is disabled
    pub fn upstream_config(&self) -> Option<UpstreamConfig> {
        if self.no_upstream {
            return None;
        }
        Some(
            UpstreamConfig::new(self.upstream_addr.clone())
                .client_id(self.client_id.clone())
                .timeout_secs(self.timeout_secs.min(10)),
        )
    }
}
