//! OceanStat service host and report client
//!
//! Two binaries ship from this crate:
//!
//! - `oceanstat-server` hosts the statistics engine behind the analysis RPC
//! - `oceanstat-report` reads the collector's CSV export, analyzes each data
//!   type through a running server and prints a per-type report
//!
//! Flags are defined in [`cli`]; every flag can also be set through an
//! `OCEANSTAT_*` environment variable. Logging goes through `env_logger`, so
//! `RUST_LOG=debug` shows per-connection detail.

pub mod cli;
pub mod report;

/// Initialise `env_logger` with `info` as the default level
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
