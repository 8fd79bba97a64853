//! Analysis RPC over newline-delimited JSON
//!
//! [`AnalysisServer`] hosts any [`oceanstat_core::Analyzer`] behind a TCP
//! listener; [`AnalysisClient`] is the matching caller. Both speak the
//! frames defined in [`crate::protocol`].

mod client;
mod server;

pub use client::{AnalysisClient, ClientConfig, ClientError};
pub use server::{AnalysisServer, ServerConfig, ServerError, DEFAULT_LISTEN_ADDR, DEFAULT_WORKERS};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Outcome of reading one frame
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Frame {
    /// Complete frame, newline stripped
    Line,
    /// Peer closed the connection before sending anything
    Closed,
    /// Frame exceeded the limit
    Oversized,
}

/// Read one newline-terminated frame of at most `limit` bytes into `buf`
///
/// A final frame without a trailing newline is accepted at end of stream.
pub(crate) async fn read_frame<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
) -> std::io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let read = reader
        .take(limit as u64 + 1)
        .read_until(b'\n', buf)
        .await?;

    if read == 0 {
        return Ok(Frame::Closed);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        return Ok(Frame::Line);
    }
    if buf.len() > limit {
        return Ok(Frame::Oversized);
    }
    Ok(Frame::Line)
}
