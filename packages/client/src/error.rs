//! Error types for the chat client.

use std::io;

use irori_server::infrastructure::codec::CodecError;
use thiserror::Error;
use tokio_util::codec::AnyDelimiterCodecError;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The server closed the connection
    #[error("Connection closed by server")]
    ConnectionClosed,

    #[error("Timed out waiting for a response")]
    Timeout,

    #[error("Connection error: {0}")]
    Io(#[from] io::Error),

    #[error("Read error: {0}")]
    Read(#[from] AnyDelimiterCodecError),

    #[error("Invalid line from server: {0}")]
    Codec(#[from] CodecError),

    /// Rejected locally before anything was sent
    #[error("{0}")]
    InvalidInput(String),
}
