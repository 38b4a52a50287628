//! Error types for the telnet client

use thiserror::Error;

/// Errors that can occur while talking to an AVR over telnet
#[derive(Debug, Error)]
pub enum TelnetError {
    /// Socket level failure (connect refused, reset, write error)
    #[error("Network error: {0}")]
    Network(String),

    /// No answer within the configured deadline
    #[error("Timed out during {0}")]
    Timeout(&'static str),

    /// The AVR closed the connection before answering
    #[error("Connection closed by AVR")]
    Closed,

    /// The AVR answered with a line we could not decode
    #[error("Parse error: {0}")]
    Parse(String),

    /// Command parameter rejected before anything was sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// `submit` was called outside of a tokio runtime
    #[error("No tokio runtime available to drive the request queue")]
    NoRuntime,

    /// The queue worker is gone
    #[error("Request queue closed")]
    QueueClosed,
}

impl From<std::io::Error> for TelnetError {
    fn from(error: std::io::Error) -> Self {
        TelnetError::Network(error.to_string())
    }
}
