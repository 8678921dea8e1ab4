//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server closed the control connection
    #[error("Server closed the connection")]
    ConnectionClosed,

    /// The server sent something that is not a valid response
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// The framed message does not fit in one server datagram
    #[error("Message too long ({size} bytes framed, max {max})")]
    MessageTooLong { size: usize, max: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
