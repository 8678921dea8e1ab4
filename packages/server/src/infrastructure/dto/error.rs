//! Wire framing errors.

use thiserror::Error;

/// A control line or datagram that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("Malformed frame: {0}")]
    Malformed(String),

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Frame is not valid UTF-8")]
    InvalidUtf8,

    #[error("Payload length mismatch: declared {declared} bytes, got {actual}")]
    PayloadLengthMismatch { declared: usize, actual: usize },
}
