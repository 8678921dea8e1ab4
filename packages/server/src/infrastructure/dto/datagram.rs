//! Data-plane DTOs.
//!
//! Inbound datagram: `<room_name>:<payload_byte_length>:<payload_text>`.
//! Relayed datagram: `From <ip:port>\n>>> <payload_text>`.

use std::fmt;

use super::error::FrameError;

/// Payload of the datagram a peer sends right after `join`
pub const HANDSHAKE_PAYLOAD: &str = "Hello!";

/// A parsed inbound datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatagramFrame {
    pub room_name: String,
    pub payload: String,
}

impl DatagramFrame {
    pub fn new(room_name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            room_name: room_name.into(),
            payload: payload.into(),
        }
    }

    pub fn handshake(room_name: impl Into<String>) -> Self {
        Self::new(room_name, HANDSHAKE_PAYLOAD)
    }

    /// Parse a datagram body.
    ///
    /// The payload may contain ':'; its UTF-8 length must match the declared one.
    pub fn parse(bytes: &[u8]) -> Result<Self, FrameError> {
        let text = std::str::from_utf8(bytes).map_err(|_| FrameError::InvalidUtf8)?;
        let mut parts = text.splitn(3, ':');

        let room_name = parts.next().unwrap_or_default();
        let (Some(declared), Some(payload)) = (parts.next(), parts.next()) else {
            return Err(FrameError::Malformed(
                "expected <room_name>:<payload_length>:<payload>".to_string(),
            ));
        };
        let declared: usize = declared
            .parse()
            .map_err(|_| FrameError::Malformed(format!("invalid payload length '{}'", declared)))?;
        if declared != payload.len() {
            return Err(FrameError::PayloadLengthMismatch {
                declared,
                actual: payload.len(),
            });
        }

        Ok(Self::new(room_name, payload))
    }

    pub fn is_handshake(&self) -> bool {
        self.payload == HANDSHAKE_PAYLOAD
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for DatagramFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.room_name, self.payload.len(), self.payload)
    }
}

/// A message relayed to the other participants of a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedMessage<'a> {
    pub sender: &'a str,
    pub payload: &'a str,
}

impl fmt::Display for RelayedMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "From {}\n>>> {}", self.sender, self.payload)
    }
}
