//! Value objects for the chat domain.
//!
//! Each constructor validates its input so that an instance, once built, can be
//! placed on the wire without further checks.

use std::{fmt, net::SocketAddr, num::NonZeroUsize, str::FromStr};

use super::error::ValueObjectError;

pub const MAX_ROOM_NAME_BYTES: usize = 64;

/// Unique room key in the registry.
///
/// Colons are rejected because both wire formats are colon-delimited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyRoomName);
        }
        if value.len() > MAX_ROOM_NAME_BYTES {
            return Err(ValueObjectError::RoomNameTooLong(value.len()));
        }
        if value.contains(':') || value.chars().any(char::is_control) {
            return Err(ValueObjectError::InvalidRoomName(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-readable room title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTitle(String);

impl RoomTitle {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyTitle);
        }
        if value.chars().any(char::is_control) {
            return Err(ValueObjectError::InvalidTitle);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for RoomTitle {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

/// Maximum number of participants in a room (always at least 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity(NonZeroUsize);

impl Capacity {
    pub fn new(value: usize) -> Result<Self, ValueObjectError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or_else(|| ValueObjectError::InvalidCapacity(value.to_string()))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl FromStr for Capacity {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<usize>()
            .map_err(|_| ValueObjectError::InvalidCapacity(s.to_string()))?;
        Self::new(value)
    }
}

/// Identity of a peer: the address its datagrams come from.
///
/// A peer reconnecting from the same address is indistinguishable from the
/// original one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantId(SocketAddr);

impl ParticipantId {
    pub fn new(addr: SocketAddr) -> Self {
        Self(addr)
    }

    pub fn addr(&self) -> SocketAddr {
        self.0
    }

    /// `ip:port` key used on the wire and in listings
    pub fn key(&self) -> String {
        format!("{}:{}", self.0.ip(), self.0.port())
    }
}

impl From<SocketAddr> for ParticipantId {
    fn from(addr: SocketAddr) -> Self {
        Self(addr)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0.ip(), self.0.port())
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
