//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Room name must not be empty")]
    EmptyRoomName,

    #[error("Invalid room name '{0}': must not contain ':' or control characters")]
    InvalidRoomName(String),

    #[error("Room name is too long ({0} bytes, max {max})", max = super::value_object::MAX_ROOM_NAME_BYTES)]
    RoomNameTooLong(usize),

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Invalid title: must not contain control characters")]
    InvalidTitle,

    #[error("Invalid max participants '{0}': must be an integer of at least 1")]
    InvalidCapacity(String),
}

/// Room invariant violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Room '{room}' is full ({capacity} participants)")]
    RoomFull { room: String, capacity: usize },
}

/// Room registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room '{0}' already exists")]
    DuplicateRoom(String),

    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error(transparent)]
    Room(#[from] RoomError),
}

/// Outbound datagram errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatagramPushError {
    #[error("Failed to send datagram to {target}: {reason}")]
    SendFailed { target: String, reason: String },
}
