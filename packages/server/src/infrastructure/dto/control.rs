//! Control-plane DTOs.
//!
//! Requests are colon-delimited text lines:
//!
//! ```text
//! <room_name>:create:<title>:<max_participants>
//! _:show
//! <room_name>:join
//! ```
//!
//! Every request is answered by exactly one JSON line ([`ControlResponse`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FrameError;

/// Version of the room listing schema carried in [`RoomListDto`]
pub const ROOM_LIST_SCHEMA_VERSION: u32 = 1;

/// Placeholder room field for commands that target no room
pub const NO_ROOM: &str = "_";

/// A parsed control-plane request.
///
/// Field values are kept as received; they are validated by the use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlRequest {
    Create {
        room_name: String,
        title: String,
        max_participants: String,
    },
    Show,
    Join {
        room_name: String,
    },
}

impl ControlRequest {
    /// Parse one request line (a trailing `\r\n` or `\n` is ignored).
    pub fn parse(line: &str) -> Result<Self, FrameError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (room_name, rest) = line
            .split_once(':')
            .ok_or_else(|| FrameError::Malformed(format!("missing command in '{}'", line)))?;
        let (command, args) = rest.split_once(':').unwrap_or((rest, ""));

        match command {
            "create" => {
                // The title may itself contain ':', the capacity never does
                let (title, max_participants) = args.rsplit_once(':').ok_or_else(|| {
                    FrameError::Malformed(
                        "create expects <room_name>:create:<title>:<max_participants>".to_string(),
                    )
                })?;
                Ok(Self::Create {
                    room_name: room_name.to_string(),
                    title: title.to_string(),
                    max_participants: max_participants.to_string(),
                })
            }
            "show" if args.is_empty() => Ok(Self::Show),
            "join" if args.is_empty() => Ok(Self::Join {
                room_name: room_name.to_string(),
            }),
            "show" | "join" => Err(FrameError::Malformed(format!(
                "unexpected arguments for '{}'",
                command
            ))),
            other => Err(FrameError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for ControlRequest {
    /// Wire form of the request, without the line terminator
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create {
                room_name,
                title,
                max_participants,
            } => write!(f, "{}:create:{}:{}", room_name, title, max_participants),
            Self::Show => write!(f, "{}:show", NO_ROOM),
            Self::Join { room_name } => write!(f, "{}:join", room_name),
        }
    }
}

/// Category of a rejected control request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DuplicateRoom,
    RoomNotFound,
    InvalidRequest,
    MalformedFrame,
    Internal,
}

/// One room in a `show` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room_name: String,
    pub title: String,
    pub participant_count: usize,
    pub capacity: usize,
    /// `ip:port` of the host, absent until the first participant is admitted
    pub host: Option<String>,
    /// RFC 3339 (JST)
    pub created_at: String,
}

/// Versioned room listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomListDto {
    pub schema_version: u32,
    pub rooms: Vec<RoomSummaryDto>,
}

impl RoomListDto {
    pub fn new(rooms: Vec<RoomSummaryDto>) -> Self {
        Self {
            schema_version: ROOM_LIST_SCHEMA_VERSION,
            rooms,
        }
    }
}

/// Response line sent for every control request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlResponse {
    Ok { message: String },
    Error { kind: ErrorKind, message: String },
    RoomList(RoomListDto),
}

impl ControlResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::Ok {
            message: message.into(),
        }
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    /// Serialize as a single newline-terminated JSON line
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim_end())
    }
}
