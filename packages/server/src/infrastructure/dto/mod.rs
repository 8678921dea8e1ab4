//! Data Transfer Objects (DTOs) for the chat service.
//!
//! DTOs are organized by transport:
//! - `control`: TCP control-plane requests and responses
//! - `datagram`: UDP data-plane frames

pub mod control;
pub mod conversion;
pub mod datagram;
pub mod error;

pub use error::FrameError;
