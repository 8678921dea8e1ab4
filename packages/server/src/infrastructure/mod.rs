//! Infrastructure layer: adapters behind the domain ports and the wire DTOs.

pub mod datagram_pusher;
pub mod dto;
pub mod repository;
