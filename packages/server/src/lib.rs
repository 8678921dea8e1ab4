//! Multi-room chat server library.
//!
//! Rooms are managed over a TCP control plane (`create` / `show` / `join`) and
//! chat messages travel over a UDP data plane, relayed by a single dispatcher
//! to every other participant of the sender's room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
