//! Interactive chat client for Hiroba.
//!
//! Rooms are created, listed and joined over the TCP control connection; once
//! in a room, typed lines are sent as datagrams and relayed messages from the
//! other participants are printed as they arrive.

mod chat;
mod control;
mod domain;
pub mod error;
mod formatter;
mod input;
mod runner;
mod ui;

pub use runner::run_client;
