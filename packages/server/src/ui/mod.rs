//! Network-facing layer: the TCP control sessions and the UDP dispatcher.

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::control::{
    ControlSession, MAX_REQUEST_LINE_BYTES, RequestLine, handle_request_line, read_request_line,
};
pub use handler::dispatcher::{DispatchError, dispatch_datagram};
pub use server::{DEFAULT_MAX_DATAGRAM_SIZE, Server, ServerConfig};
pub use state::AppState;
