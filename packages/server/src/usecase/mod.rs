//! UseCase layer: one use case per control command plus the datagram relay.

pub mod create_room;
pub mod error;
pub mod join_room;
pub mod list_rooms;
pub mod relay_message;

pub use create_room::CreateRoomUseCase;
pub use error::{CreateRoomError, JoinRoomError, RelayError};
pub use join_room::JoinRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use relay_message::{InboundDatagram, RelayMessageUseCase, RelayOutcome};
