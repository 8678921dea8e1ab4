//! Domain layer: rooms, participants and the ports the use cases depend on.

pub mod datagram_pusher;
pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use datagram_pusher::DatagramPusher;
#[cfg(test)]
pub use datagram_pusher::MockDatagramPusher;
pub use entity::{Admission, Participant, Room};
pub use error::{DatagramPushError, RepositoryError, RoomError, ValueObjectError};
pub use repository::{Enrollment, RoomRepository};
pub use value_object::{Capacity, ParticipantId, RoomName, RoomTitle, Timestamp};
