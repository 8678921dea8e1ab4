//! Domain entities: [`Room`] and [`Participant`].

use super::{
    error::RoomError,
    value_object::{Capacity, ParticipantId, RoomName, RoomTitle, Timestamp},
};

/// A peer enrolled in a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(id: ParticipantId, joined_at: Timestamp) -> Self {
        Self { id, joined_at }
    }
}

/// Result of a successful [`Room::admit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A new slot was taken. `host` is true for the room's first participant.
    Admitted { host: bool },
    /// The identity was already enrolled; nothing changed.
    AlreadyMember,
}

/// A capacity-bounded chat room.
///
/// Invariants:
/// - `participants.len() <= capacity`
/// - `host` is the first admitted participant and never changes
/// - participant identities are unique
///
/// Participants are only ever appended. Disconnect handling would add a
/// `remove(&ParticipantId)` here; it is not part of the current protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub title: RoomTitle,
    pub capacity: Capacity,
    pub created_at: Timestamp,
    host: Option<ParticipantId>,
    participants: Vec<Participant>,
}

impl Room {
    pub fn new(
        name: RoomName,
        title: RoomTitle,
        capacity: Capacity,
        created_at: Timestamp,
    ) -> Self {
        Self {
            name,
            title,
            capacity,
            created_at,
            host: None,
            participants: Vec::new(),
        }
    }

    /// Enroll a participant if there is room for it.
    ///
    /// Re-admitting an enrolled identity succeeds without taking a slot.
    pub fn admit(&mut self, participant: Participant) -> Result<Admission, RoomError> {
        if self.contains(&participant.id) {
            return Ok(Admission::AlreadyMember);
        }
        if self.is_full() {
            return Err(RoomError::RoomFull {
                room: self.name.as_str().to_string(),
                capacity: self.capacity.get(),
            });
        }

        let is_first = self.host.is_none();
        if is_first {
            self.host = Some(participant.id);
        }
        self.participants.push(participant);

        Ok(Admission::Admitted { host: is_first })
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.iter().any(|p| &p.id == id)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.capacity.get()
    }

    pub fn host(&self) -> Option<&ParticipantId> {
        self.host.as_ref()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Participant identities in admission order
    pub fn list_participants(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_room(capacity: usize) -> Room {
        Room::new(
            RoomName::try_from("lobby").unwrap(),
            RoomTitle::try_from("Main").unwrap(),
            Capacity::new(capacity).unwrap(),
            Timestamp::new(1000),
        )
    }

    fn participant(port: u16) -> Participant {
        Participant::new(
            ParticipantId::new(format!("127.0.0.1:{}", port).parse().unwrap()),
            Timestamp::new(2000),
        )
    }

    #[test]
    fn test_new_room_is_empty_without_host() {
        // テスト項目: 作成直後のルームは参加者もホストもいない
        // given (前提条件):

        // when (操作):
        let room = create_room(2);

        // then (期待する結果):
        assert_eq!(room.participant_count(), 0);
        assert!(room.host().is_none());
        assert!(!room.is_full());
    }

    #[test]
    fn test_first_admission_becomes_host() {
        // テスト項目: 最初に入室した参加者がホストになる
        // given (前提条件):
        let mut room = create_room(3);

        // when (操作):
        let first = room.admit(participant(5001));
        let second = room.admit(participant(5002));

        // then (期待する結果):
        assert_eq!(first, Ok(Admission::Admitted { host: true }));
        assert_eq!(second, Ok(Admission::Admitted { host: false }));
        assert_eq!(room.host(), Some(&participant(5001).id));
    }

    #[test]
    fn test_admission_rejected_when_full() {
        // テスト項目: 定員に達したルームへの入室は拒否され、状態は変わらない
        // given (前提条件):
        let mut room = create_room(1);
        room.admit(participant(5001)).unwrap();

        // when (操作):
        let result = room.admit(participant(5002));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomError::RoomFull {
                room: "lobby".to_string(),
                capacity: 1
            })
        );
        assert_eq!(room.list_participants(), vec![participant(5001).id]);
    }

    #[test]
    fn test_readmission_is_idempotent() {
        // テスト項目: 同じ参加者の再入室は枠を消費しない
        // given (前提条件):
        let mut room = create_room(2);
        room.admit(participant(5001)).unwrap();

        // when (操作):
        let result = room.admit(participant(5001));

        // then (期待する結果):
        assert_eq!(result, Ok(Admission::AlreadyMember));
        assert_eq!(room.participant_count(), 1);
        assert!(room.admit(participant(5002)).is_ok());
    }

    #[test]
    fn test_readmission_of_member_succeeds_even_when_full() {
        // テスト項目: 満員でも既存の参加者の再入室は成功する
        // given (前提条件):
        let mut room = create_room(1);
        room.admit(participant(5001)).unwrap();

        // when (操作):
        let result = room.admit(participant(5001));

        // then (期待する結果):
        assert_eq!(result, Ok(Admission::AlreadyMember));
    }

    #[test]
    fn test_host_never_changes_after_later_admissions() {
        // テスト項目: 後続の入室でホストは変わらない
        // given (前提条件):
        let mut room = create_room(4);
        room.admit(participant(5001)).unwrap();

        // when (操作):
        for port in 5002..5005 {
            room.admit(participant(port)).unwrap();
        }

        // then (期待する結果):
        assert_eq!(room.host(), Some(&participant(5001).id));
        assert!(room.is_full());
    }
}
