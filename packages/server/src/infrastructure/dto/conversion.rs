//! Conversion logic between domain entities and DTOs.

use hiroba_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::Room;
use crate::infrastructure::dto::control::{RoomListDto, RoomSummaryDto};

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            room_name: room.name.as_str().to_string(),
            title: room.title.as_str().to_string(),
            participant_count: room.participant_count(),
            capacity: room.capacity.get(),
            host: room.host().map(|id| id.key()),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&[Room]> for RoomListDto {
    fn from(rooms: &[Room]) -> Self {
        RoomListDto::new(rooms.iter().map(RoomSummaryDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Capacity, Participant, ParticipantId, RoomName, RoomTitle, Timestamp};

    fn create_room() -> Room {
        Room::new(
            RoomName::try_from("lobby").unwrap(),
            RoomTitle::try_from("Main").unwrap(),
            Capacity::new(2).unwrap(),
            Timestamp::new(1672498800000),
        )
    }

    #[test]
    fn test_empty_room_to_summary_dto() {
        // テスト項目: 参加者のいないルームはホストなしのサマリに変換される
        // given (前提条件):
        let room = create_room();

        // when (操作):
        let dto = RoomSummaryDto::from(&room);

        // then (期待する結果):
        assert_eq!(dto.room_name, "lobby");
        assert_eq!(dto.title, "Main");
        assert_eq!(dto.participant_count, 0);
        assert_eq!(dto.capacity, 2);
        assert_eq!(dto.host, None);
        assert!(dto.created_at.starts_with("2023-01-01T00:00:00"));
    }

    #[test]
    fn test_rooms_to_list_dto_with_host() {
        // テスト項目: ルーム一覧が参加者数とホスト付きの一覧 DTO に変換される
        // given (前提条件):
        let mut room = create_room();
        let host = ParticipantId::new("127.0.0.1:5001".parse().unwrap());
        room.admit(Participant::new(host, Timestamp::new(0))).unwrap();
        let rooms = vec![room];

        // when (操作):
        let dto = RoomListDto::from(rooms.as_slice());

        // then (期待する結果):
        assert_eq!(dto.schema_version, 1);
        assert_eq!(dto.rooms.len(), 1);
        assert_eq!(dto.rooms[0].participant_count, 1);
        assert_eq!(dto.rooms[0].host.as_deref(), Some("127.0.0.1:5001"));
    }
}
