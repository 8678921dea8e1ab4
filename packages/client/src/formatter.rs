//! Message formatting utilities for client display.

use hiroba_server::infrastructure::dto::control::{ControlResponse, RoomListDto};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the room listing returned by `show`
    ///
    /// # Returns
    ///
    /// `Room List:` followed by one block per room, or `No room created yet.`
    pub fn format_room_list(list: &RoomListDto) -> String {
        if list.rooms.is_empty() {
            return "No room created yet.\n".to_string();
        }

        let mut output = String::from("Room List:\n");
        for room in &list.rooms {
            output.push_str(&format!(" - {}\n", room.room_name));
            output.push_str(&format!(
                "   - Host: {}\n",
                room.host.as_deref().unwrap_or("(none yet)")
            ));
            output.push_str(&format!("   - Title: {}\n", room.title));
            output.push_str(&format!(
                "   - Participants: {} / {}\n",
                room.participant_count, room.capacity
            ));
        }
        output
    }

    /// Format a non-listing control response
    pub fn format_response(response: &ControlResponse) -> String {
        match response {
            ControlResponse::Ok { message } => format!("{}\n", message),
            ControlResponse::Error { message, .. } => format!("Error: {}\n", message),
            ControlResponse::RoomList(list) => Self::format_room_list(list),
        }
    }

    /// Format a relayed datagram (`From <sender>\n>>> <text>`)
    pub fn format_incoming(text: &str) -> String {
        format!("\n{}\n", text)
    }

    /// Banner printed when entering a room
    pub fn format_joined(room_name: &str, menu_command: &str) -> String {
        format!(
            "You're in '{}'. Type messages and press Enter to send ({} returns to the menu).\n",
            room_name, menu_command
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiroba_server::infrastructure::dto::control::{ErrorKind, RoomSummaryDto};

    fn summary(host: Option<&str>) -> RoomSummaryDto {
        RoomSummaryDto {
            room_name: "lobby".to_string(),
            title: "Main".to_string(),
            participant_count: 1,
            capacity: 2,
            host: host.map(str::to_string),
            created_at: "2023-01-01T00:00:00+09:00".to_string(),
        }
    }

    #[test]
    fn test_format_empty_room_list() {
        // テスト項目: ルームがない場合は "No room created yet." と表示される
        // given (前提条件):
        let list = RoomListDto::new(vec![]);

        // when (操作):
        let result = MessageFormatter::format_room_list(&list);

        // then (期待する結果):
        assert_eq!(result, "No room created yet.\n");
    }

    #[test]
    fn test_format_room_list() {
        // テスト項目: ルーム名・ホスト・タイトル・参加者数 / 定員が表示される
        // given (前提条件):
        let list = RoomListDto::new(vec![summary(Some("127.0.0.1:5001"))]);

        // when (操作):
        let result = MessageFormatter::format_room_list(&list);

        // then (期待する結果):
        assert_eq!(
            result,
            "Room List:\n - lobby\n   - Host: 127.0.0.1:5001\n   - Title: Main\n   - Participants: 1 / 2\n"
        );
    }

    #[test]
    fn test_format_room_without_host() {
        // テスト項目: ホストがいないルームはその旨が表示される
        // given (前提条件):
        let list = RoomListDto::new(vec![summary(None)]);

        // when (操作):
        let result = MessageFormatter::format_room_list(&list);

        // then (期待する結果):
        assert!(result.contains("   - Host: (none yet)\n"));
    }

    #[test]
    fn test_format_error_response() {
        // テスト項目: エラーレスポンスは "Error:" 付きで表示される
        // given (前提条件):
        let response = ControlResponse::error(ErrorKind::RoomNotFound, "Room 'ghost' not found");

        // when (操作):
        let result = MessageFormatter::format_response(&response);

        // then (期待する結果):
        assert_eq!(result, "Error: Room 'ghost' not found\n");
    }

    #[test]
    fn test_format_incoming_message() {
        // テスト項目: 受信メッセージは前後に改行を付けて表示される
        // given (前提条件):
        let text = "From 127.0.0.1:5001\n>>> hi";

        // when (操作):
        let result = MessageFormatter::format_incoming(text);

        // then (期待する結果):
        assert_eq!(result, "\nFrom 127.0.0.1:5001\n>>> hi\n");
    }
}
