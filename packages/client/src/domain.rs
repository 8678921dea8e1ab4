//! Domain logic for client-side operations.
//!
//! Pure functions, kept free of I/O so they are easy to test.

/// A command entered at the top-level prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Create,
    Show,
    Join,
    Exit,
}

impl Command {
    /// Parse a top-level command, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "create" => Some(Self::Create),
            "show" => Some(Self::Show),
            "join" => Some(Self::Join),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Line that leaves chat mode and returns to the command prompt
pub const MENU_COMMAND: &str = "/menu";

/// Whether a line typed in chat mode returns to the command prompt.
pub fn is_menu_command(line: &str) -> bool {
    line.trim() == MENU_COMMAND
}

/// Check whether a `join` may proceed.
///
/// A client enrolls with a single datagram endpoint and the server never
/// removes participants, so a second join is refused locally.
pub fn check_can_join(current_room: Option<&str>) -> Result<(), String> {
    match current_room {
        Some(room) => Err(format!("You're already in '{}'", room)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        // テスト項目: 既知のコマンドが大文字小文字・空白を無視して解析される
        // given (前提条件):
        let inputs = ["create", " SHOW ", "Join", "exit"];

        // when (操作):
        let commands: Vec<Option<Command>> = inputs.iter().map(|i| Command::parse(i)).collect();

        // then (期待する結果):
        assert_eq!(
            commands,
            vec![
                Some(Command::Create),
                Some(Command::Show),
                Some(Command::Join),
                Some(Command::Exit)
            ]
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        // テスト項目: 未知のコマンドは None になる
        // given (前提条件):
        let input = "delete";

        // when (操作):
        let command = Command::parse(input);

        // then (期待する結果):
        assert_eq!(command, None);
    }

    #[test]
    fn test_menu_command_detection() {
        // テスト項目: "/menu" のみがメニューへの復帰として扱われる
        // given (前提条件):

        // when (操作):

        // then (期待する結果):
        assert!(is_menu_command("/menu"));
        assert!(is_menu_command("  /menu \n"));
        assert!(!is_menu_command("/menu please"));
        assert!(!is_menu_command("menu"));
    }

    #[test]
    fn test_check_can_join() {
        // テスト項目: 既にルームにいる場合は join が拒否される
        // given (前提条件):
        let in_room = Some("lobby");

        // when (操作):
        let refused = check_can_join(in_room);
        let allowed = check_can_join(None);

        // then (期待する結果):
        assert_eq!(refused, Err("You're already in 'lobby'".to_string()));
        assert_eq!(allowed, Ok(()));
    }
}
