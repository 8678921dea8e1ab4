//! UI utilities for the client.

use std::io::Write;

/// Prompt shown while chatting in a room
pub const CHAT_PROMPT: &str = "> ";

/// Redisplay the chat prompt after printing an incoming message
pub fn redisplay_prompt() {
    print!("{}", CHAT_PROMPT);
    std::io::stdout().flush().ok();
}
