//! Client execution logic: the command prompt and chat mode.

use std::net::SocketAddr;

use hiroba_server::infrastructure::dto::control::{ControlRequest, ControlResponse};
use tokio::net::lookup_host;

use super::{
    chat::ChatSession,
    control::ControlClient,
    domain::{Command, MENU_COMMAND, check_can_join, is_menu_command},
    error::ClientError,
    formatter::MessageFormatter,
    input::LineReader,
    ui::CHAT_PROMPT,
};

const COMMAND_PROMPT: &str = "Enter command 'create/show/join/exit': ";

/// How chat mode ended
enum ChatExit {
    /// The user typed the menu command
    Menu,
    /// Stdin closed (Ctrl+C / Ctrl+D)
    InputClosed,
}

/// Run the interactive client against `host:port`
///
/// # Arguments
///
/// * `host` - Server host name or address (e.g., "127.0.0.1")
/// * `port` - Server port, shared by the control and data planes
pub async fn run_client(host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let server_addr = lookup_host((host.as_str(), port))
        .await?
        .next()
        .ok_or_else(|| {
            ClientError::ConnectionError(format!("cannot resolve {}:{}", host, port))
        })?;

    let mut control = ControlClient::connect(server_addr).await?;
    println!("Successfully connected to {}.", server_addr);

    let mut input = LineReader::spawn();
    let mut session: Option<ChatSession> = None;

    while let Some(line) = input.read_line(COMMAND_PROMPT).await {
        let Some(command) = Command::parse(&line) else {
            if !line.trim().is_empty() {
                println!("Unknown command '{}'", line.trim());
            }
            continue;
        };

        let exit = match command {
            Command::Show => {
                let response = control.request(&ControlRequest::Show).await?;
                print!("{}", MessageFormatter::format_response(&response));
                None
            }
            Command::Create => {
                let Some((room_name, request)) = read_create_request(&mut input).await else {
                    break;
                };
                let response = control.request(&request).await?;
                print!("{}", MessageFormatter::format_response(&response));

                if matches!(response, ControlResponse::Ok { .. }) && session.is_none() {
                    join_room(&mut control, &mut input, &mut session, server_addr, &room_name)
                        .await?
                } else {
                    None
                }
            }
            Command::Join => {
                if let Some(current) = &session {
                    if let Err(message) = check_can_join(Some(current.room_name())) {
                        println!("{}", message);
                    }
                    Some(chat(&mut input, current).await)
                } else {
                    let Some(room_name) = input.read_line("Enter room name: ").await else {
                        break;
                    };
                    join_room(
                        &mut control,
                        &mut input,
                        &mut session,
                        server_addr,
                        room_name.trim(),
                    )
                    .await?
                }
            }
            Command::Exit => {
                println!("Bye");
                break;
            }
        };

        if let Some(ChatExit::InputClosed) = exit {
            break;
        }
    }

    tracing::info!("Client stopped");
    Ok(())
}

/// Prompt for the fields of a `create` request; `None` if input closed
async fn read_create_request(input: &mut LineReader) -> Option<(String, ControlRequest)> {
    let room_name = input.read_line("Enter room name: ").await?.trim().to_string();
    let title = input.read_line("Enter title: ").await?;
    let max_participants = input.read_line("Enter max participants: ").await?;

    let request = ControlRequest::Create {
        room_name: room_name.clone(),
        title: title.trim().to_string(),
        max_participants: max_participants.trim().to_string(),
    };
    Some((room_name, request))
}

/// Ask the server to join `room_name`, then enroll over the data plane and chat
async fn join_room(
    control: &mut ControlClient,
    input: &mut LineReader,
    session: &mut Option<ChatSession>,
    server_addr: SocketAddr,
    room_name: &str,
) -> Result<Option<ChatExit>, ClientError> {
    let response = control
        .request(&ControlRequest::Join {
            room_name: room_name.to_string(),
        })
        .await?;
    if !matches!(response, ControlResponse::Ok { .. }) {
        print!("{}", MessageFormatter::format_response(&response));
        return Ok(None);
    }

    let joined = session.insert(ChatSession::start(server_addr, room_name).await?);
    Ok(Some(chat(input, joined).await))
}

/// Chat mode: every line is sent to the room until the menu command
async fn chat(input: &mut LineReader, session: &ChatSession) -> ChatExit {
    print!(
        "{}",
        MessageFormatter::format_joined(session.room_name(), MENU_COMMAND)
    );

    loop {
        let Some(line) = input.read_line(CHAT_PROMPT).await else {
            return ChatExit::InputClosed;
        };
        if is_menu_command(&line) {
            return ChatExit::Menu;
        }
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = session.send(&line).await {
            tracing::warn!("Failed to send message: {}", e);
            println!("Failed to send message: {}", e);
        }
    }
}
