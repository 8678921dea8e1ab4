//! TCP control-plane session handler.
//!
//! Each accepted connection runs in its own task and loops over
//! `AWAIT_COMMAND -> (CREATE | SHOW | JOIN) -> AWAIT_COMMAND` until the peer
//! closes the connection. Control sessions never read datagrams.

use std::{net::SocketAddr, sync::Arc};

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::TcpStream,
};

use crate::{
    domain::RoomName,
    infrastructure::dto::control::{ControlRequest, ControlResponse, ErrorKind, RoomListDto},
    ui::state::AppState,
    usecase::{CreateRoomError, JoinRoomError},
};

/// Per-connection protocol state
#[derive(Debug)]
pub struct ControlSession {
    peer: SocketAddr,
    /// Room whose next datagram sender this connection expects to be enrolled
    joined_room: Option<RoomName>,
}

impl ControlSession {
    pub fn new(peer: SocketAddr) -> Self {
        Self {
            peer,
            joined_room: None,
        }
    }

    pub fn joined_room(&self) -> Option<&RoomName> {
        self.joined_room.as_ref()
    }
}

/// Longest accepted request line, terminator included
pub const MAX_REQUEST_LINE_BYTES: usize = 4096;

/// One request line as read off the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestLine {
    /// A complete UTF-8 line, terminator stripped
    Text(String),
    /// The line is not valid UTF-8
    InvalidUtf8,
    /// The line exceeded the limit; the rest of it was discarded
    TooLong,
}

/// Read one newline-terminated request, holding at most `max_len` bytes.
///
/// Returns `Ok(None)` at end of stream. An oversized line is consumed up to
/// its newline so the next request starts on a line boundary.
pub async fn read_request_line<R>(
    reader: &mut R,
    max_len: usize,
) -> std::io::Result<Option<RequestLine>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let read = (&mut *reader)
        .take(max_len as u64)
        .read_until(b'\n', &mut buf)
        .await?;
    if read == 0 {
        return Ok(None);
    }

    if buf.len() == max_len && !buf.ends_with(b"\n") {
        loop {
            buf.clear();
            let skipped = (&mut *reader)
                .take(max_len as u64)
                .read_until(b'\n', &mut buf)
                .await?;
            if skipped == 0 || buf.ends_with(b"\n") {
                break;
            }
        }
        return Ok(Some(RequestLine::TooLong));
    }

    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(Some(match String::from_utf8(buf) {
        Ok(line) => RequestLine::Text(line),
        Err(_) => RequestLine::InvalidUtf8,
    }))
}

/// Serve one control connection until it is closed.
pub async fn handle_control_connection(
    stream: TcpStream,
    peer: SocketAddr,
    state: Arc<AppState>,
) {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut session = ControlSession::new(peer);

    loop {
        let request = match read_request_line(&mut reader, MAX_REQUEST_LINE_BYTES).await {
            Ok(Some(request)) => request,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Failed to read from client {}: {}", peer, e);
                break;
            }
        };

        let response = match request {
            RequestLine::Text(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                tracing::debug!("From client {}: {}", peer, line);
                handle_request_line(&state, &mut session, &line).await
            }
            RequestLine::InvalidUtf8 => {
                tracing::warn!("Rejected non UTF-8 request from {}", peer);
                ControlResponse::error(ErrorKind::MalformedFrame, "request is not valid UTF-8")
            }
            RequestLine::TooLong => {
                tracing::warn!("Rejected oversized request from {}", peer);
                ControlResponse::error(
                    ErrorKind::MalformedFrame,
                    format!("request exceeds {} bytes", MAX_REQUEST_LINE_BYTES),
                )
            }
        };

        let payload = match response.to_line() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize response for {}: {}", peer, e);
                break;
            }
        };
        if let Err(e) = writer.write_all(payload.as_bytes()).await {
            tracing::warn!("Failed to send response to {}: {}", peer, e);
            break;
        }
    }

    tracing::info!("Client {} disconnected", peer);
}

/// Execute one request line and build its response.
///
/// Every failure becomes an `error` response; the session always continues.
pub async fn handle_request_line(
    state: &AppState,
    session: &mut ControlSession,
    line: &str,
) -> ControlResponse {
    let request = match ControlRequest::parse(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected malformed request from {}: {}", session.peer, e);
            return ControlResponse::error(ErrorKind::MalformedFrame, e.to_string());
        }
    };

    match request {
        ControlRequest::Create {
            room_name,
            title,
            max_participants,
        } => {
            match state
                .create_room_usecase
                .execute(&room_name, &title, &max_participants)
                .await
            {
                Ok(room) => {
                    ControlResponse::ok(format!("Successfully created chat room '{}'.", room.name))
                }
                Err(e) => {
                    tracing::warn!("Rejected create from {}: {}", session.peer, e);
                    let kind = match e {
                        CreateRoomError::DuplicateRoom(_) => ErrorKind::DuplicateRoom,
                        CreateRoomError::InvalidRequest(_) => ErrorKind::InvalidRequest,
                        CreateRoomError::Registry(_) => ErrorKind::Internal,
                    };
                    ControlResponse::error(kind, e.to_string())
                }
            }
        }
        ControlRequest::Show => {
            let rooms = state.list_rooms_usecase.execute().await;
            ControlResponse::RoomList(RoomListDto::from(rooms.as_slice()))
        }
        ControlRequest::Join { room_name } => {
            match state.join_room_usecase.execute(&room_name).await {
                Ok(room) => {
                    tracing::info!(
                        "Client {} joining '{}' ({}/{}), awaiting handshake datagram",
                        session.peer,
                        room.name,
                        room.participant_count(),
                        room.capacity.get()
                    );
                    let message = format!("You're in '{}'", room.name);
                    session.joined_room = Some(room.name);
                    ControlResponse::ok(message)
                }
                Err(e) => {
                    tracing::warn!("Rejected join from {}: {}", session.peer, e);
                    let kind = match e {
                        JoinRoomError::RoomNotFound(_) => ErrorKind::RoomNotFound,
                        JoinRoomError::InvalidRequest(_) => ErrorKind::InvalidRequest,
                        JoinRoomError::Registry(_) => ErrorKind::Internal,
                    };
                    ControlResponse::error(kind, e.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MockDatagramPusher,
        infrastructure::repository::InMemoryRoomRepository,
        usecase::{CreateRoomUseCase, JoinRoomUseCase, ListRoomsUseCase, RelayMessageUseCase},
    };
    use hiroba_shared::time::FixedClock;

    fn create_state() -> AppState {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let clock = Arc::new(FixedClock::new(1672498800000));
        AppState {
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            list_rooms_usecase: Arc::new(ListRoomsUseCase::new(repository.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(repository.clone())),
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(
                repository,
                Arc::new(MockDatagramPusher::new()),
                clock,
            )),
        }
    }

    fn create_session() -> ControlSession {
        ControlSession::new("127.0.0.1:40000".parse().unwrap())
    }

    #[tokio::test]
    async fn test_read_request_line_strips_terminator() {
        // テスト項目: 改行 (CRLF を含む) を取り除いた 1 行が読み取られ、終端で None になる
        // given (前提条件):
        let mut input: &[u8] = b"_:show\r\nlobby:join\n";

        // when (操作):
        let first = read_request_line(&mut input, 64).await.unwrap();
        let second = read_request_line(&mut input, 64).await.unwrap();
        let end = read_request_line(&mut input, 64).await.unwrap();

        // then (期待する結果):
        assert_eq!(first, Some(RequestLine::Text("_:show".to_string())));
        assert_eq!(second, Some(RequestLine::Text("lobby:join".to_string())));
        assert_eq!(end, None);
    }

    #[tokio::test]
    async fn test_read_request_line_reports_invalid_utf8_and_continues() {
        // テスト項目: UTF-8 でない行は InvalidUtf8 となり、次の行は通常どおり読める
        // given (前提条件):
        let mut input: &[u8] = b"caf\xe9:create:Main:2\n_:show\n";

        // when (操作):
        let first = read_request_line(&mut input, 64).await.unwrap();
        let second = read_request_line(&mut input, 64).await.unwrap();

        // then (期待する結果):
        assert_eq!(first, Some(RequestLine::InvalidUtf8));
        assert_eq!(second, Some(RequestLine::Text("_:show".to_string())));
    }

    #[tokio::test]
    async fn test_read_request_line_discards_oversized_line() {
        // テスト項目: 上限を超える行は TooLong となり、行の残りは読み捨てられる
        // given (前提条件):
        let mut bytes = vec![b'x'; 100];
        bytes.extend_from_slice(b"\n_:show\n");
        let mut input: &[u8] = &bytes;

        // when (操作):
        let first = read_request_line(&mut input, 16).await.unwrap();
        let second = read_request_line(&mut input, 16).await.unwrap();

        // then (期待する結果):
        assert_eq!(first, Some(RequestLine::TooLong));
        assert_eq!(second, Some(RequestLine::Text("_:show".to_string())));
    }

    #[tokio::test]
    async fn test_read_request_line_accepts_last_line_without_newline() {
        // テスト項目: 改行のない最後の行もそのまま読み取られる
        // given (前提条件):
        let mut input: &[u8] = b"_:show";

        // when (操作):
        let line = read_request_line(&mut input, 64).await.unwrap();

        // then (期待する結果):
        assert_eq!(line, Some(RequestLine::Text("_:show".to_string())));
    }

    #[tokio::test]
    async fn test_create_then_show() {
        // テスト項目: create したルームが show の一覧に現れる
        // given (前提条件):
        let state = create_state();
        let mut session = create_session();

        // when (操作):
        let created = handle_request_line(&state, &mut session, "lobby:create:Main:2").await;
        let listed = handle_request_line(&state, &mut session, "_:show").await;

        // then (期待する結果):
        assert_eq!(
            created,
            ControlResponse::ok("Successfully created chat room 'lobby'.")
        );
        let ControlResponse::RoomList(list) = listed else {
            panic!("expected room list, got {:?}", listed);
        };
        assert_eq!(list.schema_version, 1);
        assert_eq!(list.rooms.len(), 1);
        assert_eq!(list.rooms[0].room_name, "lobby");
        assert_eq!(list.rooms[0].title, "Main");
        assert_eq!(list.rooms[0].participant_count, 0);
        assert_eq!(list.rooms[0].capacity, 2);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_reported() {
        // テスト項目: 同名ルームの create はエラーとして返され、セッションは継続する
        // given (前提条件):
        let state = create_state();
        let mut session = create_session();
        handle_request_line(&state, &mut session, "r:create:First:2").await;

        // when (操作):
        let response = handle_request_line(&state, &mut session, "r:create:Second:3").await;

        // then (期待する結果):
        assert_eq!(
            response,
            ControlResponse::error(ErrorKind::DuplicateRoom, "Room 'r' already exists")
        );
    }

    #[tokio::test]
    async fn test_invalid_capacity_is_rejected() {
        // テスト項目: 不正な定員の create は InvalidRequest として返される
        // given (前提条件):
        let state = create_state();
        let mut session = create_session();

        // when (操作):
        let zero = handle_request_line(&state, &mut session, "lobby:create:Main:0").await;
        let text = handle_request_line(&state, &mut session, "lobby:create:Main:lots").await;

        // then (期待する結果):
        assert!(matches!(
            zero,
            ControlResponse::Error {
                kind: ErrorKind::InvalidRequest,
                ..
            }
        ));
        assert!(matches!(
            text,
            ControlResponse::Error {
                kind: ErrorKind::InvalidRequest,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_join_records_room_without_enrolling() {
        // テスト項目: join はルームを記録するが、参加者は増やさない
        // given (前提条件):
        let state = create_state();
        let mut session = create_session();
        handle_request_line(&state, &mut session, "lobby:create:Main:2").await;

        // when (操作):
        let response = handle_request_line(&state, &mut session, "lobby:join").await;

        // then (期待する結果):
        assert_eq!(response, ControlResponse::ok("You're in 'lobby'"));
        assert_eq!(session.joined_room().map(RoomName::as_str), Some("lobby"));
        let rooms = state.list_rooms_usecase.execute().await;
        assert_eq!(rooms[0].participant_count(), 0);
    }

    #[tokio::test]
    async fn test_join_unknown_room_is_reported() {
        // テスト項目: 存在しないルームへの join は RoomNotFound として返される
        // given (前提条件):
        let state = create_state();
        let mut session = create_session();

        // when (操作):
        let response = handle_request_line(&state, &mut session, "ghost:join").await;

        // then (期待する結果):
        assert_eq!(
            response,
            ControlResponse::error(ErrorKind::RoomNotFound, "Room 'ghost' not found")
        );
        assert!(session.joined_room().is_none());
    }

    #[tokio::test]
    async fn test_malformed_request_is_reported() {
        // テスト項目: 解析できないリクエストは MalformedFrame として返される
        // given (前提条件):
        let state = create_state();
        let mut session = create_session();

        // when (操作):
        let response = handle_request_line(&state, &mut session, "gibberish").await;

        // then (期待する結果):
        assert!(matches!(
            response,
            ControlResponse::Error {
                kind: ErrorKind::MalformedFrame,
                ..
            }
        ));
    }
}
