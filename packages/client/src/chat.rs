//! Data-plane session for a joined room.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use hiroba_server::{infrastructure::dto::datagram::DatagramFrame, ui::DEFAULT_MAX_DATAGRAM_SIZE};
use tokio::{net::UdpSocket, task::JoinHandle};

use crate::error::ClientError;

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Receive buffer for relayed datagrams
const RECV_BUFFER_SIZE: usize = 2048;

/// A joined room: sends typed lines and prints relayed messages
pub struct ChatSession {
    room_name: String,
    server_addr: SocketAddr,
    socket: Arc<UdpSocket>,
    listener: JoinHandle<()>,
}

impl ChatSession {
    /// Bind a datagram endpoint, send the handshake and start listening
    pub async fn start(server_addr: SocketAddr, room_name: &str) -> Result<Self, ClientError> {
        let bind_addr: SocketAddr = if server_addr.is_ipv6() {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        };
        let socket = Arc::new(UdpSocket::bind(bind_addr).await?);

        let handshake = DatagramFrame::handshake(room_name);
        socket.send_to(&handshake.to_bytes(), server_addr).await?;
        tracing::debug!(
            "Sent handshake for '{}' from {:?}",
            room_name,
            socket.local_addr()
        );

        let listener = tokio::spawn(listen(Arc::clone(&socket)));

        Ok(Self {
            room_name: room_name.to_string(),
            server_addr,
            socket,
            listener,
        })
    }

    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    /// Send one chat line to the room.
    ///
    /// Frames larger than the server's receive buffer are refused rather than
    /// sent and truncated.
    pub async fn send(&self, text: &str) -> Result<(), ClientError> {
        let bytes = DatagramFrame::new(self.room_name.as_str(), text).to_bytes();
        if bytes.len() > DEFAULT_MAX_DATAGRAM_SIZE {
            return Err(ClientError::MessageTooLong {
                size: bytes.len(),
                max: DEFAULT_MAX_DATAGRAM_SIZE,
            });
        }
        self.socket.send_to(&bytes, self.server_addr).await?;
        Ok(())
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

async fn listen(socket: Arc<UdpSocket>) {
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];
    loop {
        match socket.recv_from(&mut buf).await {
            Ok((len, from)) => {
                let text = String::from_utf8_lossy(&buf[..len]);
                tracing::debug!("Received {} bytes from {}", len, from);
                print!("{}", MessageFormatter::format_incoming(&text));
                redisplay_prompt();
            }
            Err(e) => {
                tracing::warn!("Datagram receive error: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_sends_handshake_and_send_frames_text() {
        // テスト項目: 開始時にハンドシェイクが送られ、send はフレーム化して送信する
        // given (前提条件):
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();

        // when (操作):
        let session = ChatSession::start(server_addr, "lobby").await.unwrap();
        let mut buf = [0u8; 128];
        let (len, client_addr) = server.recv_from(&mut buf).await.unwrap();
        let handshake = buf[..len].to_vec();

        session.send("a:b").await.unwrap();
        let (len, _) = server.recv_from(&mut buf).await.unwrap();
        let chat = buf[..len].to_vec();

        // then (期待する結果):
        assert_eq!(handshake, b"lobby:6:Hello!");
        assert_eq!(chat, b"lobby:3:a:b");
        assert!(client_addr.ip().is_loopback());
        assert_eq!(session.room_name(), "lobby");
    }

    #[tokio::test]
    async fn test_send_rejects_message_larger_than_server_datagram() {
        // テスト項目: サーバーの受信バッファを超えるメッセージは送信されずエラーになる
        // given (前提条件):
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let session = ChatSession::start(server.local_addr().unwrap(), "lobby")
            .await
            .unwrap();
        let mut buf = [0u8; 2048];
        server.recv_from(&mut buf).await.unwrap();
        let text = "a".repeat(DEFAULT_MAX_DATAGRAM_SIZE);

        // when (操作):
        let result = session.send(&text).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ClientError::MessageTooLong { max, .. }) if max == DEFAULT_MAX_DATAGRAM_SIZE
        ));
        let nothing = tokio::time::timeout(
            std::time::Duration::from_millis(200),
            server.recv_from(&mut buf),
        )
        .await;
        assert!(nothing.is_err());
    }

    #[tokio::test]
    async fn test_send_accepts_message_that_fits() {
        // テスト項目: ちょうど上限に収まるメッセージは送信される
        // given (前提条件):
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let session = ChatSession::start(server.local_addr().unwrap(), "lobby")
            .await
            .unwrap();
        let mut buf = [0u8; 2048];
        server.recv_from(&mut buf).await.unwrap();
        // "lobby:1013:" is 11 bytes
        let text = "a".repeat(DEFAULT_MAX_DATAGRAM_SIZE - 11);

        // when (操作):
        let result = session.send(&text).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let (len, _) = server.recv_from(&mut buf).await.unwrap();
        assert_eq!(len, DEFAULT_MAX_DATAGRAM_SIZE);
    }
}
