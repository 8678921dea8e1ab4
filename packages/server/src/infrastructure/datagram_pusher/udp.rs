//! UDP を使った DatagramPusher 実装
//!
//! ## 設計ノート
//!
//! ソケットはディスパッチャと共有されます。受信はディスパッチャのみが行い、
//! この実装は送信（`send_to`）のみを行います。
//! リレーされたデータグラムの送信元ポートがサーバーのポートになるため、
//! クライアントは 1 つのアドレスとだけ通信すれば済みます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::UdpSocket;

use crate::domain::{DatagramPushError, DatagramPusher, ParticipantId};

/// UDP ソケットを使った DatagramPusher 実装
pub struct UdpDatagramPusher {
    socket: Arc<UdpSocket>,
}

impl UdpDatagramPusher {
    /// 共有 UDP ソケットから作成
    pub fn new(socket: Arc<UdpSocket>) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl DatagramPusher for UdpDatagramPusher {
    async fn push_to(
        &self,
        target: &ParticipantId,
        payload: &[u8],
    ) -> Result<(), DatagramPushError> {
        let sent = self
            .socket
            .send_to(payload, target.addr())
            .await
            .map_err(|e| DatagramPushError::SendFailed {
                target: target.key(),
                reason: e.to_string(),
            })?;

        if sent != payload.len() {
            return Err(DatagramPushError::SendFailed {
                target: target.key(),
                reason: format!("short write ({} of {} bytes)", sent, payload.len()),
            });
        }

        tracing::trace!("Pushed {} bytes to {}", sent, target);
        Ok(())
    }
}
