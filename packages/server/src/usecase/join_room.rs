//! UseCase: ルーム参加（コントロールプレーン側）
//!
//! コントロール接続での `join` はルームの存在確認のみを行います。
//! 実際の入室はハンドシェイクのデータグラムが届いた時点でディスパッチャが行います
//! （TCP 接続と UDP の送信元アドレスは別物のため）。

use std::sync::Arc;

use crate::domain::{RepositoryError, Room, RoomName, RoomRepository};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルームの存在を確認し、現在のスナップショットを返す
    pub async fn execute(&self, room_name: &str) -> Result<Room, JoinRoomError> {
        let name = RoomName::try_from(room_name)?;
        self.repository.get_room(&name).await.map_err(|e| match e {
            RepositoryError::RoomNotFound(name) => JoinRoomError::RoomNotFound(name),
            other => JoinRoomError::Registry(other),
        })
    }
}
