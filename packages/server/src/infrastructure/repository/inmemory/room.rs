//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! ルーム名をキーとする HashMap をインメモリのレジストリとして使用します。
//!
//! ## 排他制御
//!
//! レジストリ全体を 1 つの `tokio::sync::Mutex` で保護します。
//! ルーム単位のロックは最適化に過ぎず、同時実行数は接続数で抑えられるため採用していません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Enrollment, Participant, RepositoryError, Room, RoomName, RoomRepository,
};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// ルーム名 → Room
    rooms: Mutex<HashMap<RoomName, Room>>,
}

impl InMemoryRoomRepository {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self, room: Room) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&room.name) {
            return Err(RepositoryError::DuplicateRoom(
                room.name.as_str().to_string(),
            ));
        }
        rooms.insert(room.name.clone(), room.clone());
        Ok(room)
    }

    async fn get_room(&self, name: &RoomName) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(name)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(name.as_str().to_string()))
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut snapshot: Vec<Room> = rooms.values().cloned().collect();
        snapshot.sort_by(|a, b| a.name.cmp(&b.name));
        snapshot
    }

    async fn enroll_participant(
        &self,
        name: &RoomName,
        participant: Participant,
    ) -> Result<Enrollment, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(name)
            .ok_or_else(|| RepositoryError::RoomNotFound(name.as_str().to_string()))?;

        let admission = room.admit(participant)?;

        Ok(Enrollment {
            admission,
            participants: room.list_participants(),
        })
    }
}
