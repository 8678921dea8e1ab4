//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - 入力値の検証（ルーム名・タイトル・定員）とレジストリへの登録
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームの作成
//! - 異常系：同名ルームの作成、不正な定員（0 / 数値以外）
//! - エッジケース：重複作成後も元のルームが変化しないこと

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    Capacity, RepositoryError, Room, RoomName, RoomRepository, RoomTitle, Timestamp,
};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// 作成時刻の取得元
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// ルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `room_name` - ルーム名（ワイヤ上の生の値）
    /// * `title` - タイトル
    /// * `max_participants` - 定員（1 以上の整数の文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 作成されたルームのスナップショット
    /// * `Err(CreateRoomError)` - 入力が不正、または同名のルームが存在する
    pub async fn execute(
        &self,
        room_name: &str,
        title: &str,
        max_participants: &str,
    ) -> Result<Room, CreateRoomError> {
        let name = RoomName::try_from(room_name)?;
        let title = RoomTitle::try_from(title)?;
        let capacity: Capacity = max_participants.parse()?;

        let room = Room::new(
            name,
            title,
            capacity,
            Timestamp::new(self.clock.now_jst_millis()),
        );

        let room = self
            .repository
            .create_room(room)
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateRoom(name) => CreateRoomError::DuplicateRoom(name),
                other => CreateRoomError::Registry(other),
            })?;

        tracing::info!(
            "Successfully created chat room '{}' (title: '{}', max participants: {})",
            room.name,
            room.title.as_str(),
            room.capacity.get()
        );

        Ok(room)
    }
}
