//! Shared application state.

use std::sync::Arc;

use crate::usecase::{CreateRoomUseCase, JoinRoomUseCase, ListRoomsUseCase, RelayMessageUseCase};

/// State shared by every control session and the dispatcher
pub struct AppState {
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// ListRoomsUseCase（ルーム一覧取得のユースケース）
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// RelayMessageUseCase（データグラムのリレーのユースケース）
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
}
