//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RepositoryError, RoomError, ValueObjectError};

/// ルーム作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error(transparent)]
    InvalidRequest(#[from] ValueObjectError),

    #[error("Room '{0}' already exists")]
    DuplicateRoom(String),

    #[error(transparent)]
    Registry(RepositoryError),
}

/// ルーム参加（存在確認）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error(transparent)]
    InvalidRequest(#[from] ValueObjectError),

    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error(transparent)]
    Registry(RepositoryError),
}

/// データグラムのリレーのエラー（全てデータグラムの破棄で終わる）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error(transparent)]
    InvalidRoomName(#[from] ValueObjectError),

    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error(transparent)]
    RoomFull(RoomError),

    #[error(transparent)]
    Registry(RepositoryError),
}

impl From<RepositoryError> for RelayError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(name) => Self::RoomNotFound(name),
            RepositoryError::Room(e) => Self::RoomFull(e),
            other => Self::Registry(other),
        }
    }
}
