//! Repository trait 定義
//!
//! ルームレジストリへのアクセスインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 同期の規律
//!
//! 実装は全ての操作を 1 つの排他区間で実行しなければなりません。
//! `enroll_participant` は「ルームの検索 → 定員チェック → 追加 → 参加者一覧の取得」を
//! 同一の排他区間で行うため、残り 1 枠に対する同時入室が両方とも成功することはありません。

use async_trait::async_trait;

use super::{
    entity::{Admission, Participant, Room},
    error::RepositoryError,
    value_object::{ParticipantId, RoomName},
};

/// 入室処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    /// 入室結果（新規 / 既存）
    pub admission: Admission,
    /// 入室処理直後の参加者一覧（入室順）
    pub participants: Vec<ParticipantId>,
}

/// Room Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
/// 返される `Room` は全てスナップショット（所有権付きのコピー）であり、
/// 呼び出し側が変更してもレジストリには影響しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを登録する（同名のルームが存在する場合は `DuplicateRoom`）
    async fn create_room(&self, room: Room) -> Result<Room, RepositoryError>;

    /// ルームを取得する（存在しない場合は `RoomNotFound`）
    async fn get_room(&self, name: &RoomName) -> Result<Room, RepositoryError>;

    /// 全ルームのスナップショットを名前順で取得する
    async fn list_rooms(&self) -> Vec<Room>;

    /// 参加者をルームに入室させ、入室後の参加者一覧を返す
    async fn enroll_participant(
        &self,
        name: &RoomName,
        participant: Participant,
    ) -> Result<Enrollment, RepositoryError>;
}
