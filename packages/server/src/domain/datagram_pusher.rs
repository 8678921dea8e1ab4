//! DatagramPusher trait 定義
//!
//! 参加者へのデータグラム送信の抽象化。
//! UDP ソケットを使った実装は Infrastructure 層が提供します。

use async_trait::async_trait;

use super::{error::DatagramPushError, value_object::ParticipantId};

/// 参加者へデータグラムを送信する trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatagramPusher: Send + Sync {
    /// 1 つの参加者に 1 つのデータグラムを送信する
    async fn push_to(
        &self,
        target: &ParticipantId,
        payload: &[u8],
    ) -> Result<(), DatagramPushError>;
}
