//! UseCase: データグラムのリレー処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 初回の送信元の入室、定員超過時の破棄、送信者以外へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - ディスパッチャの中核：入室とリレーの判断はここだけで行われる
//! - 送信者へのエコーや、満員ルームへの割り込みを防ぐ必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：ハンドシェイクによる入室、チャットのブロードキャスト
//! - 異常系：存在しないルーム、満員ルーム、一部の宛先への送信失敗
//! - エッジケース：参加者が送信者のみ（ブロードキャスト対象なし）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    Admission, DatagramPusher, Participant, ParticipantId, RoomName, RoomRepository, Timestamp,
};

use super::error::RelayError;

/// ディスパッチャが受け取ったデータグラムの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundDatagram {
    /// ハンドシェイク。未入室の送信者からなら入室のみ行い、
    /// 入室済みの参加者からなら通常のチャットとしてリレーする
    Handshake { relayed: String },
    /// チャットメッセージ（`relayed` は送信者付きの整形済みテキスト）
    Chat { relayed: String },
}

/// リレー処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    /// 送信者の入室結果
    pub admission: Admission,
    /// 送信に成功した宛先
    pub recipients: Vec<ParticipantId>,
    /// 送信に失敗した宛先
    pub failed: Vec<ParticipantId>,
}

/// データグラムのリレーのユースケース
pub struct RelayMessageUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// DatagramPusher（データグラム送信の抽象化）
    datagram_pusher: Arc<dyn DatagramPusher>,
    /// 入室時刻の取得元
    clock: Arc<dyn Clock>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        datagram_pusher: Arc<dyn DatagramPusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            datagram_pusher,
            clock,
        }
    }

    /// リレーを実行
    ///
    /// 1. 送信者が未入室なら入室させる（満員なら `RoomFull` で破棄）
    /// 2. 新規入室のハンドシェイクでなければ、送信者以外の全参加者に 1 つずつデータグラムを送る
    ///
    /// 一部の宛先への送信失敗は処理を止めず、`failed` に記録する。
    pub async fn execute(
        &self,
        sender: ParticipantId,
        room_name: &str,
        datagram: InboundDatagram,
    ) -> Result<RelayOutcome, RelayError> {
        let name = RoomName::try_from(room_name)?;
        let participant = Participant::new(sender, Timestamp::new(self.clock.now_jst_millis()));

        // 1. 入室（未入室の場合のみ枠を消費する）
        let enrollment = self
            .repository
            .enroll_participant(&name, participant)
            .await?;

        if let Admission::Admitted { host } = enrollment.admission {
            tracing::info!(
                "Participant {} admitted to '{}'{} ({} participants: {})",
                sender,
                name,
                if host { " as host" } else { "" },
                enrollment.participants.len(),
                format_participants(&enrollment.participants)
            );
        }

        let mut outcome = RelayOutcome {
            admission: enrollment.admission,
            recipients: Vec::new(),
            failed: Vec::new(),
        };

        let relayed = match (datagram, enrollment.admission) {
            (InboundDatagram::Chat { relayed }, _) => relayed,
            // 入室済みの参加者がハンドシェイクと同じ文字列を送った場合はチャット扱い
            (InboundDatagram::Handshake { relayed }, Admission::AlreadyMember) => relayed,
            (InboundDatagram::Handshake { .. }, Admission::Admitted { .. }) => {
                return Ok(outcome);
            }
        };

        // 2. 送信者以外へブロードキャスト
        for target in get_broadcast_targets(&enrollment.participants, &sender) {
            match self
                .datagram_pusher
                .push_to(&target, relayed.as_bytes())
                .await
            {
                Ok(()) => outcome.recipients.push(target),
                Err(e) => {
                    tracing::warn!("{}", e);
                    outcome.failed.push(target);
                }
            }
        }

        tracing::debug!(
            "Relayed message from {} in '{}' to {} participant(s)",
            sender,
            name,
            outcome.recipients.len()
        );

        Ok(outcome)
    }
}

/// ブロードキャスト対象（送信者以外の全参加者）を取得
fn get_broadcast_targets(
    participants: &[ParticipantId],
    exclude: &ParticipantId,
) -> Vec<ParticipantId> {
    participants
        .iter()
        .filter(|id| *id != exclude)
        .copied()
        .collect()
}

fn format_participants(participants: &[ParticipantId]) -> String {
    participants
        .iter()
        .map(ParticipantId::key)
        .collect::<Vec<_>>()
        .join(", ")
}
