//! UseCase: キュー操作処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - QueueCommandUseCase::execute() メソッド
//! - 追加・削除・クリア後のキュー全体が全メンバーにブロードキャストされること
//!
//! ### どのような状況を想定しているか
//! - 正常系：A が追加した項目を B が ID 指定で削除する
//! - 異常系：存在しない Room へのコマンド
//! - エッジケース：存在しない ID の削除、Ignored コマンド

use std::sync::Arc;

use tandem_shared::time::Clock;

use crate::domain::{
    MessagePusher, Notification, PeerId, QueueAction, QueueItem, RoomId, RoomRepository,
    Timestamp,
};

use super::error::CommandError;

/// キュー操作のユースケース
pub struct QueueCommandUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl QueueCommandUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// キュー操作を実行
    ///
    /// 追加する項目には新しい ID・送信者・現在時刻を付与する。
    /// 操作後のキュー全体を全メンバーにブロードキャストする（変化がなくても送信する）。
    ///
    /// # Errors
    ///
    /// Room が存在しない場合は `CommandError::RoomNotFound`。
    /// 送信者にだけ `error` を返し、ブロードキャストはしない。
    pub async fn execute(
        &self,
        peer_id: PeerId,
        room_id: RoomId,
        action: QueueAction,
    ) -> Result<Vec<QueueItem>, CommandError> {
        let command = action.resolve(&peer_id, Timestamp::new(self.clock.now_millis()));

        let room = match self.repository.apply_queue_command(&room_id, command).await {
            Ok(room) => room,
            Err(e) => {
                let error = CommandError::from(e);
                if let Err(e) = self
                    .message_pusher
                    .push_to(&peer_id, &error.to_notification())
                    .await
                {
                    tracing::warn!("Failed to send error to '{}': {}", peer_id, e);
                }
                return Err(error);
            }
        };

        let items = room.queue.items().to_vec();
        tracing::debug!(
            "Queue of room '{}' updated by '{}' ({} items)",
            room_id,
            peer_id,
            items.len()
        );

        if let Err(e) = self
            .message_pusher
            .broadcast(room.member_ids(), &Notification::QueueUpdate(items.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast queue of '{}': {}", room_id, e);
        }

        Ok(items)
    }
}
