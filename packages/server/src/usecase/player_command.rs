//! UseCase: プレイヤー操作処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PlayerCommandUseCase::execute() メソッド
//! - コマンド適用後の player_state_update が送信者を含む全メンバーに届くこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：load_video による状態更新とブロードキャスト
//! - 異常系：存在しない Room へのコマンド（送信者にだけ error）
//! - エッジケース：Ignored コマンドでも現在の状態がブロードキャストされる

use std::sync::Arc;

use crate::domain::{
    MessagePusher, Notification, PeerId, PlayerCommand, PlayerState, RoomId, RoomRepository,
};

use super::error::CommandError;

/// プレイヤー操作のユースケース
pub struct PlayerCommandUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl PlayerCommandUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// プレイヤー操作を実行
    ///
    /// 適用後のプレイヤー状態を、送信者を含む Room の全メンバーにブロードキャストする
    /// （状態が変化しなくても送信する）。
    ///
    /// # Errors
    ///
    /// Room が存在しない場合は `CommandError::RoomNotFound`。
    /// 送信者にだけ `error` を返し、ブロードキャストはしない。
    pub async fn execute(
        &self,
        peer_id: PeerId,
        room_id: RoomId,
        command: PlayerCommand,
    ) -> Result<PlayerState, CommandError> {
        let room = match self.repository.apply_player_command(&room_id, &command).await {
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

        tracing::debug!(
            "Applied {:?} from '{}' to room '{}'",
            command,
            peer_id,
            room_id
        );

        if let Err(e) = self
            .message_pusher
            .broadcast(
                room.member_ids(),
                &Notification::PlayerStateUpdate(room.player.clone()),
            )
            .await
        {
            tracing::warn!("Failed to broadcast player state of '{}': {}", room_id, e);
        }

        Ok(room.player)
    }
}
