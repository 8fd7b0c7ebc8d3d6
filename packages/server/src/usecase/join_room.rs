//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 未知の Room の生成、メンバー追加、参加者へのスナップショット送信
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規 Room への参加、既存 Room への参加
//! - エッジケース：同じピアの二重参加、1 つのピアによる複数 Room への参加

use std::sync::Arc;

use tandem_shared::time::Clock;

use crate::domain::{MessagePusher, Notification, PeerId, Room, RoomId, RoomRepository, Timestamp};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
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

    /// ルーム参加を実行
    ///
    /// 初回参加時に Room を作成し、ピアをメンバーに追加（二重参加は無害）して、
    /// 参加したピアにだけ `room_state` スナップショットを送信する。
    pub async fn execute(&self, peer_id: PeerId, room_id: RoomId) -> Result<Room, JoinRoomError> {
        let now = Timestamp::new(self.clock.now_millis());
        self.repository.get_or_create_room(room_id.clone(), now).await;
        let room = self.repository.add_member(&room_id, peer_id.clone()).await?;

        tracing::info!(
            "Peer '{}' joined room '{}' ({} members)",
            peer_id,
            room_id,
            room.members.len()
        );

        if let Err(e) = self
            .message_pusher
            .push_to(&peer_id, &Notification::RoomState(room.clone()))
            .await
        {
            tracing::warn!("Failed to send room state to '{}': {}", peer_id, e);
        }

        Ok(room)
    }
}
