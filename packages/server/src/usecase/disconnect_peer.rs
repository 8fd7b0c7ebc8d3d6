//! UseCase: ピア切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPeerUseCase::execute() メソッド
//! - 切断したピアが全ての Room から外れ、空になった Room が削除されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：N 人参加して全員切断 → Room が残らない
//! - 正常系：N 人参加して N-1 人切断 → Room と状態が残る
//! - エッジケース：複数 Room に参加したピアの切断、どの Room にも参加していないピアの切断

use std::sync::Arc;

use crate::domain::{MessagePusher, PeerId, RoomId, RoomRepository};

/// 切断によって影響を受けた Room
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisconnectOutcome {
    /// ピアが外れた全ての Room
    pub left_rooms: Vec<RoomId>,
    /// 最後のメンバーだったために削除された Room
    pub deleted_rooms: Vec<RoomId>,
}

/// ピア切断のユースケース
pub struct DisconnectPeerUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectPeerUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ピア切断を実行
    ///
    /// ピアを参加中の全ての Room から外し、メンバーがいなくなった Room を削除する。
    /// 誰にもメッセージは送信しない。
    pub async fn execute(&self, peer_id: PeerId) -> DisconnectOutcome {
        let mut outcome = DisconnectOutcome::default();

        for room_id in self.repository.find_rooms_by_member(&peer_id).await {
            match self.repository.remove_member(&room_id, &peer_id).await {
                Ok(0) => {
                    self.repository.delete_room(&room_id).await;
                    outcome.deleted_rooms.push(room_id.clone());
                }
                Ok(remaining) => {
                    tracing::debug!("Room '{}' has {} members left", room_id, remaining);
                }
                Err(e) => {
                    tracing::warn!("Failed to remove '{}' from '{}': {}", peer_id, room_id, e);
                    continue;
                }
            }
            outcome.left_rooms.push(room_id);
        }

        self.message_pusher.unregister_client(&peer_id).await;
        tracing::info!(
            "Peer '{}' disconnected (left {} rooms, {} deleted)",
            peer_id,
            outcome.left_rooms.len(),
            outcome.deleted_rooms.len()
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockMessagePusher, PlayerCommand, QueueAction, Timestamp},
        infrastructure::repository::InMemoryRoomRepository,
    };

    fn create_pusher() -> Arc<MockMessagePusher> {
        let mut pusher = MockMessagePusher::new();
        pusher.expect_unregister_client().return_const(());
        pusher.expect_push_to().never();
        pusher.expect_broadcast().never();
        Arc::new(pusher)
    }

    async fn join(repository: &InMemoryRoomRepository, room_id: &str, peer_id: &str) {
        repository
            .get_or_create_room(RoomId::from(room_id), Timestamp::new(0))
            .await;
        repository
            .add_member(&RoomId::from(room_id), PeerId::from(peer_id))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_all_members_leave_room_is_deleted() {
        // テスト項目: N 人が参加して全員切断すると Room が削除される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::default());
        let peers = ["alice", "bob", "charlie", "dave"];
        for peer in peers {
            join(&repository, "x", peer).await;
        }
        let usecase = DisconnectPeerUseCase::new(repository.clone(), create_pusher());

        // when (操作):
        let mut outcomes = Vec::new();
        for peer in peers {
            outcomes.push(usecase.execute(PeerId::from(peer)).await);
        }

        // then (期待する結果):
        assert!(repository.get_room(&RoomId::from("x")).await.is_err());
        assert_eq!(repository.count_rooms().await, 0);
        // 最後の 1 人の切断で削除される
        assert!(outcomes[..3].iter().all(|o| o.deleted_rooms.is_empty()));
        assert_eq!(outcomes[3].deleted_rooms, vec![RoomId::from("x")]);
    }

    #[tokio::test]
    async fn test_room_survives_while_one_member_remains() {
        // テスト項目: N-1 人が切断しても Room と状態は保持される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::default());
        for peer in ["alice", "bob", "charlie"] {
            join(&repository, "x", peer).await;
        }
        let room_id = RoomId::from("x");
        repository
            .apply_player_command(&room_id, &PlayerCommand::Play)
            .await
            .unwrap();
        repository
            .apply_queue_command(
                &room_id,
                QueueAction::AddToQueue {
                    video_id: "v".to_string(),
                    title: String::new(),
                }
                .resolve(&PeerId::from("alice"), Timestamp::new(0)),
            )
            .await
            .unwrap();
        let before = repository.get_room(&room_id).await.unwrap();
        let usecase = DisconnectPeerUseCase::new(repository.clone(), create_pusher());

        // when (操作):
        usecase.execute(PeerId::from("alice")).await;
        usecase.execute(PeerId::from("bob")).await;

        // then (期待する結果):
        let after = repository.get_room(&room_id).await.unwrap();
        assert_eq!(after.player, before.player);
        assert_eq!(after.queue, before.queue);
        assert_eq!(after.member_ids(), vec![PeerId::from("charlie")]);
    }

    #[tokio::test]
    async fn test_disconnect_leaves_every_joined_room() {
        // テスト項目: 複数 Room に参加していたピアは全ての Room から外れる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::default());
        join(&repository, "a", "alice").await;
        join(&repository, "b", "alice").await;
        join(&repository, "b", "bob").await;
        join(&repository, "c", "bob").await;
        let usecase = DisconnectPeerUseCase::new(repository.clone(), create_pusher());

        // when (操作):
        let outcome = usecase.execute(PeerId::from("alice")).await;

        // then (期待する結果):
        assert_eq!(
            outcome,
            DisconnectOutcome {
                left_rooms: vec![RoomId::from("a"), RoomId::from("b")],
                deleted_rooms: vec![RoomId::from("a")],
            }
        );
        let rooms = repository.get_all_rooms().await;
        let ids: Vec<&str> = rooms.iter().map(|room| room.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert!(rooms.iter().all(|room| !room.has_member(&PeerId::from("alice"))));
    }

    #[tokio::test]
    async fn test_disconnect_without_rooms() {
        // テスト項目: どの Room にも参加していないピアの切断は何も変えない
        let repository = Arc::new(InMemoryRoomRepository::default());
        join(&repository, "x", "bob").await;
        let usecase = DisconnectPeerUseCase::new(repository.clone(), create_pusher());

        let outcome = usecase.execute(PeerId::from("alice")).await;

        assert_eq!(outcome, DisconnectOutcome::default());
        assert_eq!(repository.count_rooms().await, 1);
    }
}
