//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセス終了とともに全ての Room は失われます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    PeerId, PlayerCommand, QueueCommand, RepositoryError, Room, RoomId, RoomRepository, Timestamp,
};

/// インメモリ Room Repository 実装
///
/// Room ドメインモデルを Room ID をキーに保持し、ドメイン層の RoomRepository trait を実装します（依存性の逆転）。
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// Room ID → Room
    rooms: Arc<Mutex<HashMap<RoomId, Room>>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(rooms: Arc<Mutex<HashMap<RoomId, Room>>>) -> Self {
        Self { rooms }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_or_create_room(&self, room_id: RoomId, created_at: Timestamp) -> Room {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id)
            .or_insert_with_key(|room_id| {
                tracing::info!("Room '{}' created", room_id);
                Room::new(room_id.clone(), created_at)
            })
            .clone()
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))
    }

    async fn delete_room(&self, room_id: &RoomId) {
        let mut rooms = self.rooms.lock().await;
        if rooms.remove(room_id).is_some() {
            tracing::info!("Room '{}' deleted", room_id);
        }
    }

    async fn add_member(&self, room_id: &RoomId, peer_id: PeerId) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))?;
        room.add_member(peer_id);
        Ok(room.clone())
    }

    async fn remove_member(
        &self,
        room_id: &RoomId,
        peer_id: &PeerId,
    ) -> Result<usize, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))?;
        room.remove_member(peer_id);
        Ok(room.members.len())
    }

    async fn apply_player_command(
        &self,
        room_id: &RoomId,
        command: &PlayerCommand,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))?;
        room.apply_player_command(command);
        Ok(room.clone())
    }

    async fn apply_queue_command(
        &self,
        room_id: &RoomId,
        command: QueueCommand,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))?;
        room.apply_queue_command(command);
        Ok(room.clone())
    }

    async fn find_rooms_by_member(&self, peer_id: &PeerId) -> Vec<RoomId> {
        let rooms = self.rooms.lock().await;
        let mut room_ids: Vec<RoomId> = rooms
            .values()
            .filter(|room| room.has_member(peer_id))
            .map(|room| room.id.clone())
            .collect();
        room_ids.sort();
        room_ids
    }

    async fn get_all_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut all: Vec<Room> = rooms.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Seconds;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository の Room 生成・取得・削除
    // - メンバーの追加・削除
    // - コマンド適用が保存されている Room に反映されること
    //
    // 【なぜこのテストが必要か】
    // - Repository は Room の唯一の所有者であり、UseCase 層が前提とする
    //   「存在しない Room はエラー」「get_or_create は失敗しない」を保証する必要がある
    // ========================================

    fn create_test_repository() -> InMemoryRoomRepository {
        InMemoryRoomRepository::default()
    }

    #[tokio::test]
    async fn test_get_or_create_room_creates_once() {
        // テスト項目: 未知の ID で Room が生成され、2 回目は既存の Room が返される
        // given (前提条件):
        let repo = create_test_repository();
        let room_id = RoomId::from("x");

        // when (操作):
        let first = repo
            .get_or_create_room(room_id.clone(), Timestamp::new(1000))
            .await;
        repo.apply_player_command(&room_id, &PlayerCommand::Play)
            .await
            .unwrap();
        let second = repo
            .get_or_create_room(room_id.clone(), Timestamp::new(2000))
            .await;

        // then (期待する結果):
        assert_eq!(first.created_at, Timestamp::new(1000));
        assert_eq!(second.created_at, Timestamp::new(1000));
        assert!(second.player.is_playing);
        assert_eq!(repo.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_get_room_not_found() {
        // テスト項目: 存在しない Room の取得はエラーになる
        let repo = create_test_repository();

        let result = repo.get_room(&RoomId::from("ghost")).await;

        assert_eq!(
            result,
            Err(RepositoryError::RoomNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_delete_room() {
        // テスト項目: 削除した Room は取得できなくなる（存在しない Room の削除も問題ない）
        // given (前提条件):
        let repo = create_test_repository();
        let room_id = RoomId::from("x");
        repo.get_or_create_room(room_id.clone(), Timestamp::new(0))
            .await;

        // when (操作):
        repo.delete_room(&room_id).await;
        repo.delete_room(&RoomId::from("ghost")).await;

        // then (期待する結果):
        assert!(repo.get_room(&room_id).await.is_err());
        assert_eq!(repo.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_add_and_remove_member() {
        // テスト項目: メンバーの追加は冪等で、削除後の残り人数が返される
        // given (前提条件):
        let repo = create_test_repository();
        let room_id = RoomId::from("x");
        repo.get_or_create_room(room_id.clone(), Timestamp::new(0))
            .await;

        // when (操作):
        repo.add_member(&room_id, PeerId::from("alice")).await.unwrap();
        let room = repo.add_member(&room_id, PeerId::from("alice")).await.unwrap();
        repo.add_member(&room_id, PeerId::from("bob")).await.unwrap();
        let remaining = repo
            .remove_member(&room_id, &PeerId::from("alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(room.members.len(), 1);
        assert_eq!(remaining, 1);
    }

    #[tokio::test]
    async fn test_member_operations_on_missing_room() {
        // テスト項目: 存在しない Room へのメンバー操作はエラーになり、Room は生成されない
        let repo = create_test_repository();
        let ghost = RoomId::from("ghost");

        assert!(repo.add_member(&ghost, PeerId::from("alice")).await.is_err());
        assert!(repo
            .remove_member(&ghost, &PeerId::from("alice"))
            .await
            .is_err());
        assert_eq!(repo.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_apply_commands_are_persisted() {
        // テスト項目: コマンド適用の結果が保存され、以降の取得に反映される
        // given (前提条件):
        let repo = create_test_repository();
        let room_id = RoomId::from("x");
        repo.get_or_create_room(room_id.clone(), Timestamp::new(0))
            .await;

        // when (操作):
        repo.apply_player_command(
            &room_id,
            &PlayerCommand::Seek {
                time: Seconds::new(12.0).unwrap(),
            },
        )
        .await
        .unwrap();
        repo.apply_queue_command(&room_id, QueueCommand::Clear)
            .await
            .unwrap();

        // then (期待する結果):
        let room = repo.get_room(&room_id).await.unwrap();
        assert_eq!(room.player.current_time.value(), 12.0);
        assert!(room.queue.is_empty());
    }

    #[tokio::test]
    async fn test_apply_command_on_missing_room() {
        // テスト項目: 存在しない Room へのコマンド適用は RoomNotFound
        let repo = create_test_repository();
        let ghost = RoomId::from("ghost");

        assert!(matches!(
            repo.apply_player_command(&ghost, &PlayerCommand::Play).await,
            Err(RepositoryError::RoomNotFound(_))
        ));
        assert!(matches!(
            repo.apply_queue_command(&ghost, QueueCommand::Clear).await,
            Err(RepositoryError::RoomNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_rooms_by_member() {
        // テスト項目: peer が所属する全ての Room を取得できる
        // given (前提条件):
        let repo = create_test_repository();
        for id in ["a", "b", "c"] {
            repo.get_or_create_room(RoomId::from(id), Timestamp::new(0))
                .await;
        }
        let alice = PeerId::from("alice");
        repo.add_member(&RoomId::from("c"), alice.clone()).await.unwrap();
        repo.add_member(&RoomId::from("a"), alice.clone()).await.unwrap();
        repo.add_member(&RoomId::from("b"), PeerId::from("bob"))
            .await
            .unwrap();

        // when (操作):
        let room_ids = repo.find_rooms_by_member(&alice).await;

        // then (期待する結果):
        assert_eq!(room_ids, vec![RoomId::from("a"), RoomId::from("c")]);
    }
}
