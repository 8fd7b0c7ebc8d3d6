//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 全ての Room のスナップショットを Room ID 順で取得
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_all_rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RoomId, Timestamp},
        infrastructure::repository::InMemoryRoomRepository,
    };

    #[tokio::test]
    async fn test_get_rooms_sorted_by_id() {
        // テスト項目: 全ての Room が ID 順で返される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::default());
        for id in ["b", "a"] {
            repository
                .get_or_create_room(RoomId::from(id), Timestamp::new(0))
                .await;
        }
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        let ids: Vec<&str> = rooms.iter().map(|room| room.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
