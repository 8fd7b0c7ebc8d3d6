//! Repository trait 定義
//!
//! ドメイン層が必要とする Room レジストリへのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    PeerId, PlayerCommand, QueueCommand, RepositoryError, Room, RoomId, Timestamp,
};

/// Room Repository trait
///
/// 全ての `Room` を所有する唯一の場所。呼び出し側はスナップショットを受け取るだけで、
/// 変更は必ずこのインターフェースを通して保存済みの Room にアトミックに適用される。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room を取得（存在しなければ空の Room を作成）
    async fn get_or_create_room(&self, room_id: RoomId, created_at: Timestamp) -> Room;

    /// Room のスナップショットを取得
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// Room を削除
    async fn delete_room(&self, room_id: &RoomId);

    /// メンバーを追加（冪等）し、更新後の Room を返す
    async fn add_member(&self, room_id: &RoomId, peer_id: PeerId) -> Result<Room, RepositoryError>;

    /// メンバーを削除し、残りのメンバー数を返す
    async fn remove_member(
        &self,
        room_id: &RoomId,
        peer_id: &PeerId,
    ) -> Result<usize, RepositoryError>;

    /// プレイヤー操作を適用し、更新後の Room を返す
    async fn apply_player_command(
        &self,
        room_id: &RoomId,
        command: &PlayerCommand,
    ) -> Result<Room, RepositoryError>;

    /// キュー操作を適用し、更新後の Room を返す
    async fn apply_queue_command(
        &self,
        room_id: &RoomId,
        command: QueueCommand,
    ) -> Result<Room, RepositoryError>;

    /// ピアが参加している全ての Room ID を取得
    async fn find_rooms_by_member(&self, peer_id: &PeerId) -> Vec<RoomId>;

    /// 全ての Room のスナップショットを Room ID 順で取得
    async fn get_all_rooms(&self) -> Vec<Room>;

    async fn count_rooms(&self) -> usize;
}
