//! ID を生成する Factory

use uuid::Uuid;

use super::value_object::{PeerId, QueueItemId};

/// 接続ごとに新しい `PeerId` を生成
pub struct PeerIdFactory;

impl PeerIdFactory {
    pub fn generate() -> PeerId {
        PeerId::new(Uuid::new_v4().to_string())
    }
}

/// キューに追加される項目ごとに新しい `QueueItemId` を生成
pub struct QueueItemIdFactory;

impl QueueItemIdFactory {
    pub fn generate() -> QueueItemId {
        QueueItemId::new(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        // テスト項目: 生成される ID が重複しない
        // given (前提条件):
        let count = 1000;

        // when (操作):
        let ids: std::collections::HashSet<QueueItemId> =
            (0..count).map(|_| QueueItemIdFactory::generate()).collect();

        // then (期待する結果):
        assert_eq!(ids.len(), count);
        assert_ne!(PeerIdFactory::generate(), PeerIdFactory::generate());
    }
}
