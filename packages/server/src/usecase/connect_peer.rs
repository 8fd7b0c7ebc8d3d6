//! UseCase: ピア接続処理

use std::sync::Arc;

use tandem_shared::time::Clock;

use crate::domain::{MessagePusher, PeerId, PusherChannel, Timestamp};

/// ピア接続のユースケース
///
/// 接続しただけのピアは、join_room するまでどの Room のメンバーでもない。
pub struct ConnectPeerUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectPeerUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// ピアの送信チャンネルを登録し、接続時刻を返す
    pub async fn execute(&self, peer_id: PeerId, sender: PusherChannel) -> Timestamp {
        let connected_at = Timestamp::new(self.clock.now_millis());
        self.message_pusher.register_client(peer_id.clone(), sender).await;
        tracing::info!("Peer '{}' connected", peer_id);
        connected_at
    }
}
