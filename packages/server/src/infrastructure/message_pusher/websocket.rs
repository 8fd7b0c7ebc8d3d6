//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続中のピアごとの `UnboundedSender` を管理
//! - `Notification` を JSON フレームに変換して送信（push_to, broadcast）
//!
//! WebSocket の受付と sender の生成は UI 層（`ui::handler::websocket`）で行われます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{MessagePushError, MessagePusher, Notification, PeerId, PusherChannel},
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のピアの WebSocket sender
    clients: Arc<Mutex<HashMap<PeerId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<PeerId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    fn encode(notification: &Notification) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerMessage::from(notification))
            .map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, peer_id: PeerId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Peer '{}' registered to MessagePusher", peer_id);
        clients.insert(peer_id, sender);
    }

    async fn unregister_client(&self, peer_id: &PeerId) {
        let mut clients = self.clients.lock().await;
        clients.remove(peer_id);
        tracing::debug!("Peer '{}' unregistered from MessagePusher", peer_id);
    }

    async fn push_to(
        &self,
        peer_id: &PeerId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(peer_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(peer_id.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to peer '{}'", peer_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<PeerId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(content.clone()) {
                        tracing::warn!("Failed to push message to peer '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::warn!("Peer '{}' not found during broadcast, skipping", target);
                }
            }
        }

        Ok(())
    }
}
