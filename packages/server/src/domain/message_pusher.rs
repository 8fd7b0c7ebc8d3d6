//! MessagePusher trait 定義
//!
//! ピアへの通知（unicast / broadcast）のインターフェース。
//! WebSocket などの具体的な送信手段は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, PeerId, PlayerState, QueueItem, Room};

/// 接続中のピア 1 つへの送信チャンネル（直列化済みフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// ピアに届ける通知
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// 参加直後のピアに送る Room のスナップショット
    RoomState(Room),
    /// プレイヤー操作後のプレイヤー状態
    PlayerStateUpdate(PlayerState),
    /// キュー操作後のキュー全体
    QueueUpdate(Vec<QueueItem>),
    /// 原因となったピアにだけ返すエラー
    Error(String),
}

/// MessagePusher trait
///
/// 送信はベストエフォート（確認応答・再送なし）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 新しく接続したピアの送信チャンネルを登録
    async fn register_client(&self, peer_id: PeerId, sender: PusherChannel);

    /// 切断したピアの登録を解除
    async fn unregister_client(&self, peer_id: &PeerId);

    /// 1 つのピアにだけ送信（unicast）
    async fn push_to(
        &self,
        peer_id: &PeerId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 全ての対象に送信（broadcast）。未登録・切断済みの対象はスキップする
    async fn broadcast(
        &self,
        targets: Vec<PeerId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;
}
