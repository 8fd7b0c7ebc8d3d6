//! ピアが Room に対して発行するコマンド
//!
//! クライアント入力はトランスポート境界でこれらの値に検証・変換されます。
//! 検証に失敗した入力は `Ignored` コマンドになり、状態は変化しませんが
//! 処理自体（変化のない状態のブロードキャスト）は行われます。

use super::{
    entity::QueueItem,
    factory::QueueItemIdFactory,
    value_object::{PeerId, QueueItemId, Seconds, Timestamp},
};

/// プレイヤー操作コマンド
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    Seek {
        time: Seconds,
    },
    LoadVideo {
        video_id: String,
        title: String,
    },
    /// クライアントが報告する再生位置・長さ。指定のないフィールドは変更しない
    TimeUpdate {
        current_time: Option<Seconds>,
        duration: Option<Seconds>,
    },
    /// 未知のアクション、または不正な payload
    Ignored,
}

/// ピアが要求したキュー操作
#[derive(Debug, Clone, PartialEq)]
pub enum QueueAction {
    AddToQueue { video_id: String, title: String },
    RemoveFromQueue { item_id: QueueItemId },
    ClearQueue,
    /// 未知のアクション、または不正な payload
    Ignored,
}

impl QueueAction {
    /// 要求をキューコマンドに変換
    ///
    /// 追加される項目には新しい ID・要求したピア・現在時刻を付与する。
    pub fn resolve(self, added_by: &PeerId, added_at: Timestamp) -> QueueCommand {
        match self {
            QueueAction::AddToQueue { video_id, title } => QueueCommand::Append(QueueItem {
                id: QueueItemIdFactory::generate(),
                video_id,
                title,
                added_by: added_by.clone(),
                added_at,
            }),
            QueueAction::RemoveFromQueue { item_id } => QueueCommand::Remove(item_id),
            QueueAction::ClearQueue => QueueCommand::Clear,
            QueueAction::Ignored => QueueCommand::Ignored,
        }
    }
}

/// `PlaybackQueue` に適用できる状態のキューコマンド
#[derive(Debug, Clone, PartialEq)]
pub enum QueueCommand {
    Append(QueueItem),
    Remove(QueueItemId),
    Clear,
    Ignored,
}
