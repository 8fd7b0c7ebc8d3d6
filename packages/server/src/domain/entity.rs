//! Entity 定義
//!
//! `Room` は共有プレイヤー・共有キュー・メンバー集合をまとめる集約です。
//! 状態遷移は全て純粋関数（コマンドを受け取り、次の状態を返す）として実装します。

use std::collections::BTreeSet;

use super::{
    command::{PlayerCommand, QueueCommand},
    value_object::{PeerId, QueueItemId, RoomId, Seconds, Timestamp},
};

/// Room の共有プレイヤー状態
///
/// `current_time` はクライアントが最後に報告した値。サーバー側で進めることはない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub is_playing: bool,
    pub current_time: Seconds,
    pub duration: Seconds,
    pub video_id: String,
    pub title: String,
}

impl PlayerState {
    /// コマンドを適用し、次の状態を返す
    pub fn apply(self, command: &PlayerCommand) -> Self {
        match command {
            PlayerCommand::Play => Self {
                is_playing: true,
                ..self
            },
            PlayerCommand::Pause => Self {
                is_playing: false,
                ..self
            },
            PlayerCommand::Seek { time } => Self {
                current_time: *time,
                ..self
            },
            PlayerCommand::LoadVideo { video_id, title } => Self {
                video_id: video_id.clone(),
                title: title.clone(),
                current_time: Seconds::ZERO,
                is_playing: false,
                ..self
            },
            PlayerCommand::TimeUpdate {
                current_time,
                duration,
            } => Self {
                current_time: current_time.unwrap_or(self.current_time),
                duration: duration.unwrap_or(self.duration),
                ..self
            },
            PlayerCommand::Ignored => self,
        }
    }
}

/// 共有キューの項目
///
/// `added_by` は参考情報であり、切断済みのピアを指すこともある。
#[derive(Debug, Clone, PartialEq)]
pub struct QueueItem {
    pub id: QueueItemId,
    pub video_id: String,
    pub title: String,
    pub added_by: PeerId,
    pub added_at: Timestamp,
}

/// 順序付きの再生キュー
///
/// 項目は追加順を保ち、削除しても残りの項目の順序は変わらない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackQueue(Vec<QueueItem>);

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// コマンドを適用し、次のキューを返す
    pub fn apply(mut self, command: QueueCommand) -> Self {
        match command {
            QueueCommand::Append(item) => self.0.push(item),
            QueueCommand::Remove(item_id) => {
                if let Some(index) = self.0.iter().position(|item| item.id == item_id) {
                    self.0.remove(index);
                }
            }
            QueueCommand::Clear => self.0.clear(),
            QueueCommand::Ignored => {}
        }
        self
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Room 集約
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub player: PlayerState,
    pub queue: PlaybackQueue,
    pub members: BTreeSet<PeerId>,
    pub created_at: Timestamp,
}

impl Room {
    /// 停止中の空のプレイヤー・空のキュー・メンバーなしの Room を作成
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            player: PlayerState::default(),
            queue: PlaybackQueue::new(),
            members: BTreeSet::new(),
            created_at,
        }
    }

    /// メンバーを追加（既にメンバーの場合は `false`）
    pub fn add_member(&mut self, peer_id: PeerId) -> bool {
        self.members.insert(peer_id)
    }

    /// メンバーを削除（メンバーでない場合は `false`）
    pub fn remove_member(&mut self, peer_id: &PeerId) -> bool {
        self.members.remove(peer_id)
    }

    pub fn has_member(&self, peer_id: &PeerId) -> bool {
        self.members.contains(peer_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// ブロードキャスト対象のメンバー一覧（ソート済み）
    pub fn member_ids(&self) -> Vec<PeerId> {
        self.members.iter().cloned().collect()
    }

    pub fn apply_player_command(&mut self, command: &PlayerCommand) -> &PlayerState {
        self.player = std::mem::take(&mut self.player).apply(command);
        &self.player
    }

    pub fn apply_queue_command(&mut self, command: QueueCommand) -> &PlaybackQueue {
        self.queue = std::mem::take(&mut self.queue).apply(command);
        &self.queue
    }
}
