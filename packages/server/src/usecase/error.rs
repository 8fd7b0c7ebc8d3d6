//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{Notification, RepositoryError};

/// プレイヤー操作・キュー操作のエラー
///
/// `Display` の文字列がそのまま送信者に届く。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Room not found")]
    RoomNotFound(String),
}

impl CommandError {
    pub fn to_notification(&self) -> Notification {
        Notification::Error(self.to_string())
    }
}

impl From<RepositoryError> for CommandError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(room_id) => CommandError::RoomNotFound(room_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
