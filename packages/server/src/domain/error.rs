//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueObjectError {
    #[error("seconds must be finite and non-negative, got {0}")]
    InvalidSeconds(f64),
}

/// Room レジストリのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to serialize message: {0}")]
    Serialization(String),
}
