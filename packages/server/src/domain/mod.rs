//! Domain 層
//!
//! Room・共有プレイヤー・共有キューと、それらに適用する純粋な状態遷移。
//! 外部とのインターフェース（`RoomRepository`, `MessagePusher`）はこの層で定義し、
//! Infrastructure 層が実装します。

pub mod command;
pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use command::{PlayerCommand, QueueAction, QueueCommand};
pub use entity::{PlaybackQueue, PlayerState, QueueItem, Room};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use factory::{PeerIdFactory, QueueItemIdFactory};
pub use message_pusher::{MessagePusher, Notification, PusherChannel};
pub use repository::RoomRepository;
pub use value_object::{PeerId, QueueItemId, RoomId, Seconds, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
