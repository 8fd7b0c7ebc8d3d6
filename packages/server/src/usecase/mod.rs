//! UseCase 層
//!
//! クライアントから見える操作ごとに 1 つのユースケース。
//! Room レジストリには `RoomRepository`、ピアには `MessagePusher` を通してアクセスします。

mod connect_peer;
mod disconnect_peer;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod player_command;
mod queue_command;

pub use connect_peer::ConnectPeerUseCase;
pub use disconnect_peer::{DisconnectOutcome, DisconnectPeerUseCase};
pub use error::{CommandError, GetRoomDetailError, JoinRoomError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use player_command::PlayerCommandUseCase;
pub use queue_command::QueueCommandUseCase;
