//! Wiring of the in-memory server.

use std::{collections::HashMap, sync::Arc};

use tandem_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{Server, dispatcher::Dispatcher},
    usecase::{
        ConnectPeerUseCase, DisconnectPeerUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
        JoinRoomUseCase, PlayerCommandUseCase, QueueCommandUseCase,
    },
};

/// Build a server backed by the in-memory room registry.
///
/// Dependencies are created in order:
/// 1. Repository
/// 2. MessagePusher
/// 3. UseCases
/// 4. Dispatcher and Server
pub fn build_in_memory_server(clock: Arc<dyn Clock>) -> Server {
    // 1. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));

    // 3. Create UseCases
    let connect_peer_usecase = Arc::new(ConnectPeerUseCase::new(
        message_pusher.clone(),
        clock.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let player_command_usecase = Arc::new(PlayerCommandUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let queue_command_usecase = Arc::new(QueueCommandUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock,
    ));
    let disconnect_peer_usecase = Arc::new(DisconnectPeerUseCase::new(
        repository.clone(),
        message_pusher,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository));

    // 4. Create Dispatcher and Server
    let dispatcher = Dispatcher::new(
        connect_peer_usecase,
        join_room_usecase,
        player_command_usecase,
        queue_command_usecase,
        disconnect_peer_usecase,
    );
    Server::new(dispatcher, get_rooms_usecase, get_room_detail_usecase)
}
