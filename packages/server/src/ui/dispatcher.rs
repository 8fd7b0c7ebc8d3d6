//! Central command loop.
//!
//! Every socket task forwards its inbound events into one channel. This task
//! owns the consuming end and runs the use cases one event at a time, so a
//! command's read-modify-write on a room and its broadcast complete before
//! the next event is looked at. Events from one peer keep their order.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{PeerId, PlayerCommand, PusherChannel, QueueAction, RoomId},
    usecase::{
        ConnectPeerUseCase, DisconnectPeerUseCase, JoinRoomUseCase, PlayerCommandUseCase,
        QueueCommandUseCase,
    },
};

/// Event forwarded from a socket task to the dispatcher
#[derive(Debug)]
pub enum InboundEvent {
    Connected {
        peer_id: PeerId,
        sender: PusherChannel,
    },
    JoinRoom {
        peer_id: PeerId,
        room_id: RoomId,
    },
    PlayerCommand {
        peer_id: PeerId,
        room_id: RoomId,
        command: PlayerCommand,
    },
    QueueCommand {
        peer_id: PeerId,
        room_id: RoomId,
        action: QueueAction,
    },
    Disconnected {
        peer_id: PeerId,
    },
}

pub type DispatcherTx = mpsc::UnboundedSender<InboundEvent>;
pub type DispatcherRx = mpsc::UnboundedReceiver<InboundEvent>;

/// Sequential executor of the room use cases
pub struct Dispatcher {
    connect_peer_usecase: Arc<ConnectPeerUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    player_command_usecase: Arc<PlayerCommandUseCase>,
    queue_command_usecase: Arc<QueueCommandUseCase>,
    disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
}

impl Dispatcher {
    pub fn new(
        connect_peer_usecase: Arc<ConnectPeerUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        player_command_usecase: Arc<PlayerCommandUseCase>,
        queue_command_usecase: Arc<QueueCommandUseCase>,
        disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
    ) -> Self {
        Self {
            connect_peer_usecase,
            join_room_usecase,
            player_command_usecase,
            queue_command_usecase,
            disconnect_peer_usecase,
        }
    }

    /// Process events until every sender is dropped.
    pub async fn run(self, mut rx: DispatcherRx) {
        while let Some(event) = rx.recv().await {
            self.handle(event).await;
        }

        tracing::info!("Dispatcher shutting down (channel closed)");
    }

    pub async fn handle(&self, event: InboundEvent) {
        match event {
            InboundEvent::Connected { peer_id, sender } => {
                self.connect_peer_usecase.execute(peer_id, sender).await;
            }
            InboundEvent::JoinRoom { peer_id, room_id } => {
                if let Err(e) = self.join_room_usecase.execute(peer_id.clone(), room_id).await {
                    tracing::warn!("Peer '{}' failed to join: {}", peer_id, e);
                }
            }
            InboundEvent::PlayerCommand {
                peer_id,
                room_id,
                command,
            } => {
                if let Err(e) = self
                    .player_command_usecase
                    .execute(peer_id.clone(), room_id.clone(), command)
                    .await
                {
                    tracing::debug!("Player command from '{}' on '{}': {}", peer_id, room_id, e);
                }
            }
            InboundEvent::QueueCommand {
                peer_id,
                room_id,
                action,
            } => {
                if let Err(e) = self
                    .queue_command_usecase
                    .execute(peer_id.clone(), room_id.clone(), action)
                    .await
                {
                    tracing::debug!("Queue command from '{}' on '{}': {}", peer_id, room_id, e);
                }
            }
            InboundEvent::Disconnected { peer_id } => {
                self.disconnect_peer_usecase.execute(peer_id).await;
            }
        }
    }
}
