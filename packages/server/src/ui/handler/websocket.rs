//! WebSocket connection handlers.
//!
//! A thin adapter: frames are parsed into `InboundEvent`s and forwarded to
//! the dispatcher, and frames queued for this peer are written back to the
//! socket. No room state is touched here.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{PeerId, PeerIdFactory, PlayerCommand, QueueAction, RoomId},
    infrastructure::dto::websocket::ClientMessage,
    ui::{dispatcher::InboundEvent, state::AppState},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let peer_id = PeerIdFactory::generate();
    tracing::debug!("Upgrading connection for peer '{}'", peer_id);

    ws.on_upgrade(move |socket| handle_socket(socket, state, peer_id))
}

/// Convert a parsed client frame into a dispatcher event.
fn to_inbound_event(peer_id: PeerId, message: ClientMessage) -> InboundEvent {
    match message {
        ClientMessage::JoinRoom(data) => InboundEvent::JoinRoom {
            peer_id,
            room_id: RoomId::new(data.into_room_id()),
        },
        ClientMessage::PlayerCommand(message) => InboundEvent::PlayerCommand {
            peer_id,
            command: PlayerCommand::from(&message),
            room_id: RoomId::new(message.room_id),
        },
        ClientMessage::QueueCommand(message) => InboundEvent::QueueCommand {
            peer_id,
            action: QueueAction::from(&message),
            room_id: RoomId::new(message.room_id),
        },
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, peer_id: PeerId) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    if state
        .dispatcher
        .send(InboundEvent::Connected {
            peer_id: peer_id.clone(),
            sender: tx,
        })
        .is_err()
    {
        tracing::error!("Dispatcher is gone, dropping connection of '{}'", peer_id);
        return;
    }

    let mut send_task = pusher_loop(rx, sender);

    let dispatcher = state.dispatcher.clone();
    let recv_peer_id = peer_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error from '{}': {}", recv_peer_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", recv_peer_id, text.as_str());

                    let message = match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(message) => message,
                        Err(e) => {
                            tracing::warn!(
                                "Dropping unparseable frame from '{}': {}",
                                recv_peer_id,
                                e
                            );
                            continue;
                        }
                    };

                    let event = to_inbound_event(recv_peer_id.clone(), message);
                    if dispatcher.send(event).is_err() {
                        tracing::error!("Dispatcher is gone, closing '{}'", recv_peer_id);
                        break;
                    }
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Peer '{}' requested close", recv_peer_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if state
        .dispatcher
        .send(InboundEvent::Disconnected {
            peer_id: peer_id.clone(),
        })
        .is_err()
    {
        tracing::warn!("Dispatcher is gone, could not clean up '{}'", peer_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Seconds;

    fn parse(frame: &str) -> InboundEvent {
        let message: ClientMessage = serde_json::from_str(frame).unwrap();
        to_inbound_event(PeerId::from("alice"), message)
    }

    #[test]
    fn test_join_room_frame() {
        // テスト項目: join_room フレームが JoinRoom イベントになる
        let event = parse(r#"{"event":"join_room","data":"x"}"#);

        assert!(matches!(
            event,
            InboundEvent::JoinRoom { peer_id, room_id }
                if peer_id.as_str() == "alice" && room_id.as_str() == "x"
        ));
    }

    #[test]
    fn test_player_command_frame() {
        // テスト項目: player_command フレームが検証済みの PlayerCommand イベントになる
        let event = parse(
            r#"{"event":"player_command","data":{"roomId":"x","action":"seek","payload":{"time":3}}}"#,
        );

        let InboundEvent::PlayerCommand {
            room_id, command, ..
        } = event
        else {
            panic!("expected PlayerCommand");
        };
        assert_eq!(room_id, RoomId::from("x"));
        assert_eq!(
            command,
            PlayerCommand::Seek {
                time: Seconds::new(3.0).unwrap()
            }
        );
    }

    #[test]
    fn test_non_string_action_frame_is_forwarded_as_ignored() {
        // テスト項目: action が数値の player_command も破棄されず Ignored コマンドとして転送される
        let event = parse(r#"{"event":"player_command","data":{"roomId":"x","action":42}}"#);

        assert!(matches!(
            event,
            InboundEvent::PlayerCommand {
                command: PlayerCommand::Ignored,
                ref room_id,
                ..
            } if room_id.as_str() == "x"
        ));
    }

    #[test]
    fn test_frame_without_room_id_is_forwarded() {
        // テスト項目: roomId のない queue_command も転送され、空の Room ID を持つ
        let event = parse(r#"{"event":"queue_command","data":{"action":"clear_queue"}}"#);

        assert!(matches!(
            event,
            InboundEvent::QueueCommand {
                action: QueueAction::ClearQueue,
                ref room_id,
                ..
            } if room_id.as_str().is_empty()
        ));
    }

    #[test]
    fn test_malformed_queue_command_frame_is_ignored_action() {
        // テスト項目: payload 不正の queue_command は Ignored アクションとして転送される
        let event = parse(r#"{"event":"queue_command","data":{"roomId":"x","action":"add_to_queue"}}"#);

        assert!(matches!(
            event,
            InboundEvent::QueueCommand {
                action: QueueAction::Ignored,
                ..
            }
        ));
    }
}
