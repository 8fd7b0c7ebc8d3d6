//! Conversion logic between DTOs and domain entities.
//!
//! Inbound command payloads are validated here. A payload that does not
//! satisfy its action's precondition never fails: it converts to an
//! `Ignored` command.

use serde_json::Value;
use tandem_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    Notification, PlayerCommand, PlayerState, QueueAction, QueueItem, QueueItemId, Room, Seconds,
};
use crate::infrastructure::dto::{
    http::{RoomDetailDto, RoomSummaryDto},
    websocket::{CommandMessage, PlayerStateDto, QueueItemDto, RoomStateDto, ServerMessage},
};

// ========================================
// DTO → Domain
// ========================================

impl From<&CommandMessage> for PlayerCommand {
    fn from(message: &CommandMessage) -> Self {
        let payload = message.payload.as_ref();
        let command = match message.action.as_str() {
            "play" => Some(PlayerCommand::Play),
            "pause" => Some(PlayerCommand::Pause),
            "seek" => seconds_field(payload, "time").map(|time| PlayerCommand::Seek { time }),
            "load_video" => {
                non_empty_str_field(payload, "videoId").map(|video_id| PlayerCommand::LoadVideo {
                    video_id,
                    title: str_field(payload, "title").unwrap_or_default(),
                })
            }
            "time_update" => Some(PlayerCommand::TimeUpdate {
                current_time: seconds_field(payload, "currentTime"),
                duration: seconds_field(payload, "duration"),
            }),
            _ => None,
        };

        command.unwrap_or_else(|| {
            tracing::debug!(
                "Ignoring player command '{}' (unknown action or malformed payload)",
                message.action
            );
            PlayerCommand::Ignored
        })
    }
}

impl From<&CommandMessage> for QueueAction {
    fn from(message: &CommandMessage) -> Self {
        let payload = message.payload.as_ref();
        let action = match message.action.as_str() {
            "add_to_queue" => {
                non_empty_str_field(payload, "videoId").map(|video_id| QueueAction::AddToQueue {
                    video_id,
                    title: str_field(payload, "title").unwrap_or_default(),
                })
            }
            "remove_from_queue" => {
                str_field(payload, "itemId").map(|item_id| QueueAction::RemoveFromQueue {
                    item_id: QueueItemId::new(item_id),
                })
            }
            "clear_queue" => Some(QueueAction::ClearQueue),
            _ => None,
        };

        action.unwrap_or_else(|| {
            tracing::debug!(
                "Ignoring queue command '{}' (unknown action or malformed payload)",
                message.action
            );
            QueueAction::Ignored
        })
    }
}

fn str_field(payload: Option<&Value>, key: &str) -> Option<String> {
    payload?.get(key)?.as_str().map(str::to_string)
}

fn non_empty_str_field(payload: Option<&Value>, key: &str) -> Option<String> {
    str_field(payload, key).filter(|value| !value.is_empty())
}

fn seconds_field(payload: Option<&Value>, key: &str) -> Option<Seconds> {
    let value = payload?.get(key)?.as_f64()?;
    Seconds::new(value).ok()
}

// ========================================
// Domain → DTO
// ========================================

impl From<&PlayerState> for PlayerStateDto {
    fn from(state: &PlayerState) -> Self {
        Self {
            is_playing: state.is_playing,
            current_time: state.current_time.value(),
            duration: state.duration.value(),
            video_id: state.video_id.clone(),
            title: state.title.clone(),
        }
    }
}

impl From<&QueueItem> for QueueItemDto {
    fn from(item: &QueueItem) -> Self {
        Self {
            id: item.id.as_str().to_string(),
            video_id: item.video_id.clone(),
            title: item.title.clone(),
            added_by: item.added_by.as_str().to_string(),
            added_at: item.added_at.value(),
        }
    }
}

fn queue_dto(items: &[QueueItem]) -> Vec<QueueItemDto> {
    items.iter().map(QueueItemDto::from).collect()
}

fn member_strings(room: &Room) -> Vec<String> {
    room.members
        .iter()
        .map(|peer_id| peer_id.as_str().to_string())
        .collect()
}

impl From<&Room> for RoomStateDto {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.id.as_str().to_string(),
            player_state: (&room.player).into(),
            queue: queue_dto(room.queue.items()),
            members: member_strings(room),
        }
    }
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            members: member_strings(room),
            queue_length: room.queue.len(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            player_state: (&room.player).into(),
            queue: queue_dto(room.queue.items()),
            members: member_strings(room),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Notification> for ServerMessage {
    fn from(notification: &Notification) -> Self {
        match notification {
            Notification::RoomState(room) => ServerMessage::RoomState(room.into()),
            Notification::PlayerStateUpdate(state) => ServerMessage::PlayerStateUpdate(state.into()),
            Notification::QueueUpdate(items) => ServerMessage::QueueUpdate(queue_dto(items)),
            Notification::Error(message) => ServerMessage::Error(message.clone()),
        }
    }
}
