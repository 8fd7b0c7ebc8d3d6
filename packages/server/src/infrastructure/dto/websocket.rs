//! WebSocket message DTOs
//!
//! Every frame is a JSON envelope `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Deserializer, Serialize};

/// Client → server frame
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    JoinRoom(JoinRoomData),
    PlayerCommand(CommandMessage),
    QueueCommand(CommandMessage),
}

/// `join_room` payload: either the bare room id or `{"roomId": ...}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JoinRoomData {
    RoomId(String),
    Object {
        #[serde(rename = "roomId")]
        room_id: String,
    },
}

impl JoinRoomData {
    pub fn into_room_id(self) -> String {
        match self {
            JoinRoomData::RoomId(room_id) | JoinRoomData::Object { room_id } => room_id,
        }
    }
}

/// `player_command` / `queue_command` payload
///
/// `payload` is kept untyped here; it is validated per action when the
/// message is converted into a domain command. A missing or non-string
/// `roomId` / `action` reads as an empty string, so the frame still reaches
/// the dispatcher as an unknown action or an unknown room.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandMessage {
    #[serde(default, deserialize_with = "lenient_string")]
    pub room_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub action: String,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

/// Any JSON value; non-strings become `""`
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

/// Server → client frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    RoomState(RoomStateDto),
    PlayerStateUpdate(PlayerStateDto),
    QueueUpdate(Vec<QueueItemDto>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateDto {
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub video_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItemDto {
    pub id: String,
    pub video_id: String,
    pub title: String,
    pub added_by: String,
    /// Unix timestamp (milliseconds)
    pub added_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStateDto {
    pub room_id: String,
    pub player_state: PlayerStateDto,
    pub queue: Vec<QueueItemDto>,
    pub members: Vec<String>,
}
