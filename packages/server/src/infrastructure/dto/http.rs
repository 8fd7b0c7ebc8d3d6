//! HTTP API response DTOs

use serde::Serialize;

use super::websocket::{PlayerStateDto, QueueItemDto};

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub members: Vec<String>,
    pub queue_length: usize,
    /// RFC 3339
    pub created_at: String,
}

/// Body of `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub player_state: PlayerStateDto,
    pub queue: Vec<QueueItemDto>,
    pub members: Vec<String>,
    /// RFC 3339
    pub created_at: String,
}
