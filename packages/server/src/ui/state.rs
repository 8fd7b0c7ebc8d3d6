//! Server state shared by the request handlers.

use std::sync::Arc;

use crate::usecase::{GetRoomDetailUseCase, GetRoomsUseCase};

use super::dispatcher::DispatcherTx;

/// Shared application state
pub struct AppState {
    /// Inbound side of the dispatcher loop; every socket forwards its events here
    pub dispatcher: DispatcherTx,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
