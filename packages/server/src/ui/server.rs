//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::mpsc};
use tower_http::trace::TraceLayer;

use crate::usecase::{GetRoomDetailUseCase, GetRoomsUseCase};

use super::{
    dispatcher::Dispatcher,
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket playback room server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(dispatcher, get_rooms_usecase, get_room_detail_usecase);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// Dispatcher（ルーム操作を逐次実行するループ）
    dispatcher: Dispatcher,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl Server {
    pub fn new(
        dispatcher: Dispatcher,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            dispatcher,
            get_rooms_usecase,
            get_room_detail_usecase,
        }
    }

    /// Spawn the dispatcher loop and build the router.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn into_router(self) -> Router {
        let (dispatcher_tx, dispatcher_rx) = mpsc::unbounded_channel();
        tokio::spawn(self.dispatcher.run(dispatcher_rx));

        let app_state = Arc::new(AppState {
            dispatcher: dispatcher_tx,
            get_rooms_usecase: self.get_rooms_usecase,
            get_room_detail_usecase: self.get_room_detail_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server on `host:port` until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Playback room server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener, without signal handling.
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        axum::serve(listener, self.into_router()).await
    }
}
