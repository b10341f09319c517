//! Development HTTP front.
//!
//! `GET /ws` upgrades to the live update channel; every other path is a
//! file from the output directory.

use crate::dev::channel::{ClientId, LiveChannel};
use crate::error::{CliError, Result};
use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderValue, header},
    response::IntoResponse,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::{cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer};

/// Path of the live update endpoint.
pub const WS_PATH: &str = "/ws";

/// Build the dev router serving `out_dir`.
pub fn router(channel: Arc<LiveChannel>, out_dir: &Path) -> Router {
    Router::new()
        .route(WS_PATH, get(ws_handler))
        .fallback_service(ServeDir::new(out_dir))
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .with_state(channel)
}

/// Serve `app` on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .await
        .map_err(|e| CliError::Server(format!("Server error: {e}")))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(channel): State<Arc<LiveChannel>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, channel))
}

async fn handle_socket(socket: WebSocket, channel: Arc<LiveChannel>) {
    let (id, rx) = channel.register();
    tracing::info!(client = id, "live client connected");

    forward(socket, id, rx).await;

    channel.unregister(id);
    tracing::info!(client = id, "live client disconnected");
}

/// Pump queued frames to the socket until either side goes away.
async fn forward(socket: WebSocket, id: ClientId, mut rx: mpsc::Receiver<String>) {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            frame = rx.recv() => match frame {
                Some(text) => {
                    if let Err(err) = sink.send(Message::Text(text.into())).await {
                        tracing::debug!(client = id, error = %err, "send failed");
                        break;
                    }
                }
                // Dropped from the channel.
                None => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::debug!(client = id, error = %err, "receive failed");
                    break;
                }
            },
        }
    }
}
