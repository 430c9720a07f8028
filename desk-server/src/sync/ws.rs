//! WebSocket endpoint for the change feed
//!
//! Browsers cannot set headers on a WebSocket handshake, so the token rides
//! in the query string and is validated here instead of the auth middleware.

use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use shared::AppError;

use crate::auth::CurrentUser;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/sync/ws", get(ws_handler))
}

#[derive(Debug, Deserialize)]
struct WsParams {
    token: Option<String>,
}

async fn ws_handler(
    State(state): State<ServerState>,
    Query(params): Query<WsParams>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    let token = params.token.ok_or_else(AppError::not_authenticated)?;
    let claims = state
        .jwt_service
        .validate_token(&token)
        .map_err(|e| AppError::invalid_token(e.to_string()))?;
    let user = CurrentUser::from(claims);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user)))
}

async fn handle_socket(mut socket: WebSocket, state: ServerState, user: CurrentUser) {
    tracing::info!(user = %user.email, "Sync client connected");
    let mut rx = state.sync.subscribe();

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let Ok(text) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                // Slow consumer fell behind the ring buffer: tell it to do a
                // full refetch rather than replaying what was lost.
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(user = %user.email, skipped, "Sync client lagged");
                    if socket
                        .send(Message::Text(r#"{"resource":"*","action":"updated"}"#.into()))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            },
            msg = socket.recv() => match msg {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // pings and client chatter are ignored
                Some(Err(_)) => break,
            },
        }
    }

    tracing::info!(user = %user.email, "Sync client disconnected");
}
