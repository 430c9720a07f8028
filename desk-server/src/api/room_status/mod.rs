//! Room daily-status routes

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/room-status",
        get(handler::list).put(handler::upsert),
    )
}
