//! Display preferences routes

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/settings/display",
        get(handler::get_prefs).put(handler::put_prefs),
    )
}
