//! Room deposit routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/deposits", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/room/{room_id}", get(handler::active_for_room).post(handler::capture))
        .route("/{id}/return", post(handler::return_deposit))
}
