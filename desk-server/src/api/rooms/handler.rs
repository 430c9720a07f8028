//! Room API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use shared::models::{Room, RoomCreate, RoomUpdate};
use shared::sync::SyncAction;
use shared::{AppError, AppResult};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::room;

const RESOURCE: &str = "room";

/// GET /api/rooms
pub async fn list(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<Vec<Room>>> {
    let rooms = room::find_all(&state.pool, &user.store_id).await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Room>> {
    let found = room::find_by_id(&state.pool, &user.store_id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {id}")))?;
    Ok(Json(found))
}

/// POST /api/rooms
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<Room>> {
    user.require_can_edit()?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let created = room::create(&state.pool, &user.store_id, payload).await?;
    state.broadcast_sync(RESOURCE, SyncAction::Created, &created.id, Some(&created));
    Ok(Json(created))
}

/// PUT /api/rooms/:id
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<Room>> {
    user.require_can_edit()?;
    let updated = room::update(&state.pool, &user.store_id, &id, payload).await?;
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&updated));
    Ok(Json(updated))
}

/// DELETE /api/rooms/:id
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    user.require_can_edit()?;
    let deleted = room::delete(&state.pool, &user.store_id, &id).await?;
    if deleted {
        state.broadcast_sync::<()>(RESOURCE, SyncAction::Deleted, &id, None);
    }
    Ok(Json(deleted))
}
