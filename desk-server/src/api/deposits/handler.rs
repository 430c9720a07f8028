//! Room deposit handlers
//!
//! Capture and return normally happen inside a check-in / checkout
//! transition; these endpoints cover the out-of-band cases (walk-in deposit,
//! manual correction).

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use validator::Validate;

use shared::models::{ActivityEntry, DepositCapture, RoomDeposit};
use shared::sync::SyncAction;
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{deposit, room};

const RESOURCE: &str = "room_deposit";

/// GET /api/deposits/room/:room_id
///
/// The room's active deposit, if any. `null` means the check-in gate will
/// ask for a capture.
pub async fn active_for_room(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(room_id): Path<String>,
) -> AppResult<Json<Option<RoomDeposit>>> {
    let found = deposit::find_active_by_room(&state.pool, &user.store_id, &room_id).await?;
    Ok(Json(found))
}

/// POST /api/deposits/room/:room_id
pub async fn capture(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(room_id): Path<String>,
    Json(payload): Json<DepositCapture>,
) -> AppResult<Json<RoomDeposit>> {
    user.require_can_edit()?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    room::find_by_id(&state.pool, &user.store_id, &room_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RoomNotFound))?;

    if deposit::find_active_by_room(&state.pool, &user.store_id, &room_id)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::DepositAlreadyActive));
    }

    let id = deposit::insert(
        &state.pool,
        &user.store_id,
        &room_id,
        None,
        &payload,
        &user.display_name,
        Utc::now(),
    )
    .await?;
    let created = deposit::find_by_id(&state.pool, &user.store_id, &id)
        .await?
        .ok_or_else(|| AppError::database("Deposit missing after insert"))?;

    state.log_activity(
        &user.store_id,
        Some(&user.id),
        ActivityEntry::new(
            "deposit_captured",
            "room_deposit",
            &id,
            format!("{} captured a deposit for room {room_id}", user.display_name),
        ),
    );
    state.broadcast_sync(RESOURCE, SyncAction::Created, &id, Some(&created));
    Ok(Json(created))
}

/// POST /api/deposits/:id/return
pub async fn return_deposit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<RoomDeposit>> {
    user.require_can_edit()?;

    deposit::find_by_id(&state.pool, &user.store_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepositNotFound))?;

    deposit::close(&state.pool, &id, &user.display_name, Utc::now()).await?;
    let closed = deposit::find_by_id(&state.pool, &user.store_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepositNotFound))?;

    state.log_activity(
        &user.store_id,
        Some(&user.id),
        ActivityEntry::new(
            "deposit_returned",
            "room_deposit",
            &id,
            format!("{} returned deposit {id}", user.display_name),
        ),
    );
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&closed));
    Ok(Json(closed))
}
