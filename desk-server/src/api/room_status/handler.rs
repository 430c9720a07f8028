//! Room daily-status handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::Deserialize;

use shared::models::{ActivityEntry, RoomDailyStatus, RoomDailyStatusUpsert};
use shared::sync::SyncAction;
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{room, room_status};
use crate::utils::time;

const RESOURCE: &str = "room_daily_status";

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: String,
    pub to: String,
}

/// GET /api/room-status?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(params): Query<RangeQuery>,
) -> AppResult<Json<Vec<RoomDailyStatus>>> {
    let from = time::parse_date(&params.from)?;
    let to = time::parse_date(&params.to)?;
    if from > to {
        return Err(AppError::validation("from must not be after to"));
    }
    let rows = room_status::find_range(&state.pool, &user.store_id, from, to).await?;
    Ok(Json(rows))
}

/// PUT /api/room-status
///
/// Manual mark-dirty / mark-ready from the calendar. Last writer wins on the
/// (room, date) key.
pub async fn upsert(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RoomDailyStatusUpsert>,
) -> AppResult<Json<RoomDailyStatus>> {
    user.require_can_edit()?;

    room::find_by_id(&state.pool, &user.store_id, &payload.room_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RoomNotFound))?;

    room_status::upsert(
        &state.pool,
        &user.store_id,
        &payload.room_id,
        payload.date,
        payload.status,
        Some(&user.display_name),
        Utc::now(),
    )
    .await?;

    let row = room_status::find_one(&state.pool, &user.store_id, &payload.room_id, payload.date)
        .await?
        .ok_or_else(|| AppError::database("Status row missing after upsert"))?;

    state.log_activity(
        &user.store_id,
        Some(&user.id),
        ActivityEntry::new(
            "room_status_set",
            "room_daily_status",
            &row.id,
            format!(
                "{} marked room {} as {} for {}",
                user.display_name, payload.room_id, payload.status, payload.date
            ),
        ),
    );
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &row.id, Some(&row));
    Ok(Json(row))
}
