//! Booking API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use shared::models::{ActivityEntry, Booking, BookingCreate, BookingUpdate};
use shared::sync::SyncAction;
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::bookings::{self, TransitionRequest};
use crate::calendar::{lookback_start, visible_dates};
use crate::core::ServerState;
use crate::db::repository::{booking, room};
use crate::utils::time;

const RESOURCE: &str = "booking";

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    /// Focused date; defaults to today
    pub date: Option<String>,
}

/// GET /api/bookings?date=YYYY-MM-DD
///
/// The non-terminal bookings intersecting the 14-day window around `date`.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(params): Query<WindowQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let selected = match params.date {
        Some(raw) => time::parse_date(&raw)?,
        None => time::today(),
    };
    let window = visible_dates(selected);
    let (start, end) = (window[0], window[window.len() - 1]);
    let rows = booking::find_overlapping(
        &state.pool,
        &user.store_id,
        lookback_start(start),
        start,
        end,
    )
    .await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/bookings/search?q=
pub async fn search(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let rows = bookings::search::run(&state, &user.store_id, &params.q).await?;
    Ok(Json(rows))
}

/// GET /api/bookings/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let found = booking::find_by_id(&state.pool, &user.store_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
    Ok(Json(found))
}

/// POST /api/bookings
///
/// Creates a BO booking. Refused when the room is not bookable or another
/// open booking already starts on the same (room, date).
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    user.require_can_edit()?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let target_room = room::find_by_id(&state.pool, &user.store_id, &payload.room_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RoomNotFound))?;
    if !target_room.is_bookable() {
        return Err(AppError::room_inactive(format!(
            "Room {} is {}",
            target_room.name, target_room.status
        )));
    }

    if booking::start_date_taken(&state.pool, &user.store_id, &payload.room_id, payload.date, None)
        .await?
    {
        return Err(AppError::with_message(
            ErrorCode::DuplicateStartDate,
            format!("A booking already starts on {} in this room", payload.date),
        ));
    }

    let created = booking::create(&state.pool, &user.store_id, payload).await?;

    state.log_activity(
        &user.store_id,
        Some(&user.id),
        ActivityEntry::new(
            "booking_created",
            "booking",
            &created.id,
            format!(
                "{} booked {} for {} night(s) from {}",
                user.display_name, created.customer_name, created.duration, created.date
            ),
        ),
    );
    state.broadcast_sync(RESOURCE, SyncAction::Created, &created.id, Some(&created));
    Ok(Json(created))
}

/// PUT /api/bookings/:id
///
/// Direct edit of booking fields; status never changes here, that is the
/// transition endpoint's job.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<BookingUpdate>,
) -> AppResult<Json<Booking>> {
    user.require_can_edit()?;

    let existing = booking::find_by_id(&state.pool, &user.store_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
    if existing.status.is_terminal() {
        return Err(AppError::with_message(
            ErrorCode::BookingTerminal,
            "Closed bookings cannot be edited",
        ));
    }

    // Moving the stay re-checks the one-start-per-cell rule
    let new_room = payload.room_id.as_deref().unwrap_or(&existing.room_id);
    let new_date = payload.date.unwrap_or(existing.date);
    if (new_room, new_date) != (existing.room_id.as_str(), existing.date)
        && booking::start_date_taken(&state.pool, &user.store_id, new_room, new_date, Some(&id))
            .await?
    {
        return Err(AppError::with_message(
            ErrorCode::DuplicateStartDate,
            format!("A booking already starts on {new_date} in this room"),
        ));
    }

    let updated = booking::update(&state.pool, &user.store_id, &id, payload).await?;
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&updated));
    Ok(Json(updated))
}

/// DELETE /api/bookings/:id
///
/// Hard delete, admin only. BATAL via the transition endpoint is the normal
/// way to take a booking off the calendar.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    if !user.is_admin() {
        return Err(AppError::permission_denied(
            "Only an admin can delete a booking",
        ));
    }
    let deleted = booking::delete(&state.pool, &user.store_id, &id).await?;
    if deleted {
        state.log_activity(
            &user.store_id,
            Some(&user.id),
            ActivityEntry::new(
                "booking_deleted",
                "booking",
                &id,
                format!("{} deleted booking {id}", user.display_name),
            ),
        );
        state.broadcast_sync::<()>(RESOURCE, SyncAction::Deleted, &id, None);
    }
    Ok(Json(deleted))
}

/// POST /api/bookings/:id/transition
pub async fn transition(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<TransitionRequest>,
) -> AppResult<Json<Booking>> {
    let updated = bookings::execute_transition(&state, &user, &id, req, time::today()).await?;
    Ok(Json(updated))
}
