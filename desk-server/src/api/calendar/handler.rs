//! Calendar grid handler
//!
//! Composes the whole 14-day view server-side: one fetch for bookings, one
//! for status overrides, then the pure placement and overlay passes per
//! room. The client renders what it gets and never re-derives occupancy.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared::AppResult;
use shared::models::{Booking, Room};

use crate::auth::CurrentUser;
use crate::calendar::{
    DoorState, FreeCellAction, Placement, free_cell_action, lookback_start, resolve_cells,
    resolve_door, visible_dates,
};
use crate::core::ServerState;
use crate::db::repository::{booking, room, room_status};
use crate::utils::time;

#[derive(Debug, Deserialize)]
pub struct GridQuery {
    /// Focused date; defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CalendarGrid {
    pub selected: NaiveDate,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<RoomRow>,
}

#[derive(Debug, Serialize)]
pub struct RoomRow {
    pub room: Room,
    pub cells: Vec<Cell>,
}

/// One rendered cell
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    /// Booking card spanning `colspan` columns
    Booking { booking: Booking, colspan: usize },
    /// Absorbed by an earlier card; renders nothing
    Continuation,
    /// No booking; door state and offered action
    Free {
        door: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        marked_by: Option<String>,
        action: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        blocked_reason: Option<String>,
    },
}

/// GET /api/calendar?date=YYYY-MM-DD
pub async fn grid(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(params): Query<GridQuery>,
) -> AppResult<Json<CalendarGrid>> {
    let selected = match params.date {
        Some(raw) => time::parse_date(&raw)?,
        None => time::today(),
    };
    let dates = visible_dates(selected);
    let (start, end) = (dates[0], dates[dates.len() - 1]);

    let rooms = room::find_all(&state.pool, &user.store_id).await?;
    let bookings = booking::find_overlapping(
        &state.pool,
        &user.store_id,
        lookback_start(start),
        start,
        end,
    )
    .await?;
    let statuses = room_status::find_range(&state.pool, &user.store_id, start, end).await?;

    let mut by_room: HashMap<&str, Vec<Booking>> = HashMap::new();
    for b in &bookings {
        by_room.entry(b.room_id.as_str()).or_default().push(b.clone());
    }
    let status_map: HashMap<(&str, NaiveDate), &shared::models::RoomDailyStatus> = statuses
        .iter()
        .map(|s| ((s.room_id.as_str(), s.date), s))
        .collect();

    let can_create = user.can_edit();
    let empty = Vec::new();
    let rows = rooms
        .into_iter()
        .map(|r| {
            let room_bookings = by_room.get(r.id.as_str()).unwrap_or(&empty);
            let placements = resolve_cells(&dates, room_bookings);
            let cells = placements
                .into_iter()
                .zip(&dates)
                .map(|(p, &day)| match p {
                    Placement::Start { booking, colspan } => Cell::Booking {
                        booking: booking.clone(),
                        colspan,
                    },
                    Placement::Continuation => Cell::Continuation,
                    Placement::Free => {
                        let door = resolve_door(status_map.get(&(r.id.as_str(), day)).copied());
                        free_cell(&r, door, can_create)
                    }
                })
                .collect();
            RoomRow { room: r, cells }
        })
        .collect();

    Ok(Json(CalendarGrid {
        selected,
        dates,
        rows,
    }))
}

fn free_cell(room: &Room, door: DoorState, can_create: bool) -> Cell {
    let action = free_cell_action(room, &door, can_create);
    let (door_str, marked_by) = match door {
        DoorState::Dirty => ("dirty", None),
        DoorState::Ready { marked_by } => ("ready", marked_by),
        DoorState::Default => ("default", None),
    };
    let (action_str, blocked_reason) = match action {
        FreeCellAction::CreateBooking => ("create_booking", None),
        FreeCellAction::MarkReady => ("mark_ready", None),
        FreeCellAction::Blocked { reason } => ("blocked", Some(reason)),
    };
    Cell::Free {
        door: door_str,
        marked_by,
        action: action_str,
        blocked_reason,
    }
}
