//! Room Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lifecycle status value marking a room as bookable. Any other string means
/// the room is blocked (renovation, out of order, etc.) and the blocking
/// reason is the status text itself.
pub const ROOM_STATUS_ACTIVE: &str = "Aktif";

/// Room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub id: String,
    pub store_id: String,
    pub name: String,
    /// Lifecycle status: `Aktif` = bookable, anything else = blocked
    pub status: String,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Whether new bookings may be created for this room
    pub fn is_bookable(&self) -> bool {
        self.status == ROOM_STATUS_ACTIVE
    }
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoomCreate {
    #[validate(length(min = 1, message = "room name is required"))]
    pub name: String,
    pub status: Option<String>,
    pub sort_order: Option<i64>,
}

/// Update room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub name: Option<String>,
    pub status: Option<String>,
    pub sort_order: Option<i64>,
}
