//! Room Daily Status Model
//!
//! A sparse per-(room, date) overlay recording housekeeping state. Absent
//! rows mean "no override". Rows are upserted on the composite key,
//! last-writer-wins.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Door status value for a single room-day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum DoorStatus {
    /// Dirty, needs housekeeping
    Kotor,
    /// Cleaned and ready for new occupancy
    Aktif,
}

impl DoorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kotor => "Kotor",
            Self::Aktif => "Aktif",
        }
    }
}

impl fmt::Display for DoorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room daily status entity, keyed by (room_id, date)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RoomDailyStatus {
    pub id: String,
    pub store_id: String,
    pub room_id: String,
    pub date: NaiveDate,
    pub status: DoorStatus,
    /// Display name of whoever last touched the row, for audit display
    pub updated_by: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload for a room-day status override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDailyStatusUpsert {
    pub room_id: String,
    pub date: NaiveDate,
    pub status: DoorStatus,
}
