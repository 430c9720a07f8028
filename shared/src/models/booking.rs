//! Booking Model
//!
//! A booking claims a room for `duration` nights starting at `date`. Dates
//! are calendar-local (`NaiveDate`), never converted across time zones: the
//! night of 2024-06-01 is the same night whatever clock the server runs on.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Booking lifecycle status
///
/// `BO` (booked) is the initial status. `CO` and `BATAL` are terminal:
/// no transition is ever offered out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum BookingStatus {
    /// Booked / reserved, pre-check-in
    Bo,
    /// Checked in
    Ci,
    /// Checked out (terminal)
    Co,
    /// Cancelled (terminal)
    Batal,
}

impl BookingStatus {
    /// Statuses reachable from this one
    pub fn allowed_targets(&self) -> &'static [BookingStatus] {
        match self {
            Self::Bo => &[Self::Ci, Self::Batal],
            Self::Ci => &[Self::Co, Self::Batal],
            Self::Co | Self::Batal => &[],
        }
    }

    /// Whether this status admits no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Co | Self::Batal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bo => "BO",
            Self::Ci => "CI",
            Self::Co => "CO",
            Self::Batal => "BATAL",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BO" => Ok(Self::Bo),
            "CI" => Ok(Self::Ci),
            "CO" => Ok(Self::Co),
            "BATAL" => Ok(Self::Batal),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

/// Booking entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: String,
    pub store_id: String,
    pub room_id: String,
    /// Optional reference code shown to the guest
    pub bid: Option<String>,
    /// Check-in day (calendar-local)
    pub date: NaiveDate,
    /// Night count, >= 1
    pub duration: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub status: BookingStatus,
    /// Price per night, integer rupiah
    pub room_price: i64,
    /// Total for the stay, integer rupiah
    pub total_price: i64,
    pub note: Option<String>,
    pub confirmed_by: Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub checked_in_by: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_by: Option<String>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Last occupied night: `date + duration - 1`
    pub fn last_night(&self) -> NaiveDate {
        self.date + Days::new(self.duration.max(1) as u64 - 1)
    }

    /// Check-out day (the morning after the last night)
    pub fn check_out_date(&self) -> NaiveDate {
        self.date + Days::new(self.duration.max(1) as u64)
    }

    /// Whether `day` falls inside the occupied range `[date, date + duration - 1]`
    pub fn occupies(&self, day: NaiveDate) -> bool {
        day >= self.date && day <= self.last_night()
    }

    /// Whether the occupied range intersects `[start, end]` (both inclusive)
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date <= end && self.last_night() >= start
    }
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingCreate {
    pub room_id: String,
    pub date: NaiveDate,
    #[validate(range(min = 1, message = "duration must be at least one night"))]
    pub duration: i64,
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,
    pub phone: Option<String>,
    pub bid: Option<String>,
    #[validate(range(min = 0))]
    pub room_price: i64,
    #[validate(range(min = 0))]
    pub total_price: i64,
    pub note: Option<String>,
}

/// Update booking payload (direct edit, not a status transition)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingUpdate {
    pub room_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub duration: Option<i64>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub bid: Option<String>,
    pub room_price: Option<i64>,
    pub total_price: Option<i64>,
    pub note: Option<String>,
}
