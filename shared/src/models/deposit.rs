//! Room Deposit Model
//!
//! Deposits are scoped to the room, not to a specific stay: the gate logic
//! asks "does this room currently hold an active deposit", taking the single
//! most recent active row. `booking_id` is recorded for audit only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// What was taken as the deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum DepositKind {
    /// Cash deposit
    Money,
    /// Identity document held at the desk (KTP, SIM, passport)
    Identity,
}

/// Deposit lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum DepositStatus {
    Active,
    Returned,
}

/// Room deposit entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RoomDeposit {
    pub id: String,
    pub store_id: String,
    pub room_id: String,
    /// Booking that triggered the capture, for audit display
    pub booking_id: Option<String>,
    pub kind: DepositKind,
    /// Amount in rupiah, for money deposits
    pub amount: Option<i64>,
    /// Description of the held document, for identity deposits
    pub identity_desc: Option<String>,
    pub status: DepositStatus,
    pub taken_by: String,
    pub taken_at: DateTime<Utc>,
    pub returned_by: Option<String>,
    pub returned_at: Option<DateTime<Utc>>,
}

/// Deposit capture payload, attached to a check-in transition
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepositCapture {
    pub kind: DepositKind,
    #[validate(range(min = 0))]
    pub amount: Option<i64>,
    pub identity_desc: Option<String>,
}
