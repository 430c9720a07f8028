//! Unified error codes for the Losmen PMS
//!
//! Error codes are shared between the desk server and its clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Store errors
//! - 4xxx: Booking errors
//! - 5xxx: Deposit errors
//! - 6xxx: Room errors
//! - 7xxx: Room daily-status errors
//! - 8xxx: Profile errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Store ====================
    /// Record belongs to a different store
    StoreMismatch = 3001,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Status transition not allowed from the current status
    InvalidTransition = 4002,
    /// Booking is in a terminal status (CO / BATAL)
    BookingTerminal = 4003,
    /// Two bookings start on the same room and date
    DuplicateStartDate = 4004,

    // ==================== 5xxx: Deposit ====================
    /// Deposit not found
    DepositNotFound = 5001,
    /// A deposit step must be completed before the transition
    DepositRequired = 5002,
    /// Room already holds an active deposit
    DepositAlreadyActive = 5003,

    // ==================== 6xxx: Room ====================
    /// Room not found
    RoomNotFound = 6001,
    /// Room is not bookable (lifecycle status != Aktif)
    RoomInactive = 6002,
    /// Room name already exists
    RoomNameExists = 6003,

    // ==================== 7xxx: Room daily status ====================
    /// Unknown daily-status value
    DailyStatusInvalid = 7001,

    // ==================== 8xxx: Profile ====================
    /// Profile not found
    ProfileNotFound = 8001,
    /// Email already registered
    EmailExists = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "Not authenticated",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Token is invalid",

            Self::PermissionDenied => "Permission denied",

            Self::StoreMismatch => "Record belongs to a different store",

            Self::BookingNotFound => "Booking not found",
            Self::InvalidTransition => "Status transition not allowed",
            Self::BookingTerminal => "Booking is already checked out or cancelled",
            Self::DuplicateStartDate => "Another booking already starts on this room and date",

            Self::DepositNotFound => "Deposit not found",
            Self::DepositRequired => "A deposit step is required before this transition",
            Self::DepositAlreadyActive => "Room already holds an active deposit",

            Self::RoomNotFound => "Room not found",
            Self::RoomInactive => "Room is not bookable",
            Self::RoomNameExists => "Room name already exists",

            Self::DailyStatusInvalid => "Unknown daily-status value",

            Self::ProfileNotFound => "Profile not found",
            Self::EmailExists => "Email already registered",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            6 => Ok(Self::RequiredField),
            7 => Ok(Self::ValueOutOfRange),

            1001 => Ok(Self::NotAuthenticated),
            1002 => Ok(Self::InvalidCredentials),
            1003 => Ok(Self::TokenExpired),
            1004 => Ok(Self::TokenInvalid),

            2001 => Ok(Self::PermissionDenied),

            3001 => Ok(Self::StoreMismatch),

            4001 => Ok(Self::BookingNotFound),
            4002 => Ok(Self::InvalidTransition),
            4003 => Ok(Self::BookingTerminal),
            4004 => Ok(Self::DuplicateStartDate),

            5001 => Ok(Self::DepositNotFound),
            5002 => Ok(Self::DepositRequired),
            5003 => Ok(Self::DepositAlreadyActive),

            6001 => Ok(Self::RoomNotFound),
            6002 => Ok(Self::RoomInactive),
            6003 => Ok(Self::RoomNameExists),

            7001 => Ok(Self::DailyStatusInvalid),

            8001 => Ok(Self::ProfileNotFound),
            8002 => Ok(Self::EmailExists),

            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::DatabaseError),

            other => Err(format!("Unknown error code: {}", other)),
        }
    }
}
