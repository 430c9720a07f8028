//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Store errors
/// - 4xxx: Booking errors
/// - 5xxx: Deposit errors
/// - 6xxx: Room errors
/// - 7xxx: Room daily-status errors
/// - 8xxx: Profile errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Store errors (3xxx)
    Store,
    /// Booking errors (4xxx)
    Booking,
    /// Deposit errors (5xxx)
    Deposit,
    /// Room errors (6xxx)
    Room,
    /// Room daily-status errors (7xxx)
    RoomStatus,
    /// Profile errors (8xxx)
    Profile,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Store,
            4000..5000 => Self::Booking,
            5000..6000 => Self::Deposit,
            6000..7000 => Self::Room,
            7000..8000 => Self::RoomStatus,
            8000..9000 => Self::Profile,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::InvalidTransition.category(), ErrorCategory::Booking);
        assert_eq!(ErrorCode::DepositRequired.category(), ErrorCategory::Deposit);
        assert_eq!(ErrorCode::RoomInactive.category(), ErrorCategory::Room);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }
}
