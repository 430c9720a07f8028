//! Date helpers
//!
//! Dates are calendar-local throughout; the only clock read in the whole
//! server happens here.

use chrono::{Local, NaiveDate};

use shared::{AppError, AppResult};

/// Today's date on the server's local clock
///
/// Handlers read the clock once and pass the date down, so the domain layer
/// stays deterministic under test.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` query-string date
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(parse_date("01/06/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }
}
