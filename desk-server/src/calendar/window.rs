//! Date window
//!
//! The calendar always renders a fixed 14-day window around the focused
//! date: 3 days of context before it, 10 after. Every booking and status
//! query is bounded by this window.

use chrono::{Days, NaiveDate};

/// Days rendered by the calendar
pub const VISIBLE_DAYS: usize = 14;

/// Days of context shown before the focused date
const DAYS_BEFORE: u64 = 3;

/// How far before the window start the booking query reaches, so multi-night
/// bookings that began off-screen are still fetched. A safety margin for
/// realistic stay lengths, not a guarantee for arbitrarily long ones.
pub const QUERY_LOOKBACK_DAYS: u64 = 60;

/// The 14 consecutive dates visible around `selected`
///
/// `selected` lands at index 3. Pure and deterministic.
pub fn visible_dates(selected: NaiveDate) -> Vec<NaiveDate> {
    let start = selected - Days::new(DAYS_BEFORE);
    (0..VISIBLE_DAYS as u64).map(|i| start + Days::new(i)).collect()
}

/// Lower bound for the booking fetch backing a window starting at `window_start`
pub fn lookback_start(window_start: NaiveDate) -> NaiveDate {
    window_start - Days::new(QUERY_LOOKBACK_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_window_shape() {
        let dates = visible_dates(d("2024-06-01"));
        assert_eq!(dates.len(), VISIBLE_DAYS);
        assert_eq!(dates[0], d("2024-05-29"));
        assert_eq!(dates[3], d("2024-06-01"));
        assert_eq!(dates[13], d("2024-06-11"));
    }

    #[test]
    fn test_window_is_consecutive() {
        let dates = visible_dates(d("2024-02-27"));
        for pair in dates.windows(2) {
            assert_eq!(pair[1], pair[0] + Days::new(1));
        }
        // leap day sits inside this window
        assert!(dates.contains(&d("2024-02-29")));
    }

    #[test]
    fn test_window_across_year_boundary() {
        let dates = visible_dates(d("2024-01-01"));
        assert_eq!(dates[0], d("2023-12-29"));
        assert_eq!(dates[13], d("2024-01-11"));
    }

    #[test]
    fn test_same_input_same_window() {
        assert_eq!(visible_dates(d("2024-06-01")), visible_dates(d("2024-06-01")));
    }

    #[test]
    fn test_lookback() {
        assert_eq!(lookback_start(d("2024-06-01")), d("2024-04-02"));
    }
}
