//! Booking placement resolver
//!
//! Given one room's bookings and the visible window, decides for every date
//! cell whether it renders a booking card (and how many columns the card
//! spans), is absorbed by an earlier card, or is free.

use chrono::NaiveDate;

use shared::models::Booking;

/// Render decision for one (room, date) cell
#[derive(Debug, Clone, PartialEq)]
pub enum Placement<'a> {
    /// First visible day of a booking: render a card spanning `colspan`
    /// columns. For bookings that began before the window, the first visible
    /// column is promoted to a synthetic start so the row still shows a card.
    Start { booking: &'a Booking, colspan: usize },
    /// Inside an earlier card's span: render nothing
    Continuation,
    /// No booking claims this date: delegate to the door-status overlay
    Free,
}

/// Resolve the placement of every window cell for one room
///
/// `bookings` is that room's bookings whose occupied range may intersect the
/// window. Terminal bookings (CO / BATAL) never occupy cells: the grid shows
/// current occupancy, not history.
///
/// At most one booking may start on a given (room, date). Should the data
/// ever violate that, the lowest id wins deterministically and the rest are
/// surfaced as a data-integrity warning, not silently dropped.
pub fn resolve_cells<'a>(window: &[NaiveDate], bookings: &'a [Booking]) -> Vec<Placement<'a>> {
    let Some((&window_start, &window_end)) = window.first().zip(window.last()) else {
        return Vec::new();
    };

    let active: Vec<&Booking> = bookings.iter().filter(|b| !b.status.is_terminal()).collect();

    let mut cells = Vec::with_capacity(window.len());
    let mut skip = 0usize;

    for (i, &day) in window.iter().enumerate() {
        if skip > 0 {
            skip -= 1;
            cells.push(Placement::Continuation);
            continue;
        }

        let starting = pick_one(active.iter().copied().filter(|b| b.date == day), day);

        // A booking that began off-screen still gets a card: promote the
        // first visible column to a synthetic start.
        let promoted = if i == 0 && starting.is_none() {
            pick_one(
                active
                    .iter()
                    .copied()
                    .filter(|b| b.date < window_start && b.occupies(window_start)),
                day,
            )
        } else {
            None
        };

        match starting.or(promoted) {
            Some(booking) => {
                let span_end = booking.last_night().min(window_end);
                let colspan = (span_end - day).num_days() as usize + 1;
                skip = colspan - 1;
                cells.push(Placement::Start { booking, colspan });
            }
            None => cells.push(Placement::Free),
        }
    }

    cells
}

/// Deterministically pick one booking out of possibly several claiming the
/// same cell, warning when the at-most-one-start invariant is violated.
fn pick_one<'a>(
    candidates: impl Iterator<Item = &'a Booking>,
    day: NaiveDate,
) -> Option<&'a Booking> {
    let mut candidates: Vec<&Booking> = candidates.collect();
    if candidates.len() > 1 {
        candidates.sort_by(|a, b| a.id.cmp(&b.id));
        tracing::warn!(
            date = %day,
            room_id = %candidates[0].room_id,
            ids = ?candidates.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(),
            "Multiple bookings claim the same cell; rendering the lowest id"
        );
    }
    candidates.into_iter().min_by(|a, b| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::visible_dates;
    use chrono::Utc;
    use shared::models::BookingStatus;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn booking(id: &str, date: &str, duration: i64, status: BookingStatus) -> Booking {
        Booking {
            id: id.into(),
            store_id: "s1".into(),
            room_id: "101".into(),
            bid: None,
            date: d(date),
            duration,
            customer_name: "Guest".into(),
            phone: None,
            status,
            room_price: 150_000,
            total_price: 150_000 * duration,
            note: None,
            confirmed_by: None,
            confirmed_at: None,
            checked_in_by: None,
            checked_in_at: None,
            checked_out_by: None,
            checked_out_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn colspan_at(cells: &[Placement<'_>], idx: usize) -> usize {
        match &cells[idx] {
            Placement::Start { colspan, .. } => *colspan,
            other => panic!("expected Start at {idx}, got {other:?}"),
        }
    }

    #[test]
    fn test_three_night_booking_in_window() {
        // Room 101, booking B1: 2024-06-01 x3 nights, window 05-29 .. 06-11
        let window = visible_dates(d("2024-06-01"));
        let bookings = vec![booking("B1", "2024-06-01", 3, BookingStatus::Bo)];
        let cells = resolve_cells(&window, &bookings);

        assert_eq!(colspan_at(&cells, 3), 3); // 06-01
        assert_eq!(cells[4], Placement::Continuation); // 06-02
        assert_eq!(cells[5], Placement::Continuation); // 06-03
        assert_eq!(cells[6], Placement::Free); // 06-04
        assert_eq!(cells[2], Placement::Free); // 05-31
    }

    #[test]
    fn test_off_window_start_promoted() {
        // date = window_start - 5, duration 8: nights 05-24 .. 05-31, of
        // which 05-29/30/31 are visible. Synthetic start at column 0,
        // colspan 3.
        let window = visible_dates(d("2024-06-01"));
        let bookings = vec![booking("B1", "2024-05-24", 8, BookingStatus::Ci)];
        let cells = resolve_cells(&window, &bookings);

        assert_eq!(colspan_at(&cells, 0), 3);
        assert_eq!(cells[1], Placement::Continuation);
        assert_eq!(cells[2], Placement::Continuation);
        assert_eq!(cells[3], Placement::Free);
    }

    #[test]
    fn test_colspan_clamped_to_window_end() {
        // Starts on the last visible day with 5 nights: card is 1 wide
        let window = visible_dates(d("2024-06-01"));
        let bookings = vec![booking("B1", "2024-06-11", 5, BookingStatus::Bo)];
        let cells = resolve_cells(&window, &bookings);
        assert_eq!(colspan_at(&cells, 13), 1);
    }

    #[test]
    fn test_terminal_bookings_never_occupy() {
        let window = visible_dates(d("2024-06-01"));
        let bookings = vec![
            booking("B1", "2024-06-01", 3, BookingStatus::Co),
            booking("B2", "2024-06-05", 2, BookingStatus::Batal),
        ];
        let cells = resolve_cells(&window, &bookings);
        assert!(cells.iter().all(|c| *c == Placement::Free));
    }

    #[test]
    fn test_duplicate_start_resolves_to_lowest_id() {
        let window = visible_dates(d("2024-06-01"));
        let bookings = vec![
            booking("B2", "2024-06-01", 2, BookingStatus::Bo),
            booking("B1", "2024-06-01", 4, BookingStatus::Bo),
        ];
        let cells = resolve_cells(&window, &bookings);
        match &cells[3] {
            Placement::Start { booking, colspan } => {
                assert_eq!(booking.id, "B1");
                assert_eq!(*colspan, 4);
            }
            other => panic!("expected Start, got {other:?}"),
        }
    }

    #[test]
    fn test_exactly_one_decision_per_cell_and_spans_tile() {
        // Property: START colspans overlaid on the window cover exactly the
        // START + CONTINUATION cells, no gaps, no double coverage.
        let window = visible_dates(d("2024-06-01"));
        let bookings = vec![
            booking("B1", "2024-05-28", 4, BookingStatus::Ci), // promoted, clipped
            booking("B2", "2024-06-02", 1, BookingStatus::Bo),
            booking("B3", "2024-06-05", 6, BookingStatus::Bo),
        ];
        let cells = resolve_cells(&window, &bookings);
        assert_eq!(cells.len(), window.len());

        let mut covered = vec![false; window.len()];
        for (i, cell) in cells.iter().enumerate() {
            if let Placement::Start { colspan, .. } = cell {
                for j in i..i + colspan {
                    assert!(!covered[j], "double coverage at {j}");
                    covered[j] = true;
                }
            }
        }
        for (i, cell) in cells.iter().enumerate() {
            match cell {
                Placement::Free => assert!(!covered[i], "free cell {i} covered"),
                _ => assert!(covered[i], "occupied cell {i} uncovered"),
            }
        }
    }

    #[test]
    fn test_back_to_back_bookings() {
        // B1 nights 06-01..06-02, B2 starts 06-03: cards touch, no gap
        let window = visible_dates(d("2024-06-01"));
        let bookings = vec![
            booking("B1", "2024-06-01", 2, BookingStatus::Bo),
            booking("B2", "2024-06-03", 2, BookingStatus::Bo),
        ];
        let cells = resolve_cells(&window, &bookings);
        assert_eq!(colspan_at(&cells, 3), 2);
        assert_eq!(colspan_at(&cells, 5), 2);
        assert_eq!(cells[4], Placement::Continuation);
        assert_eq!(cells[6], Placement::Continuation);
        assert_eq!(cells[7], Placement::Free);
    }

    #[test]
    fn test_empty_window() {
        assert!(resolve_cells(&[], &[]).is_empty());
    }
}
