//! Room daily-status overlay
//!
//! Resolves what a free cell renders and which action it offers, from the
//! sparse per-(room, date) status map and the room's lifecycle status.
//! Independent of bookings.

use shared::models::{DoorStatus, Room, RoomDailyStatus};

/// Door state of a free cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoorState {
    /// `Kotor`: needs housekeeping
    Dirty,
    /// `Aktif`: cleaned and ready; shows who marked it when recorded
    Ready { marked_by: Option<String> },
    /// No override recorded for this room-day
    Default,
}

/// What interacting with a free cell does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreeCellAction {
    /// Open the create-booking form
    CreateBooking,
    /// Offer the mark-ready housekeeping confirmation
    MarkReady,
    /// Static placeholder carrying the room's blocking reason
    Blocked { reason: String },
}

/// Resolve the door state from the status row, if any
pub fn resolve_door(status: Option<&RoomDailyStatus>) -> DoorState {
    match status {
        Some(row) => match row.status {
            DoorStatus::Kotor => DoorState::Dirty,
            DoorStatus::Aktif => DoorState::Ready {
                marked_by: row.updated_by.clone(),
            },
        },
        None => DoorState::Default,
    }
}

/// Decide the action a free cell offers
///
/// Dirty cells always offer the mark-ready step. Ready and default cells
/// permit booking creation only when the room's lifecycle status is `Aktif`
/// and the caller holds the create-booking capability; otherwise the cell is
/// a static placeholder showing why the room is blocked.
pub fn free_cell_action(room: &Room, door: &DoorState, can_create: bool) -> FreeCellAction {
    if *door == DoorState::Dirty {
        return FreeCellAction::MarkReady;
    }
    if room.is_bookable() && can_create {
        FreeCellAction::CreateBooking
    } else {
        let reason = if room.is_bookable() {
            "read-only".to_string()
        } else {
            room.status.clone()
        };
        FreeCellAction::Blocked { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn room(status: &str) -> Room {
        Room {
            id: "r1".into(),
            store_id: "s1".into(),
            name: "101".into(),
            status: status.into(),
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    fn status_row(status: DoorStatus, updated_by: Option<&str>) -> RoomDailyStatus {
        RoomDailyStatus {
            id: "d1".into(),
            store_id: "s1".into(),
            room_id: "r1".into(),
            date: "2024-06-01".parse().unwrap(),
            status,
            updated_by: updated_by.map(|s| s.to_string()),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_resolve_door() {
        assert_eq!(resolve_door(None), DoorState::Default);
        assert_eq!(
            resolve_door(Some(&status_row(DoorStatus::Kotor, None))),
            DoorState::Dirty
        );
        assert_eq!(
            resolve_door(Some(&status_row(DoorStatus::Aktif, Some("Ani")))),
            DoorState::Ready {
                marked_by: Some("Ani".into())
            }
        );
    }

    #[test]
    fn test_dirty_cell_offers_mark_ready() {
        // Even on a blocked room, housekeeping can clear the dirty flag
        assert_eq!(
            free_cell_action(&room("Renovasi"), &DoorState::Dirty, true),
            FreeCellAction::MarkReady
        );
    }

    #[test]
    fn test_default_cell_bookable_only_when_room_active() {
        let active = room("Aktif");
        let blocked = room("Renovasi");
        assert_eq!(
            free_cell_action(&active, &DoorState::Default, true),
            FreeCellAction::CreateBooking
        );
        assert_eq!(
            free_cell_action(&blocked, &DoorState::Default, true),
            FreeCellAction::Blocked {
                reason: "Renovasi".into()
            }
        );
    }

    #[test]
    fn test_ready_cell_still_permits_booking() {
        let door = DoorState::Ready {
            marked_by: Some("Ani".into()),
        };
        assert_eq!(
            free_cell_action(&room("Aktif"), &door, true),
            FreeCellAction::CreateBooking
        );
    }

    #[test]
    fn test_without_capability_cell_is_static() {
        assert_eq!(
            free_cell_action(&room("Aktif"), &DoorState::Default, false),
            FreeCellAction::Blocked {
                reason: "read-only".into()
            }
        );
    }
}
