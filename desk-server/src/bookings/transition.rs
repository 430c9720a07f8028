//! Booking status machine
//!
//! States: BO (initial) → CI → CO, with BATAL reachable from BO and CI.
//! CO and BATAL are terminal. Each transition's actor stamp and
//! room-daily-status side effect are declared in one table so the table,
//! not branches scattered across handlers, is the single source of truth.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use shared::models::{
    ActivityEntry, Booking, BookingStatus, DepositCapture, DoorStatus,
};
use shared::sync::SyncAction;
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::bookings::deposit_gate::{self, GateDecision};
use crate::core::ServerState;
use crate::db::repository::booking::StampKind;
use crate::db::repository::{booking, deposit, room_status};

/// Room-daily-status side effect a transition triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatusEffect {
    /// No status write
    None,
    /// Upsert (room, booking date) = `Aktif`: a cancelled booking never
    /// soiled the room, skip the dirty step entirely
    MarkReadyAtBookingDate,
    /// Upsert (room, today's actual date) = `Kotor`: cleaning happens in
    /// real time regardless of which night is displayed
    MarkDirtyToday,
}

/// One row of the transition table
#[derive(Debug)]
pub struct TransitionSpec {
    pub target: BookingStatus,
    pub allowed_from: &'static [BookingStatus],
    /// Actor stamp written with the status
    pub stamp: Option<StampKind>,
    pub room_status: RoomStatusEffect,
}

/// The allowed transitions and their declared side effects
pub const TRANSITIONS: &[TransitionSpec] = &[
    // BO confirm: re-stamp without leaving BO
    TransitionSpec {
        target: BookingStatus::Bo,
        allowed_from: &[BookingStatus::Bo],
        stamp: Some(StampKind::Confirmed),
        room_status: RoomStatusEffect::None,
    },
    TransitionSpec {
        target: BookingStatus::Ci,
        allowed_from: &[BookingStatus::Bo],
        stamp: Some(StampKind::CheckedIn),
        room_status: RoomStatusEffect::None,
    },
    TransitionSpec {
        target: BookingStatus::Co,
        allowed_from: &[BookingStatus::Ci],
        stamp: Some(StampKind::CheckedOut),
        room_status: RoomStatusEffect::MarkDirtyToday,
    },
    TransitionSpec {
        target: BookingStatus::Batal,
        allowed_from: &[BookingStatus::Bo, BookingStatus::Ci],
        stamp: None,
        room_status: RoomStatusEffect::MarkReadyAtBookingDate,
    },
];

/// Look up the table row for a target status and validate it against the
/// current status
pub fn validate(current: BookingStatus, target: BookingStatus) -> AppResult<&'static TransitionSpec> {
    if current.is_terminal() {
        return Err(AppError::with_message(
            ErrorCode::BookingTerminal,
            format!("No transition out of {current}"),
        ));
    }
    let spec = TRANSITIONS
        .iter()
        .find(|t| t.target == target)
        .ok_or_else(|| AppError::invalid_transition(format!("Unknown target status {target}")))?;
    if !spec.allowed_from.contains(&current) {
        return Err(AppError::invalid_transition(format!(
            "Transition {current} → {target} is not allowed"
        )));
    }
    Ok(spec)
}

/// Transition request payload
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRequest {
    pub target: BookingStatus,
    /// Deposit captured in the check-in side flow, when the gate asked for it
    pub deposit: Option<DepositCapture>,
    /// Acknowledges the deposit-return step on checkout
    #[serde(default)]
    pub return_deposit: bool,
}

/// Execute a status transition with its declared side effects
///
/// The booking update and its side-effect writes share one transaction, so
/// a failure commits nothing user-visible. The deposit gate is evaluated
/// before any write: a blocked transition surfaces `DepositRequired` and
/// leaves the booking untouched. `today` is the actual calendar date, which
/// the CO dirty-stamp uses instead of the booking's own date.
pub async fn execute(
    state: &ServerState,
    user: &CurrentUser,
    booking_id: &str,
    req: TransitionRequest,
    today: NaiveDate,
) -> AppResult<Booking> {
    user.require_can_edit()?;

    let current = booking::find_by_id(&state.pool, &user.store_id, booking_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;

    let spec = validate(current.status, req.target)?;

    let active_deposit =
        deposit::find_active_by_room(&state.pool, &user.store_id, &current.room_id)
            .await
            .map_err(AppError::from)?;

    let gate = deposit_gate::evaluate(current.status, req.target, active_deposit.is_some());
    match gate {
        GateDecision::CaptureRequired if req.deposit.is_none() => {
            return Err(AppError::deposit_required(
                "Capture a deposit before check-in",
            )
            .with_detail("step", "capture"));
        }
        GateDecision::ReturnRequired if !req.return_deposit => {
            return Err(AppError::deposit_required(
                "Return the held deposit before checkout",
            )
            .with_detail("step", "return")
            .with_detail(
                "deposit_id",
                active_deposit.as_ref().map(|d| d.id.clone()).unwrap_or_default(),
            ));
        }
        _ => {}
    }

    let now = Utc::now();
    let mut tx = state.pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;

    // Capture first so a check-in never commits without its deposit
    let mut captured_deposit_id = None;
    if gate == GateDecision::CaptureRequired {
        if let Some(capture) = &req.deposit {
            let id = deposit::insert(
                &mut *tx,
                &user.store_id,
                &current.room_id,
                Some(&current.id),
                capture,
                &user.display_name,
                now,
            )
            .await
            .map_err(AppError::from)?;
            captured_deposit_id = Some(id);
        }
    }

    booking::apply_status(
        &mut *tx,
        &current.id,
        spec.target,
        spec.stamp.map(|kind| (kind, user.display_name.as_str(), now)),
    )
    .await
    .map_err(AppError::from)?;

    // Room-status side effects only after the primary update succeeded
    let status_write = match spec.room_status {
        RoomStatusEffect::None => None,
        RoomStatusEffect::MarkDirtyToday => Some((today, DoorStatus::Kotor)),
        RoomStatusEffect::MarkReadyAtBookingDate => Some((current.date, DoorStatus::Aktif)),
    };
    if let Some((date, status)) = status_write {
        room_status::upsert(
            &mut *tx,
            &user.store_id,
            &current.room_id,
            date,
            status,
            Some(&user.display_name),
            now,
        )
        .await
        .map_err(AppError::from)?;
    }

    if gate == GateDecision::ReturnRequired {
        deposit::close_active_for_room(
            &mut *tx,
            &user.store_id,
            &current.room_id,
            &user.display_name,
            now,
        )
        .await
        .map_err(AppError::from)?;
    }

    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    let updated = booking::find_by_id(&state.pool, &user.store_id, &current.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;

    state.log_activity(
        &user.store_id,
        Some(&user.id),
        ActivityEntry::new(
            format!("booking_{}", spec.target.as_str().to_lowercase()),
            "booking",
            &current.id,
            format!(
                "{} set booking {} to {}",
                user.display_name,
                current.bid.as_deref().unwrap_or(&current.id),
                spec.target
            ),
        ),
    );

    state.broadcast_sync("booking", SyncAction::Updated, &current.id, Some(&updated));
    if status_write.is_some() {
        state.broadcast_sync::<()>("room_daily_status", SyncAction::Updated, &current.room_id, None);
    }
    if let Some(id) = &captured_deposit_id {
        state.broadcast_sync::<()>("room_deposit", SyncAction::Created, id, None);
    } else if gate == GateDecision::ReturnRequired {
        state.broadcast_sync::<()>("room_deposit", SyncAction::Updated, &current.room_id, None);
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BookingCreate, DepositKind, RoomCreate};

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn test_state() -> ServerState {
        let config = crate::core::Config {
            work_dir: "./ignored".into(),
            http_port: 0,
            database_path: None,
            store_id: "s1".into(),
            jwt: crate::auth::JwtConfig::default(),
            environment: "development".into(),
            log_level: "info".into(),
            default_admin_email: "admin@losmen.local".into(),
            default_admin_password: Some("secret".into()),
        };
        ServerState::initialize_in_memory(&config).await.unwrap()
    }

    fn desk_user() -> CurrentUser {
        CurrentUser {
            id: "p1".into(),
            email: "desk@losmen.local".into(),
            display_name: "Desk".into(),
            role: "staff".into(),
            store_id: "s1".into(),
        }
    }

    async fn seed_booking(state: &ServerState, date: &str, duration: i64) -> Booking {
        let room = crate::db::repository::room::create(
            &state.pool,
            "s1",
            RoomCreate {
                name: format!("room-{}", uuid::Uuid::new_v4()),
                status: None,
                sort_order: None,
            },
        )
        .await
        .unwrap();
        booking::create(
            &state.pool,
            "s1",
            BookingCreate {
                room_id: room.id,
                date: d(date),
                duration,
                customer_name: "Guest".into(),
                phone: Some("081234567890".into()),
                bid: None,
                room_price: 150_000,
                total_price: 150_000 * duration,
                note: None,
            },
        )
        .await
        .unwrap()
    }

    fn capture_money() -> DepositCapture {
        DepositCapture {
            kind: DepositKind::Money,
            amount: Some(100_000),
            identity_desc: None,
        }
    }

    #[test]
    fn test_machine_closure() {
        use BookingStatus::*;
        assert!(validate(Bo, Ci).is_ok());
        assert!(validate(Bo, Batal).is_ok());
        assert!(validate(Bo, Bo).is_ok()); // confirm
        assert!(validate(Ci, Co).is_ok());
        assert!(validate(Ci, Batal).is_ok());

        assert_eq!(validate(Bo, Co).unwrap_err().code, ErrorCode::InvalidTransition);
        assert_eq!(validate(Ci, Bo).unwrap_err().code, ErrorCode::InvalidTransition);
        for from in [Co, Batal] {
            for target in [Bo, Ci, Co, Batal] {
                assert_eq!(
                    validate(from, target).unwrap_err().code,
                    ErrorCode::BookingTerminal
                );
            }
        }
    }

    #[tokio::test]
    async fn test_check_in_blocked_without_deposit() {
        let state = test_state().await;
        let b = seed_booking(&state, "2024-06-01", 3).await;
        let err = execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Ci,
                deposit: None,
                return_deposit: false,
            },
            d("2024-06-01"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DepositRequired);

        // Declining the gate leaves the booking completely unchanged
        let unchanged = booking::find_by_id(&state.pool, "s1", &b.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, BookingStatus::Bo);
        assert!(unchanged.checked_in_by.is_none());
    }

    #[tokio::test]
    async fn test_check_in_with_capture_commits_both() {
        let state = test_state().await;
        let b = seed_booking(&state, "2024-06-01", 3).await;
        let updated = execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Ci,
                deposit: Some(capture_money()),
                return_deposit: false,
            },
            d("2024-06-01"),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, BookingStatus::Ci);
        assert_eq!(updated.checked_in_by.as_deref(), Some("Desk"));
        assert!(updated.checked_in_at.is_some());

        let active = deposit::find_active_by_room(&state.pool, "s1", &b.room_id)
            .await
            .unwrap();
        assert!(active.is_some());
    }

    #[tokio::test]
    async fn test_existing_deposit_skips_capture() {
        let state = test_state().await;
        let b = seed_booking(&state, "2024-06-01", 2).await;
        deposit::insert(
            &state.pool,
            "s1",
            &b.room_id,
            None,
            &capture_money(),
            "Desk",
            Utc::now(),
        )
        .await
        .unwrap();

        // No deposit payload needed: the active deposit covers the stay
        let updated = execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Ci,
                deposit: None,
                return_deposit: false,
            },
            d("2024-06-01"),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, BookingStatus::Ci);
    }

    #[tokio::test]
    async fn test_checkout_writes_dirty_at_todays_date() {
        let state = test_state().await;
        let b = seed_booking(&state, "2024-06-01", 3).await;
        execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Ci,
                deposit: Some(capture_money()),
                return_deposit: false,
            },
            d("2024-06-01"),
        )
        .await
        .unwrap();

        // Checkout happens days later than the booking's own date
        let today = d("2024-06-04");
        let err = execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Co,
                deposit: None,
                return_deposit: false,
            },
            today,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DepositRequired);

        let updated = execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Co,
                deposit: None,
                return_deposit: true,
            },
            today,
        )
        .await
        .unwrap();
        assert_eq!(updated.status, BookingStatus::Co);

        // Kotor lands on today's actual date, not the booking's date
        let dirty = room_status::find_one(&state.pool, "s1", &b.room_id, today)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(dirty.status, DoorStatus::Kotor);
        assert!(
            room_status::find_one(&state.pool, "s1", &b.room_id, b.date)
                .await
                .unwrap()
                .is_none()
        );

        // The held deposit was returned
        assert!(
            deposit::find_active_by_room(&state.pool, "s1", &b.room_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_checkout_without_deposit_never_prompts() {
        let state = test_state().await;
        let b = seed_booking(&state, "2024-06-01", 1).await;
        execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Ci,
                deposit: Some(capture_money()),
                return_deposit: false,
            },
            d("2024-06-01"),
        )
        .await
        .unwrap();
        // Return the deposit out of band, then checkout must not prompt
        deposit::close_active_for_room(&state.pool, "s1", &b.room_id, "Desk", Utc::now())
            .await
            .unwrap();

        let updated = execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Co,
                deposit: None,
                return_deposit: false,
            },
            d("2024-06-02"),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, BookingStatus::Co);
    }

    #[tokio::test]
    async fn test_cancel_marks_room_ready_at_booking_date() {
        let state = test_state().await;
        let b = seed_booking(&state, "2024-03-10", 2).await;
        let updated = execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Batal,
                deposit: None,
                return_deposit: false,
            },
            d("2024-03-15"),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, BookingStatus::Batal);

        // Aktif at the booking's own date, and never a Kotor entry
        let row = room_status::find_one(&state.pool, "s1", &b.room_id, d("2024-03-10"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.status, DoorStatus::Aktif);
        assert!(
            room_status::find_one(&state.pool, "s1", &b.room_id, d("2024-03-15"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_terminal_booking_rejects_transitions() {
        let state = test_state().await;
        let b = seed_booking(&state, "2024-06-01", 1).await;
        execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Batal,
                deposit: None,
                return_deposit: false,
            },
            d("2024-06-01"),
        )
        .await
        .unwrap();

        let err = execute(
            &state,
            &desk_user(),
            &b.id,
            TransitionRequest {
                target: BookingStatus::Ci,
                deposit: Some(capture_money()),
                return_deposit: false,
            },
            d("2024-06-01"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::BookingTerminal);
    }

    #[tokio::test]
    async fn test_viewer_cannot_commit() {
        let state = test_state().await;
        let b = seed_booking(&state, "2024-06-01", 1).await;
        let viewer = CurrentUser {
            role: "viewer".into(),
            ..desk_user()
        };
        let err = execute(
            &state,
            &viewer,
            &b.id,
            TransitionRequest {
                target: BookingStatus::Batal,
                deposit: None,
                return_deposit: false,
            },
            d("2024-06-01"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }
}
