//! Domain models for the Losmen PMS
//!
//! Each entity follows the same convention: the row struct (optionally
//! deriving `sqlx::FromRow` behind the `db` feature) plus create/update
//! payload structs consumed by the API layer.

pub mod activity;
pub mod booking;
pub mod deposit;
pub mod display_prefs;
pub mod profile;
pub mod room;
pub mod room_status;

pub use activity::{ActivityEntry, ActivityLog};
pub use booking::{Booking, BookingCreate, BookingStatus, BookingUpdate};
pub use deposit::{DepositCapture, DepositKind, DepositStatus, RoomDeposit};
pub use display_prefs::DisplayPreferences;
pub use profile::Profile;
pub use room::{Room, RoomCreate, RoomUpdate, ROOM_STATUS_ACTIVE};
pub use room_status::{DoorStatus, RoomDailyStatus, RoomDailyStatusUpsert};
