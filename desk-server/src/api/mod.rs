//! API routes
//!
//! One module per resource, each exposing a `router()` merged by the server.
//!
//! - [`health`] - liveness check
//! - [`auth`] - login and session info
//! - [`rooms`] - room management
//! - [`bookings`] - booking CRUD, status transitions, search
//! - [`calendar`] - the occupancy grid
//! - [`room_status`] - per-day housekeeping overrides
//! - [`deposits`] - room deposit capture and return
//! - [`settings`] - calendar display preferences
//! - [`activity`] - audit trail

pub mod activity;
pub mod auth;
pub mod bookings;
pub mod calendar;
pub mod deposits;
pub mod health;
pub mod room_status;
pub mod rooms;
pub mod settings;
