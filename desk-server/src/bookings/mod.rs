//! Booking domain logic
//!
//! The status machine, the deposit gate it consults, and the desk search.
//! CRUD stays in the repository layer; everything here is the behavior
//! layered on top of it.

pub mod deposit_gate;
pub mod search;
pub mod transition;

pub use deposit_gate::GateDecision;
pub use transition::{TransitionRequest, execute as execute_transition, validate as validate_transition};
