//! Occupancy calendar core
//!
//! Pure functions deciding what every (room, date) cell of the 14-day grid
//! renders: a booking card spanning several columns, nothing (absorbed by an
//! earlier card), or a free cell colored by the door-status overlay.

mod overlay;
mod placement;
mod window;

pub use overlay::{DoorState, FreeCellAction, free_cell_action, resolve_door};
pub use placement::{Placement, resolve_cells};
pub use window::{QUERY_LOOKBACK_DAYS, VISIBLE_DAYS, lookback_start, visible_dates};
