//! Losmen Desk Server - PMS edge node for short-stay room rentals
//!
//! # Module structure
//!
//! ```text
//! desk-server/src/
//! ├── core/          # Config, state, server bootstrap
//! ├── auth/          # JWT authentication
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── calendar/      # Date window, booking placement, door-status overlay
//! ├── bookings/      # Status machine, deposit gate, search
//! ├── sync/          # Realtime change feed (WebSocket broadcast)
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Logger, date helpers
//! ```

pub mod api;
pub mod auth;
pub mod bookings;
pub mod calendar;
pub mod core;
pub mod db;
pub mod sync;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use sync::SyncBus;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

pub fn print_banner() {
    println!(
        r#"
    __
   / /   ____  _________ ___  ___  ____
  / /   / __ \/ ___/ __ `__ \/ _ \/ __ \
 / /___/ /_/ (__  ) / / / / /  __/ / / /
/_____/\____/____/_/ /_/ /_/\___/_/ /_/
        desk server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
