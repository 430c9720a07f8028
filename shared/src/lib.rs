//! Shared types for the Losmen PMS
//!
//! Common types used across the desk server and its clients: domain models,
//! error codes, response structures, and the realtime sync payloads.

pub mod error;
pub mod models;
pub mod sync;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use sync::{SyncAction, SyncEvent};
