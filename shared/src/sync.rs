//! Realtime sync payloads
//!
//! The desk server broadcasts a [`SyncEvent`] after every committed mutation.
//! Events are change *signals*: no delta guarantee is made, clients must
//! refetch the named resource rather than trust `data`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Change type carried by a sync event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// Resource change notification
///
/// `version` increases monotonically per resource so clients can discard
/// out-of-order or already-seen signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEvent {
    /// Resource name ("room", "booking", "room_daily_status", "room_deposit",
    /// "display_preferences")
    pub resource: String,
    /// Per-resource monotonically increasing version
    pub version: u64,
    pub action: SyncAction,
    /// Id of the changed record
    pub id: String,
    /// Snapshot of the record, if cheap to include (never authoritative)
    pub data: Option<serde_json::Value>,
}
