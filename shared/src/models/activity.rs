//! Activity Log Model
//!
//! Best-effort audit trail. Writes never block the primary operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity log row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ActivityLog {
    pub id: String,
    pub store_id: String,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: String,
    pub description: String,
    pub actor_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for recording an activity entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: String,
    pub description: String,
}

impl ActivityEntry {
    pub fn new(
        action_type: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            description: description.into(),
        }
    }
}
