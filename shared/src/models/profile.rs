//! Profile Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Staff profile, used for login and actor-name lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Profile {
    pub id: String,
    pub store_id: String,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
