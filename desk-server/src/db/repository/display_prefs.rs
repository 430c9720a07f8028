//! Display Preferences Repository
//!
//! One JSON blob per store. A missing or unreadable row falls back to the
//! defaults rather than failing the dashboard.

use chrono::Utc;
use sqlx::SqlitePool;

use shared::models::DisplayPreferences;

use super::RepoResult;

pub async fn get(pool: &SqlitePool, store_id: &str) -> RepoResult<DisplayPreferences> {
    let raw = sqlx::query_scalar::<_, String>(
        "SELECT calendar FROM display_preferences WHERE store_id = ?",
    )
    .bind(store_id)
    .fetch_optional(pool)
    .await?;

    Ok(match raw {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Unreadable display preferences, using defaults: {}", e);
            DisplayPreferences::default()
        }),
        None => DisplayPreferences::default(),
    })
}

pub async fn put(
    pool: &SqlitePool,
    store_id: &str,
    prefs: &DisplayPreferences,
) -> RepoResult<()> {
    let json = serde_json::to_string(prefs)
        .map_err(|e| super::RepoError::Validation(format!("Unserializable preferences: {e}")))?;
    sqlx::query(
        "INSERT INTO display_preferences (store_id, calendar, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT (store_id) DO UPDATE SET
            calendar = excluded.calendar,
            updated_at = excluded.updated_at",
    )
    .bind(store_id)
    .bind(json)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}
