//! Activity Log Repository

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use shared::models::{ActivityEntry, ActivityLog};

use super::RepoResult;

const COLUMNS: &str =
    "id, store_id, action_type, entity_type, entity_id, description, actor_id, created_at";

pub async fn insert(
    pool: &SqlitePool,
    store_id: &str,
    actor_id: Option<&str>,
    entry: &ActivityEntry,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO activity_log (id, store_id, action_type, entity_type, entity_id,
                                   description, actor_id, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(store_id)
    .bind(&entry.action_type)
    .bind(&entry.entity_type)
    .bind(&entry.entity_id)
    .bind(&entry.description)
    .bind(actor_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_recent(
    pool: &SqlitePool,
    store_id: &str,
    entity_type: Option<&str>,
    entity_id: Option<&str>,
    limit: i64,
) -> RepoResult<Vec<ActivityLog>> {
    let rows = sqlx::query_as::<_, ActivityLog>(&format!(
        "SELECT {COLUMNS} FROM activity_log
         WHERE store_id = ?
           AND (? IS NULL OR entity_type = ?)
           AND (? IS NULL OR entity_id = ?)
         ORDER BY created_at DESC
         LIMIT ?"
    ))
    .bind(store_id)
    .bind(entity_type)
    .bind(entity_type)
    .bind(entity_id)
    .bind(entity_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
