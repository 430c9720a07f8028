//! Room Daily Status Repository
//!
//! Rows are keyed by (room_id, date) and upserted last-writer-wins; there is
//! deliberately no version check (see DESIGN.md on StateConflict).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use shared::models::{DoorStatus, RoomDailyStatus};

use super::RepoResult;

const COLUMNS: &str = "id, store_id, room_id, date, status, updated_by, updated_at";

pub async fn find_range(
    pool: &SqlitePool,
    store_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> RepoResult<Vec<RoomDailyStatus>> {
    let rows = sqlx::query_as::<_, RoomDailyStatus>(&format!(
        "SELECT {COLUMNS} FROM room_daily_status
         WHERE store_id = ? AND date BETWEEN ? AND ?
         ORDER BY room_id, date"
    ))
    .bind(store_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_one(
    pool: &SqlitePool,
    store_id: &str,
    room_id: &str,
    date: NaiveDate,
) -> RepoResult<Option<RoomDailyStatus>> {
    let row = sqlx::query_as::<_, RoomDailyStatus>(&format!(
        "SELECT {COLUMNS} FROM room_daily_status
         WHERE store_id = ? AND room_id = ? AND date = ?"
    ))
    .bind(store_id)
    .bind(room_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Upsert the status override for one room-day, last writer wins
pub async fn upsert<'e, E>(
    exec: E,
    store_id: &str,
    room_id: &str,
    date: NaiveDate,
    status: DoorStatus,
    updated_by: Option<&str>,
    updated_at: DateTime<Utc>,
) -> RepoResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO room_daily_status (id, store_id, room_id, date, status, updated_by, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT (room_id, date) DO UPDATE SET
            status = excluded.status,
            updated_by = excluded.updated_by,
            updated_at = excluded.updated_at",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(store_id)
    .bind(room_id)
    .bind(date)
    .bind(status)
    .bind(updated_by)
    .bind(updated_at)
    .execute(exec)
    .await?;
    Ok(())
}
