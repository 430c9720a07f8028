//! Room Deposit Repository
//!
//! Deposits are associated with the room; the UI assumes at most one active
//! row per room and queries take the most recent.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use shared::models::{DepositCapture, RoomDeposit};

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, store_id, room_id, booking_id, kind, amount, identity_desc, status, \
     taken_by, taken_at, returned_by, returned_at";

pub async fn find_by_id(
    pool: &SqlitePool,
    store_id: &str,
    id: &str,
) -> RepoResult<Option<RoomDeposit>> {
    let row = sqlx::query_as::<_, RoomDeposit>(&format!(
        "SELECT {COLUMNS} FROM room_deposit WHERE store_id = ? AND id = ?"
    ))
    .bind(store_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Most recent active deposit for a room, if any
pub async fn find_active_by_room(
    pool: &SqlitePool,
    store_id: &str,
    room_id: &str,
) -> RepoResult<Option<RoomDeposit>> {
    let row = sqlx::query_as::<_, RoomDeposit>(&format!(
        "SELECT {COLUMNS} FROM room_deposit
         WHERE store_id = ? AND room_id = ? AND status = 'active'
         ORDER BY taken_at DESC
         LIMIT 1"
    ))
    .bind(store_id)
    .bind(room_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Record a captured deposit
pub async fn insert<'e, E>(
    exec: E,
    store_id: &str,
    room_id: &str,
    booking_id: Option<&str>,
    capture: &DepositCapture,
    taken_by: &str,
    taken_at: DateTime<Utc>,
) -> RepoResult<String>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO room_deposit (id, store_id, room_id, booking_id, kind, amount,
                                   identity_desc, status, taken_by, taken_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, 'active', ?, ?)",
    )
    .bind(&id)
    .bind(store_id)
    .bind(room_id)
    .bind(booking_id)
    .bind(capture.kind)
    .bind(capture.amount)
    .bind(&capture.identity_desc)
    .bind(taken_by)
    .bind(taken_at)
    .execute(exec)
    .await?;
    Ok(id)
}

/// Close one deposit by id
pub async fn close<'e, E>(
    exec: E,
    id: &str,
    returned_by: &str,
    returned_at: DateTime<Utc>,
) -> RepoResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE room_deposit SET status = 'returned', returned_by = ?, returned_at = ?
         WHERE id = ? AND status = 'active'",
    )
    .bind(returned_by)
    .bind(returned_at)
    .bind(id)
    .execute(exec)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Active deposit {id} not found")));
    }
    Ok(())
}

/// Close every active deposit on a room (checkout return step)
pub async fn close_active_for_room<'e, E>(
    exec: E,
    store_id: &str,
    room_id: &str,
    returned_by: &str,
    returned_at: DateTime<Utc>,
) -> RepoResult<u64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE room_deposit SET status = 'returned', returned_by = ?, returned_at = ?
         WHERE store_id = ? AND room_id = ? AND status = 'active'",
    )
    .bind(returned_by)
    .bind(returned_at)
    .bind(store_id)
    .bind(room_id)
    .execute(exec)
    .await?;
    Ok(rows.rows_affected())
}
