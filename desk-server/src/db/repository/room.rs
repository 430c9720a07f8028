//! Room Repository

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use shared::models::{ROOM_STATUS_ACTIVE, Room, RoomCreate, RoomUpdate};

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, store_id, name, status, sort_order, created_at";

pub async fn find_all(pool: &SqlitePool, store_id: &str) -> RepoResult<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(&format!(
        "SELECT {COLUMNS} FROM room WHERE store_id = ? ORDER BY sort_order, name"
    ))
    .bind(store_id)
    .fetch_all(pool)
    .await?;
    Ok(rooms)
}

pub async fn find_by_id(pool: &SqlitePool, store_id: &str, id: &str) -> RepoResult<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(&format!(
        "SELECT {COLUMNS} FROM room WHERE store_id = ? AND id = ?"
    ))
    .bind(store_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(room)
}

pub async fn create(pool: &SqlitePool, store_id: &str, data: RoomCreate) -> RepoResult<Room> {
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM room WHERE store_id = ? AND name = ?",
    )
    .bind(store_id)
    .bind(&data.name)
    .fetch_one(pool)
    .await?;
    if existing > 0 {
        return Err(RepoError::Duplicate(format!(
            "Room {} already exists",
            data.name
        )));
    }

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO room (id, store_id, name, status, sort_order, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(store_id)
    .bind(&data.name)
    .bind(data.status.as_deref().unwrap_or(ROOM_STATUS_ACTIVE))
    .bind(data.sort_order.unwrap_or(0))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    find_by_id(pool, store_id, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room".into()))
}

pub async fn update(
    pool: &SqlitePool,
    store_id: &str,
    id: &str,
    data: RoomUpdate,
) -> RepoResult<Room> {
    let rows = sqlx::query(
        "UPDATE room SET
            name = COALESCE(?, name),
            status = COALESCE(?, status),
            sort_order = COALESCE(?, sort_order)
         WHERE store_id = ? AND id = ?",
    )
    .bind(data.name)
    .bind(data.status)
    .bind(data.sort_order)
    .bind(store_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    find_by_id(pool, store_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))
}

/// Delete a room. Refused while any non-terminal booking still references it.
pub async fn delete(pool: &SqlitePool, store_id: &str, id: &str) -> RepoResult<bool> {
    let open_bookings = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM booking WHERE room_id = ? AND status IN ('BO', 'CI')",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if open_bookings > 0 {
        return Err(RepoError::Validation(
            "Cannot delete a room with open bookings".into(),
        ));
    }
    let rows = sqlx::query("DELETE FROM room WHERE store_id = ? AND id = ?")
        .bind(store_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
