//! Booking Repository

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use shared::models::{Booking, BookingCreate, BookingStatus, BookingUpdate};

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, store_id, room_id, bid, date, duration, customer_name, phone, status, \
     room_price, total_price, note, confirmed_by, confirmed_at, checked_in_by, checked_in_at, \
     checked_out_by, checked_out_at, created_at, updated_at";

/// Which actor stamp a status change writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampKind {
    Confirmed,
    CheckedIn,
    CheckedOut,
}

impl StampKind {
    fn columns(&self) -> (&'static str, &'static str) {
        match self {
            Self::Confirmed => ("confirmed_by", "confirmed_at"),
            Self::CheckedIn => ("checked_in_by", "checked_in_at"),
            Self::CheckedOut => ("checked_out_by", "checked_out_at"),
        }
    }
}

pub async fn find_by_id(
    pool: &SqlitePool,
    store_id: &str,
    id: &str,
) -> RepoResult<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM booking WHERE store_id = ? AND id = ?"
    ))
    .bind(store_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(booking)
}

/// Fetch the non-terminal bookings whose occupied range intersects
/// `[window_start, window_end]`.
///
/// The SQL lower bound is widened by the caller's lookback so multi-night
/// bookings that started before the window are still caught; the exact
/// range-overlap filter runs on the fetched rows.
pub async fn find_overlapping(
    pool: &SqlitePool,
    store_id: &str,
    lookback_start: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> RepoResult<Vec<Booking>> {
    let rows = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM booking
         WHERE store_id = ? AND status IN ('BO', 'CI') AND date BETWEEN ? AND ?
         ORDER BY date, id"
    ))
    .bind(store_id)
    .bind(lookback_start)
    .bind(window_end)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .filter(|b| b.overlaps(window_start, window_end))
        .collect())
}

/// Whether a non-terminal booking already starts on (room_id, date)
pub async fn start_date_taken(
    pool: &SqlitePool,
    store_id: &str,
    room_id: &str,
    date: NaiveDate,
    exclude_id: Option<&str>,
) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM booking
         WHERE store_id = ? AND room_id = ? AND date = ?
           AND status IN ('BO', 'CI') AND id != COALESCE(?, '')",
    )
    .bind(store_id)
    .bind(room_id)
    .bind(date)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(
    pool: &SqlitePool,
    store_id: &str,
    data: BookingCreate,
) -> RepoResult<Booking> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO booking (id, store_id, room_id, bid, date, duration, customer_name, phone,
                              status, room_price, total_price, note, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'BO', ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(store_id)
    .bind(&data.room_id)
    .bind(&data.bid)
    .bind(data.date)
    .bind(data.duration)
    .bind(&data.customer_name)
    .bind(&data.phone)
    .bind(data.room_price)
    .bind(data.total_price)
    .bind(&data.note)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, store_id, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

pub async fn update(
    pool: &SqlitePool,
    store_id: &str,
    id: &str,
    data: BookingUpdate,
) -> RepoResult<Booking> {
    let rows = sqlx::query(
        "UPDATE booking SET
            room_id = COALESCE(?, room_id),
            date = COALESCE(?, date),
            duration = COALESCE(?, duration),
            customer_name = COALESCE(?, customer_name),
            phone = COALESCE(?, phone),
            bid = COALESCE(?, bid),
            room_price = COALESCE(?, room_price),
            total_price = COALESCE(?, total_price),
            note = COALESCE(?, note),
            updated_at = ?
         WHERE store_id = ? AND id = ?",
    )
    .bind(data.room_id)
    .bind(data.date)
    .bind(data.duration)
    .bind(data.customer_name)
    .bind(data.phone)
    .bind(data.bid)
    .bind(data.room_price)
    .bind(data.total_price)
    .bind(data.note)
    .bind(Utc::now())
    .bind(store_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    find_by_id(pool, store_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}

/// Hard delete. Irreversible; BATAL is the soft path.
pub async fn delete(pool: &SqlitePool, store_id: &str, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM booking WHERE store_id = ? AND id = ?")
        .bind(store_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Free-text search over reference code, customer name and phone
///
/// Scans the whole store, not the visible window. Case-insensitive for
/// ASCII (SQLite LIKE semantics), newest first.
pub async fn search(
    pool: &SqlitePool,
    store_id: &str,
    query: &str,
    limit: i64,
) -> RepoResult<Vec<Booking>> {
    let pattern = format!("%{}%", query);
    let rows = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM booking
         WHERE store_id = ?
           AND (bid LIKE ? OR customer_name LIKE ? OR phone LIKE ?)
         ORDER BY created_at DESC
         LIMIT ?"
    ))
    .bind(store_id)
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Apply a status change plus its actor stamp
///
/// Takes any SQLite executor so transition side effects can share one
/// transaction with this write.
pub async fn apply_status<'e, E>(
    exec: E,
    id: &str,
    status: BookingStatus,
    stamp: Option<(StampKind, &str, DateTime<Utc>)>,
) -> RepoResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let rows = match stamp {
        Some((kind, actor, at)) => {
            let (by_col, at_col) = kind.columns();
            sqlx::query(&format!(
                "UPDATE booking SET status = ?, {by_col} = ?, {at_col} = ?, updated_at = ?
                 WHERE id = ?"
            ))
            .bind(status)
            .bind(actor)
            .bind(at)
            .bind(Utc::now())
            .bind(id)
            .execute(exec)
            .await?
        }
        None => {
            sqlx::query("UPDATE booking SET status = ?, updated_at = ? WHERE id = ?")
                .bind(status)
                .bind(Utc::now())
                .bind(id)
                .execute(exec)
                .await?
        }
    };
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    Ok(())
}
