//! Profile Repository

use sqlx::SqlitePool;

use shared::models::Profile;

use super::RepoResult;

const COLUMNS: &str = "id, store_id, email, display_name, password_hash, role, created_at";

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profile")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Profile>> {
    let profile =
        sqlx::query_as::<_, Profile>(&format!("SELECT {COLUMNS} FROM profile WHERE email = ?"))
            .bind(email)
            .fetch_optional(pool)
            .await?;
    Ok(profile)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Profile>> {
    let profile =
        sqlx::query_as::<_, Profile>(&format!("SELECT {COLUMNS} FROM profile WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(profile)
}
