//! Database Module
//!
//! SQLite connection pool, embedded migrations, and first-run seeding.

pub mod repository;

use std::str::FromStr;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use uuid::Uuid;

use shared::AppError;

use crate::core::Config;

/// Database service - owns the SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open the database with WAL mode and run migrations
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        // busy_timeout: wait up to 5s on write contention instead of failing
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to set busy_timeout: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    /// Open an in-memory database (tests)
    pub async fn new_in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::database(e.to_string()))?
            .pragma("foreign_keys", "ON");

        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

/// Seed the default admin profile when the profile table is empty
///
/// The password comes from `DEFAULT_ADMIN_PASSWORD`; outside production a
/// well-known fallback is used so a fresh checkout is immediately usable.
pub async fn seed_default_admin(pool: &SqlitePool, config: &Config) -> Result<(), AppError> {
    let count = repository::profile::count(pool)
        .await
        .map_err(AppError::from)?;
    if count > 0 {
        return Ok(());
    }

    let password = match (&config.default_admin_password, config.is_production()) {
        (Some(p), _) => p.clone(),
        (None, true) => {
            tracing::warn!("No profiles and DEFAULT_ADMIN_PASSWORD unset; skipping admin seed");
            return Ok(());
        }
        (None, false) => {
            tracing::warn!("Seeding default admin with development password");
            "losmen".to_string()
        }
    };

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?
        .to_string();

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO profile (id, store_id, email, display_name, password_hash, role, created_at)
         VALUES (?, ?, ?, ?, ?, 'admin', ?)",
    )
    .bind(&id)
    .bind(&config.store_id)
    .bind(&config.default_admin_email)
    .bind("Administrator")
    .bind(&password_hash)
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| AppError::database(format!("Failed to seed admin profile: {e}")))?;

    tracing::info!(email = %config.default_admin_email, "Seeded default admin profile");
    Ok(())
}
