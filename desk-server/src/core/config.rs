use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// All items can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | WORK_DIR/losmen.db | SQLite database file |
/// | STORE_ID | default | Store partition new profiles are created under |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | tracing filter level |
/// | DEFAULT_ADMIN_EMAIL | admin@losmen.local | Seeded admin login |
/// | DEFAULT_ADMIN_PASSWORD | (none) | If set, seeds an admin on first run |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database path (overrides WORK_DIR/losmen.db when set)
    pub database_path: Option<String>,
    /// Store partition used when seeding the first admin profile
    pub store_id: String,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// tracing filter level
    pub log_level: String,
    /// Seeded admin login email
    pub default_admin_email: String,
    /// Seeded admin password; no admin is seeded when unset and a profile exists
    pub default_admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").ok(),
            store_id: std::env::var("STORE_ID").unwrap_or_else(|_| "default".into()),
            jwt: JwtConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            default_admin_email: std::env::var("DEFAULT_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@losmen.local".into()),
            default_admin_password: std::env::var("DEFAULT_ADMIN_PASSWORD").ok(),
        }
    }

    /// Resolved database file path
    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(&self.work_dir).join("losmen.db"),
        }
    }

    /// Log directory under the working directory
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Ensure the working directory structure exists
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
