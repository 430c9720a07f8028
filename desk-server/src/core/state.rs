use std::sync::Arc;

use serde::Serialize;
use sqlx::SqlitePool;

use shared::models::ActivityEntry;
use shared::sync::SyncAction;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{self, DbService};
use crate::sync::SyncBus;

/// Server state - shared handles for all services
///
/// Cloning is shallow: the pool and the service handles are internally
/// reference counted.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT authentication service
    pub jwt_service: Arc<JwtService>,
    /// Realtime change feed
    pub sync: Arc<SyncBus>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            pool,
            jwt_service,
            sync: Arc::new(SyncBus::new()),
        }
    }

    /// Initialize server state
    ///
    /// 1. Ensure the working directory exists
    /// 2. Open the database (migrations run here)
    /// 3. Seed the default admin profile if the profile table is empty
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir()?;

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy()).await?;
        db::seed_default_admin(&db.pool, config).await?;

        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));

        Ok(Self::new(config.clone(), db.pool, jwt_service))
    }

    /// Initialize against an in-memory database (tests)
    pub async fn initialize_in_memory(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::new_in_memory().await?;
        db::seed_default_admin(&db.pool, config).await?;
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        Ok(Self::new(config.clone(), db.pool, jwt_service))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Broadcast a resource change to all connected clients
    ///
    /// Booking changes are debounced inside the bus; everything else is
    /// flushed immediately.
    pub fn broadcast_sync<T: Serialize>(
        &self,
        resource: &str,
        action: SyncAction,
        id: &str,
        data: Option<&T>,
    ) {
        let data = data.and_then(|d| serde_json::to_value(d).ok());
        self.sync.publish(resource, action, id, data);
    }

    /// Record an activity-log entry, best effort
    ///
    /// Audit writes never block or fail the primary operation; a failed
    /// insert is logged and dropped.
    pub fn log_activity(&self, store_id: &str, actor_id: Option<&str>, entry: ActivityEntry) {
        let pool = self.pool.clone();
        let store_id = store_id.to_string();
        let actor_id = actor_id.map(|s| s.to_string());
        tokio::spawn(async move {
            if let Err(e) =
                db::repository::activity::insert(&pool, &store_id, actor_id.as_deref(), &entry)
                    .await
            {
                tracing::warn!("Activity log write failed: {}", e);
            }
        });
    }
}
