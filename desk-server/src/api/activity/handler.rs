//! Activity log handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use shared::AppResult;
use shared::models::ActivityLog;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::activity;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 500;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/activity?entity_type=&entity_id=&limit=
pub async fn recent(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(params): Query<ActivityQuery>,
) -> AppResult<Json<Vec<ActivityLog>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let rows = activity::find_recent(
        &state.pool,
        &user.store_id,
        params.entity_type.as_deref(),
        params.entity_id.as_deref(),
        limit,
    )
    .await?;
    Ok(Json(rows))
}
