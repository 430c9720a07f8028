//! Display preferences handlers
//!
//! One JSON document per store. Saving broadcasts so every open dashboard
//! restyles without a reload.

use axum::{Json, extract::State};

use shared::AppResult;
use shared::models::DisplayPreferences;
use shared::sync::SyncAction;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::display_prefs;

const RESOURCE: &str = "display_preferences";

/// GET /api/settings/display
pub async fn get_prefs(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<DisplayPreferences>> {
    let prefs = display_prefs::get(&state.pool, &user.store_id).await?;
    Ok(Json(prefs))
}

/// PUT /api/settings/display
pub async fn put_prefs(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<DisplayPreferences>,
) -> AppResult<Json<DisplayPreferences>> {
    user.require_can_edit()?;
    display_prefs::put(&state.pool, &user.store_id, &payload).await?;
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &user.store_id, Some(&payload));
    Ok(Json(payload))
}
