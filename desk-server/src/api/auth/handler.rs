//! Authentication handlers

use std::time::Duration;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use shared::{AppError, AppResult};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::profile;

/// Fixed delay on every login attempt, so response time does not reveal
/// whether the email exists
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub store_id: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let found = profile::find_by_email(&state.pool, &req.email)
        .await
        .map_err(AppError::from)?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Same error for unknown email and wrong password
    let account = match found {
        Some(p) => p,
        None => {
            tracing::warn!(email = %req.email, "Login failed, unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    let hash = PasswordHash::new(&account.password_hash)
        .map_err(|e| AppError::internal(format!("Corrupt password hash: {e}")))?;
    if Argon2::default()
        .verify_password(req.password.as_bytes(), &hash)
        .is_err()
    {
        tracing::warn!(email = %req.email, "Login failed, wrong password");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(&account)
        .map_err(|e| AppError::internal(e.to_string()))?;

    tracing::info!(email = %account.email, "Login");
    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: account.id,
            email: account.email,
            display_name: account.display_name,
            role: account.role,
            store_id: account.store_id,
        },
    }))
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> Json<UserInfo> {
    Json(UserInfo {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
        role: user.role,
        store_id: user.store_id,
    })
}
