//! JWT token service
//!
//! Token generation, validation and the [`CurrentUser`] context injected
//! into request handlers. Every mutating operation requires an
//! authenticated actor; absence of a valid token is `NotAuthenticated`.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::models::Profile;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
}

impl JwtConfig {
    /// Load from environment; generates an ephemeral secret when JWT_SECRET
    /// is unset (sessions then do not survive a restart)
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, generating an ephemeral secret");
            generate_secret()
        });
        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "desk-server".to_string()),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: generate_secret(),
            expiration_minutes: 1440,
            issuer: "desk-server".to_string(),
        }
    }
}

fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// JWT claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Profile id (subject)
    pub sub: String,
    pub email: String,
    /// Display name, used for actor stamps
    pub name: String,
    pub role: String,
    /// Store partition the profile belongs to
    pub store_id: String,
    /// Expiry timestamp
    pub exp: i64,
    /// Issued-at timestamp
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token has expired")]
    ExpiredToken,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Failed to encode token: {0}")]
    EncodingError(String),
}

/// JWT token service
#[derive(Debug)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generate a token for an authenticated profile
    pub fn generate_token(&self, profile: &Profile) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: profile.id.clone(),
            email: profile.email.clone(),
            name: profile.display_name.clone(),
            role: profile.role.clone(),
            store_id: profile.store_id.clone(),
            exp: (now + Duration::minutes(self.config.expiration_minutes)).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// Extract the bearer token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new(JwtConfig::default())
    }
}

/// Current user context, parsed from JWT claims
///
/// Created by the auth middleware and injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    /// Display name stamped onto bookings and status rows
    pub display_name: String,
    pub role: String,
    pub store_id: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            display_name: claims.name,
            role: claims.role,
            store_id: claims.store_id,
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Whether this user may create bookings and commit status transitions
    ///
    /// `viewer` profiles get the read-only dashboard.
    pub fn can_edit(&self) -> bool {
        self.role != "viewer"
    }

    /// Guard for mutating handlers
    pub fn require_can_edit(&self) -> shared::AppResult<()> {
        if self.can_edit() {
            Ok(())
        } else {
            Err(shared::AppError::permission_denied(
                "This account is read-only",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: "p1".into(),
            store_id: "s1".into(),
            email: "desk@losmen.local".into(),
            display_name: "Desk".into(),
            password_hash: String::new(),
            role: "staff".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let service = JwtService::default();
        let token = service.generate_token(&profile()).unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "p1");
        assert_eq!(claims.store_id, "s1");
        let user = CurrentUser::from(claims);
        assert!(user.can_edit());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = JwtService::default();
        assert!(matches!(
            service.validate_token("not-a-token"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }

    #[test]
    fn test_viewer_is_read_only() {
        let user = CurrentUser {
            id: "p2".into(),
            email: "viewer@losmen.local".into(),
            display_name: "Viewer".into(),
            role: "viewer".into(),
            store_id: "s1".into(),
        };
        assert!(user.require_can_edit().is_err());
    }
}
