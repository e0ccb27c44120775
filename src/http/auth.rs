//! JWT authentication for the REST API.
//!
//! Tokens are HS256-signed bearer tokens carrying the user's id, email and
//! role. Handlers opt into authentication through the [`AuthUser`] and
//! [`AdminUser`] extractors rather than middleware, so the requirement is
//! visible in each handler's signature.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AppError;
use super::state::AppState;
use crate::api::{UserAccount, UserId, UserRole};

/// Fallback signing secret for local development only.
const DEV_SECRET: &str = "salon-dev-secret-change-in-production";

/// Default token lifetime.
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 7;

/// Token signing configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC signing secret
    pub secret: String,
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    /// Read configuration from the environment.
    ///
    /// `JWT_SECRET` holds the signing secret (a development fallback is used
    /// when unset); `JWT_TTL_HOURS` overrides the token lifetime.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set; using development secret");
            DEV_SECRET.to_string()
        });
        let token_ttl_hours = std::env::var("JWT_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        Self {
            secret,
            token_ttl_hours,
        }
    }

    /// Configuration with an explicit secret (used by tests).
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub email: String,
    pub role: UserRole,
    /// Expiry as a Unix timestamp
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Issue a signed token for a user.
pub fn issue_token(config: &AuthConfig, user: &UserAccount) -> Result<String, AppError> {
    let expiry = Utc::now() + Duration::hours(config.token_ttl_hours);
    let claims = Claims {
        sub: user.id.value(),
        email: user.email.clone(),
        role: user.role,
        exp: expiry.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
}

/// Verify a token and return its claims.
pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("invalid or expired token".to_string()))
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;
    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("expected bearer token".to_string()))
}

/// Extractor for any authenticated user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_token(&state.auth, token)?;
        Ok(AuthUser(claims))
    }
}

/// Extractor for authenticated administrators.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if !claims.is_admin() {
            return Err(AppError::Forbidden(
                "only administrators may access this resource".to_string(),
            ));
        }
        Ok(AdminUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(role: UserRole) -> UserAccount {
        UserAccount {
            id: UserId::new(7),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            phone: "555-0100".to_string(),
            password_hash: "hash".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let config = AuthConfig::with_secret("unit-test-secret");
        let token = issue_token(&config, &test_user(UserRole::Admin)).unwrap();
        let claims = verify_token(&config, &token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "test@example.com");
        assert!(claims.is_admin());
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let config = AuthConfig::with_secret("secret-a");
        let other = AuthConfig::with_secret("secret-b");
        let token = issue_token(&config, &test_user(UserRole::Client)).unwrap();
        assert!(verify_token(&other, &token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let config = AuthConfig::with_secret("unit-test-secret");
        let mut token = issue_token(&config, &test_user(UserRole::Client)).unwrap();
        token.push('x');
        assert!(verify_token(&config, &token).is_err());
    }
}
