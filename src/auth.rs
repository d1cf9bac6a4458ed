use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use model::entities::user::{self, Role};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::schemas::AppState;

/// JWT signing configuration. Secret is redacted from Debug output so it
/// never leaks into instrumented spans.
#[derive(Clone)]
pub struct AuthConfig {
    secret: String,
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_hours,
        }
    }

    /// Read the signing secret from `JWT_SECRET`; the fallback is for local
    /// development only.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using development default");
            "optistock-dev-secret".to_string()
        });
        let token_ttl_hours = std::env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);
        Self {
            secret,
            token_ttl_hours,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

/// Bearer token claims. `role` carries the wire value of [`Role`] so the
/// token stays readable to the web clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub shop_id: Option<i32>,
    pub exp: i64,
}

pub fn hash_password(plain: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string())
}

pub fn verify_password(plain: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub fn issue_token(
    config: &AuthConfig,
    account: &user::Model,
    now: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: account.id,
        username: account.username.clone(),
        role: account.role.to_value(),
        shop_id: account.shop_id,
        exp: (now + Duration::hours(config.token_ttl_hours)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

pub fn decode_token(
    config: &AuthConfig,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// The authenticated caller, extracted from the `Authorization: Bearer`
/// header. Rejects with 401 when the header is missing or the token is
/// invalid or expired.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub shop_id: Option<i32>,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let claims = decode_token(&state.auth, token).map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            StatusCode::UNAUTHORIZED
        })?;
        let role = Role::try_from_value(&claims.role).map_err(|_| StatusCode::UNAUTHORIZED)?;

        Ok(AuthUser {
            id: claims.sub,
            username: claims.username,
            role,
            shop_id: claims.shop_id,
        })
    }
}

/// Guard: the caller must hold the DISTRIBUTOR role.
#[derive(Debug, Clone)]
pub struct Distributor(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for Distributor {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Distributor {
            warn!(username = %user.username, "distributor-only endpoint denied");
            return Err(StatusCode::FORBIDDEN);
        }
        Ok(Distributor(user))
    }
}

/// Guard: the caller must hold the SHOP_OWNER role and be bound to a shop.
#[derive(Debug, Clone)]
pub struct ShopOwner {
    pub user: AuthUser,
    pub shop_id: i32,
}

#[async_trait]
impl FromRequestParts<AppState> for ShopOwner {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::ShopOwner {
            warn!(username = %user.username, "shop-owner-only endpoint denied");
            return Err(StatusCode::FORBIDDEN);
        }
        let shop_id = user.shop_id.ok_or_else(|| {
            warn!(username = %user.username, "shop owner account has no shop bound");
            StatusCode::FORBIDDEN
        })?;
        Ok(ShopOwner { user, shop_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: Role, shop_id: Option<i32>) -> user::Model {
        user::Model {
            id: 7,
            username: "maria".to_string(),
            password_hash: String::new(),
            email: "maria@example.com".to_string(),
            is_staff: false,
            is_superuser: false,
            role,
            shop_id,
        }
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("pa55word!").unwrap();
        assert_ne!(hash, "pa55word!");
        assert!(verify_password("pa55word!", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("pa55word!", "not-a-phc-string"));
    }

    #[test]
    fn token_roundtrip_preserves_claims() {
        let config = AuthConfig::new("test-secret", 24);
        let token = issue_token(&config, &account(Role::ShopOwner, Some(3)), Utc::now()).unwrap();

        let claims = decode_token(&config, &token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "maria");
        assert_eq!(claims.role, "SHOP_OWNER");
        assert_eq!(claims.shop_id, Some(3));
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = AuthConfig::new("test-secret", 24);
        let issued_long_ago = Utc::now() - Duration::hours(48);
        let token = issue_token(&config, &account(Role::Distributor, None), issued_long_ago)
            .unwrap();
        assert!(decode_token(&config, &token).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = AuthConfig::new("test-secret", 24);
        let token = issue_token(&config, &account(Role::Distributor, None), Utc::now()).unwrap();
        let other = AuthConfig::new("other-secret", 24);
        assert!(decode_token(&other, &token).is_err());
    }
}
