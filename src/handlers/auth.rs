use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use model::entities::{shop, user};
use sea_orm::{ActiveEnum, ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::auth::{issue_token, verify_password, AuthUser};
use crate::schemas::{ApiResponse, AppState};

/// Request body for logging in
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload: the bearer token plus the caller's identity
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfoResponse,
}

/// Current user info, as consumed by both web clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInfoResponse {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub shop_id: Option<i32>,
    pub shop_name: Option<String>,
}

/// Exchange username/password for a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, StatusCode> {
    debug!("Login attempt for username: {}", request.username);

    let account = match user::Entity::find()
        .filter(user::Column::Username.eq(request.username.as_str()))
        .one(&state.db)
        .await
    {
        Ok(Some(account)) => account,
        Ok(None) => {
            warn!("Login failed: unknown username '{}'", request.username);
            return Err(StatusCode::UNAUTHORIZED);
        }
        Err(db_error) => {
            error!("Failed to look up user '{}': {}", request.username, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if !verify_password(&request.password, &account.password_hash) {
        warn!("Login failed: bad password for '{}'", request.username);
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = issue_token(&state.auth, &account, Utc::now()).map_err(|e| {
        error!("Failed to issue token for '{}': {}", request.username, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let shop_name = match account.shop_id {
        Some(shop_id) => shop::Entity::find_by_id(shop_id)
            .one(&state.db)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .map(|s| s.name),
        None => None,
    };

    info!("User '{}' logged in", account.username);
    let response = ApiResponse {
        data: LoginResponse {
            token,
            user: UserInfoResponse {
                id: account.id,
                username: account.username,
                role: account.role.to_value(),
                shop_id: account.shop_id,
                shop_name,
            },
        },
        message: "Login successful".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Current user's information including role and shop
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "User info retrieved successfully", body = ApiResponse<UserInfoResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn me(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserInfoResponse>>, StatusCode> {
    let shop_name = match user.shop_id {
        Some(shop_id) => shop::Entity::find_by_id(shop_id)
            .one(&state.db)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .map(|s| s.name),
        None => None,
    };

    let response = ApiResponse {
        data: UserInfoResponse {
            id: user.id,
            username: user.username,
            role: user.role.to_value(),
            shop_id: user.shop_id,
            shop_name,
        },
        message: "User info retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
