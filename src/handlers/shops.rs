use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::Utc;
use model::entities::{shop, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{hash_password, Distributor};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a shop together with its owner's login
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateShopRequest {
    pub name: String,
    pub address: String,
    pub owner_name: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    /// Username for the shop owner's account
    pub username: String,
    /// Password for the shop owner's account
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    pub confirm_password: String,
}

/// Request body for updating a shop
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateShopRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub owner_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Shop response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShopResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub created_at: chrono::NaiveDateTime,
    /// Number of user accounts attached to this shop
    pub user_count: u64,
}

impl ShopResponse {
    fn from_model(model: shop::Model, user_count: u64) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            owner_name: model.owner_name,
            phone: model.phone,
            email: model.email,
            created_at: model.created_at,
            user_count,
        }
    }
}

/// Create a new shop along with its owner user account
#[utoipa::path(
    post,
    path = "/api/v1/shops",
    tag = "shops",
    request_body = CreateShopRequest,
    responses(
        (status = 201, description = "Shop and user account created successfully", body = ApiResponse<ShopResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Distributor role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn create_shop(
    Distributor(actor): Distributor,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateShopRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<ShopResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Creating shop '{}' with owner account '{}'",
        request.name, request.username
    );

    if request.password != request.confirm_password {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Passwords do not match".to_string(),
                code: "PASSWORD_MISMATCH".to_string(),
                success: false,
            }),
        ));
    }

    let password_hash = hash_password(&request.password).map_err(|e| {
        error!("Failed to hash password for '{}': {}", request.username, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal server error while creating shop".to_string(),
                code: "PASSWORD_HASH_ERROR".to_string(),
                success: false,
            }),
        )
    })?;

    // Shop and owner account are created together or not at all
    let now = Utc::now().naive_utc();
    let result = async {
        let txn = state.db.begin().await?;

        let created_shop = shop::ActiveModel {
            name: Set(request.name.clone()),
            address: Set(request.address.clone()),
            owner_name: Set(request.owner_name.clone().unwrap_or_default()),
            phone: Set(request.phone.clone().unwrap_or_default()),
            email: Set(request.email.clone()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        user::ActiveModel {
            username: Set(request.username.clone()),
            password_hash: Set(password_hash),
            email: Set(request.email.clone()),
            is_staff: Set(false),
            is_superuser: Set(false),
            role: Set(user::Role::ShopOwner),
            shop_id: Set(Some(created_shop.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok::<shop::Model, DbErr>(created_shop)
    }
    .await;

    match result {
        Ok(created_shop) => {
            info!(
                "Shop '{}' created with ID {} and owner account '{}'",
                created_shop.name, created_shop.id, request.username
            );
            let response = ApiResponse {
                data: ShopResponse::from_model(created_shop, 1),
                message: "Shop and user account created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create shop '{}': {}", request.name, db_error);
            let message = db_error.to_string().to_lowercase();
            let error_response = if message.contains("unique") || message.contains("constraint") {
                ErrorResponse {
                    error: format!("Username '{}' already exists", request.username),
                    code: "USERNAME_ALREADY_EXISTS".to_string(),
                    success: false,
                }
            } else {
                ErrorResponse {
                    error: "Internal server error while creating shop".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }
            };
            Err((StatusCode::BAD_REQUEST, Json(error_response)))
        }
    }
}

/// Get all shops
#[utoipa::path(
    get,
    path = "/api/v1/shops",
    tag = "shops",
    responses(
        (status = 200, description = "Shops retrieved successfully", body = ApiResponse<Vec<ShopResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_shops(
    Distributor(_actor): Distributor,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ShopResponse>>>, StatusCode> {
    let shops = match shop::Entity::find().all(&state.db).await {
        Ok(shops) => shops,
        Err(db_error) => {
            error!("Failed to retrieve shops: {}", db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Count attached accounts per shop in one pass
    let users = user::Entity::find()
        .filter(user::Column::ShopId.is_not_null())
        .all(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let mut counts = std::collections::HashMap::new();
    for account in users {
        if let Some(shop_id) = account.shop_id {
            *counts.entry(shop_id).or_insert(0u64) += 1;
        }
    }

    let shop_count = shops.len();
    let responses: Vec<ShopResponse> = shops
        .into_iter()
        .map(|s| {
            let user_count = counts.get(&s.id).copied().unwrap_or(0);
            ShopResponse::from_model(s, user_count)
        })
        .collect();

    info!("Successfully retrieved {} shops", shop_count);
    Ok(Json(ApiResponse {
        data: responses,
        message: "Shops retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific shop by ID
#[utoipa::path(
    get,
    path = "/api/v1/shops/{shop_id}",
    tag = "shops",
    params(("shop_id" = i32, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop retrieved successfully", body = ApiResponse<ShopResponse>),
        (status = 404, description = "Shop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_shop(
    Distributor(_actor): Distributor,
    Path(shop_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ShopResponse>>, StatusCode> {
    match shop::Entity::find_by_id(shop_id).one(&state.db).await {
        Ok(Some(shop_model)) => {
            let user_count = user::Entity::find()
                .filter(user::Column::ShopId.eq(shop_id))
                .all(&state.db)
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
                .len() as u64;
            Ok(Json(ApiResponse {
                data: ShopResponse::from_model(shop_model, user_count),
                message: "Shop retrieved successfully".to_string(),
                success: true,
            }))
        }
        Ok(None) => {
            warn!("Shop with ID {} not found", shop_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve shop with ID {}: {}", shop_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a shop
#[utoipa::path(
    put,
    path = "/api/v1/shops/{shop_id}",
    tag = "shops",
    params(("shop_id" = i32, Path, description = "Shop ID")),
    request_body = UpdateShopRequest,
    responses(
        (status = 200, description = "Shop updated successfully", body = ApiResponse<ShopResponse>),
        (status = 404, description = "Shop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn update_shop(
    Distributor(_actor): Distributor,
    Path(shop_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateShopRequest>,
) -> Result<Json<ApiResponse<ShopResponse>>, StatusCode> {
    let existing = match shop::Entity::find_by_id(shop_id).one(&state.db).await {
        Ok(Some(shop_model)) => shop_model,
        Ok(None) => {
            warn!("Shop with ID {} not found for update", shop_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to look up shop {} for update: {}", shop_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: shop::ActiveModel = existing.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(address) = request.address {
        active.address = Set(address);
    }
    if let Some(owner_name) = request.owner_name {
        active.owner_name = Set(owner_name);
    }
    if let Some(phone) = request.phone {
        active.phone = Set(phone);
    }
    if let Some(email) = request.email {
        active.email = Set(email);
    }

    match active.update(&state.db).await {
        Ok(updated) => {
            info!("Shop with ID {} updated successfully", shop_id);
            let user_count = user::Entity::find()
                .filter(user::Column::ShopId.eq(shop_id))
                .all(&state.db)
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
                .len() as u64;
            Ok(Json(ApiResponse {
                data: ShopResponse::from_model(updated, user_count),
                message: "Shop updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update shop with ID {}: {}", shop_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a shop
#[utoipa::path(
    delete,
    path = "/api/v1/shops/{shop_id}",
    tag = "shops",
    params(("shop_id" = i32, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Shop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_shop(
    Distributor(_actor): Distributor,
    Path(shop_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match shop::Entity::delete_by_id(shop_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Shop with ID {} deleted successfully", shop_id);
                Ok(Json(ApiResponse {
                    data: format!("Shop {} deleted", shop_id),
                    message: "Shop deleted successfully".to_string(),
                    success: true,
                }))
            } else {
                warn!("Shop with ID {} not found for deletion", shop_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete shop with ID {}: {}", shop_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
