use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::lens_type;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::auth::{AuthUser, Distributor};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a lens type
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateLensTypeRequest {
    pub name: String,
    pub description: Option<String>,
    pub price_modifier: Option<Decimal>,
}

/// Request body for updating a lens type
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateLensTypeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_modifier: Option<Decimal>,
}

/// Lens type response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LensTypeResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_modifier: Decimal,
}

impl From<lens_type::Model> for LensTypeResponse {
    fn from(model: lens_type::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price_modifier: model.price_modifier,
        }
    }
}

/// Create a new lens type
#[utoipa::path(
    post,
    path = "/api/v1/lens-types",
    tag = "frames",
    request_body = CreateLensTypeRequest,
    responses(
        (status = 201, description = "Lens type created successfully", body = ApiResponse<LensTypeResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn create_lens_type(
    Distributor(_actor): Distributor,
    State(state): State<AppState>,
    Json(request): Json<CreateLensTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LensTypeResponse>>), StatusCode> {
    let new_lens_type = lens_type::ActiveModel {
        name: Set(request.name.clone()),
        description: Set(request.description.clone()),
        price_modifier: Set(request.price_modifier.unwrap_or(Decimal::ZERO)),
        ..Default::default()
    };

    match new_lens_type.insert(&state.db).await {
        Ok(model) => {
            info!("Lens type '{}' created with ID {}", model.name, model.id);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: LensTypeResponse::from(model),
                    message: "Lens type created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create lens type '{}': {}", request.name, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all lens types
#[utoipa::path(
    get,
    path = "/api/v1/lens-types",
    tag = "frames",
    responses(
        (status = 200, description = "Lens types retrieved successfully", body = ApiResponse<Vec<LensTypeResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_lens_types(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LensTypeResponse>>>, StatusCode> {
    match lens_type::Entity::find()
        .order_by_asc(lens_type::Column::Name)
        .all(&state.db)
        .await
    {
        Ok(lens_types) => Ok(Json(ApiResponse {
            data: lens_types.into_iter().map(LensTypeResponse::from).collect(),
            message: "Lens types retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!("Failed to retrieve lens types: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a lens type
#[utoipa::path(
    put,
    path = "/api/v1/lens-types/{lens_type_id}",
    tag = "frames",
    params(("lens_type_id" = i32, Path, description = "Lens type ID")),
    request_body = UpdateLensTypeRequest,
    responses(
        (status = 200, description = "Lens type updated successfully", body = ApiResponse<LensTypeResponse>),
        (status = 404, description = "Lens type not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn update_lens_type(
    Distributor(_actor): Distributor,
    Path(lens_type_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateLensTypeRequest>,
) -> Result<Json<ApiResponse<LensTypeResponse>>, StatusCode> {
    let existing = match lens_type::Entity::find_by_id(lens_type_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Lens type with ID {} not found for update", lens_type_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to look up lens type {} for update: {}",
                lens_type_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: lens_type::ActiveModel = existing.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(description) = request.description {
        active.description = Set(Some(description));
    }
    if let Some(price_modifier) = request.price_modifier {
        active.price_modifier = Set(price_modifier);
    }

    match active.update(&state.db).await {
        Ok(updated) => Ok(Json(ApiResponse {
            data: LensTypeResponse::from(updated),
            message: "Lens type updated successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!(
                "Failed to update lens type with ID {}: {}",
                lens_type_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a lens type
#[utoipa::path(
    delete,
    path = "/api/v1/lens-types/{lens_type_id}",
    tag = "frames",
    params(("lens_type_id" = i32, Path, description = "Lens type ID")),
    responses(
        (status = 200, description = "Lens type deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Lens type not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_lens_type(
    Distributor(_actor): Distributor,
    Path(lens_type_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match lens_type::Entity::delete_by_id(lens_type_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                Ok(Json(ApiResponse {
                    data: format!("Lens type {} deleted", lens_type_id),
                    message: "Lens type deleted successfully".to_string(),
                    success: true,
                }))
            } else {
                warn!("Lens type with ID {} not found for deletion", lens_type_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete lens type with ID {}: {}",
                lens_type_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
