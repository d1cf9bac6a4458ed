use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use model::entities::frame;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::auth::{AuthUser, Distributor};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Predefined filter choices shown to clients alongside whatever values
/// the catalog actually contains.
const FRAME_TYPE_CHOICES: &[&str] = &["aviator", "cat_eye", "rectangle", "round", "square"];
const COLOR_CHOICES: &[&str] = &[
    "black",
    "brown",
    "gold",
    "silver",
    "blue",
    "red",
    "green",
    "transparent",
    "tortoise",
    "grey",
];
const MATERIAL_CHOICES: &[&str] = &[
    "acetate", "aluminum", "bamboo", "chrome", "metal", "steel", "titanium", "wood",
];

/// Request body for creating a frame
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateFrameRequest {
    pub product_id: String,
    pub name: String,
    pub frame_type: String,
    pub color: String,
    pub material: String,
    pub price: Decimal,
    pub brand: String,
}

/// Request body for updating a frame
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateFrameRequest {
    pub name: Option<String>,
    pub frame_type: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub price: Option<Decimal>,
    pub brand: Option<String>,
}

/// Frame response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FrameResponse {
    pub id: i32,
    pub product_id: String,
    pub name: String,
    pub frame_type: String,
    pub color: String,
    pub material: String,
    pub price: Decimal,
    pub brand: String,
}

impl From<frame::Model> for FrameResponse {
    fn from(model: frame::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            name: model.name,
            frame_type: model.frame_type,
            color: model.color,
            material: model.material,
            price: model.price,
            brand: model.brand,
        }
    }
}

/// Query parameters for listing frames
#[derive(Debug, Deserialize, ToSchema)]
pub struct FramesQuery {
    pub frame_type: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub brand: Option<String>,
}

/// Query parameters for searching frames
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// One choice entry for the filter dropdowns
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChoiceEntry {
    pub value: String,
    pub label: String,
}

/// Available filter choices: predefined plus observed catalog values
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FrameChoicesResponse {
    pub frame_types: Vec<ChoiceEntry>,
    pub colors: Vec<ChoiceEntry>,
    pub materials: Vec<ChoiceEntry>,
    pub brands: Vec<String>,
}

/// Outcome of a CSV catalog upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CsvUploadResponse {
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<String>,
}

/// Create a new frame
#[utoipa::path(
    post,
    path = "/api/v1/frames",
    tag = "frames",
    request_body = CreateFrameRequest,
    responses(
        (status = 201, description = "Frame created successfully", body = ApiResponse<FrameResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn create_frame(
    Distributor(_actor): Distributor,
    State(state): State<AppState>,
    Json(request): Json<CreateFrameRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FrameResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Creating frame '{}' with product ID {}",
        request.name, request.product_id
    );

    let new_frame = frame::ActiveModel {
        product_id: Set(request.product_id.clone()),
        name: Set(request.name.clone()),
        frame_type: Set(request.frame_type.clone()),
        color: Set(request.color.clone()),
        material: Set(request.material.clone()),
        price: Set(request.price),
        brand: Set(request.brand.clone()),
        ..Default::default()
    };

    match new_frame.insert(&state.db).await {
        Ok(frame_model) => {
            info!(
                "Frame created successfully with ID: {}, product ID: {}",
                frame_model.id, frame_model.product_id
            );
            let response = ApiResponse {
                data: FrameResponse::from(frame_model),
                message: "Frame created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create frame '{}': {}", request.product_id, db_error);
            let message = db_error.to_string().to_lowercase();
            let error_response = if message.contains("unique") || message.contains("constraint") {
                ErrorResponse {
                    error: format!("Product ID '{}' already exists", request.product_id),
                    code: "PRODUCT_ID_ALREADY_EXISTS".to_string(),
                    success: false,
                }
            } else {
                ErrorResponse {
                    error: "Internal server error while creating frame".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }
            };
            Err((StatusCode::BAD_REQUEST, Json(error_response)))
        }
    }
}

/// Get the frame catalog, optionally filtered
#[utoipa::path(
    get,
    path = "/api/v1/frames",
    tag = "frames",
    responses(
        (status = 200, description = "Frames retrieved successfully", body = ApiResponse<Vec<FrameResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_frames(
    _user: AuthUser,
    Query(query): Query<FramesQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FrameResponse>>>, StatusCode> {
    let mut find = frame::Entity::find().order_by_asc(frame::Column::Name);
    if let Some(frame_type) = &query.frame_type {
        find = find.filter(frame::Column::FrameType.eq(frame_type));
    }
    if let Some(color) = &query.color {
        find = find.filter(frame::Column::Color.eq(color));
    }
    if let Some(material) = &query.material {
        find = find.filter(frame::Column::Material.eq(material));
    }
    if let Some(brand) = &query.brand {
        find = find.filter(frame::Column::Brand.eq(brand));
    }

    match find.all(&state.db).await {
        Ok(frames) => {
            debug!("Retrieved {} frames from catalog", frames.len());
            Ok(Json(ApiResponse {
                data: frames.into_iter().map(FrameResponse::from).collect(),
                message: "Frames retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve frames: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Search frames by name, product ID or brand
#[utoipa::path(
    get,
    path = "/api/v1/frames/search",
    tag = "frames",
    responses(
        (status = 200, description = "Search results", body = ApiResponse<Vec<FrameResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn search_frames(
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FrameResponse>>>, StatusCode> {
    let mut find = frame::Entity::find().order_by_asc(frame::Column::Name);
    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        find = find.filter(
            Condition::any()
                .add(frame::Column::Name.contains(q))
                .add(frame::Column::ProductId.contains(q))
                .add(frame::Column::Brand.contains(q)),
        );
    }

    match find.all(&state.db).await {
        Ok(frames) => Ok(Json(ApiResponse {
            data: frames.into_iter().map(FrameResponse::from).collect(),
            message: "Search completed successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!("Frame search failed: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get available filter choices, merging predefined values with those
/// observed in the catalog
#[utoipa::path(
    get,
    path = "/api/v1/frames/choices",
    tag = "frames",
    responses(
        (status = 200, description = "Choices retrieved successfully", body = ApiResponse<FrameChoicesResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn frame_choices(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FrameChoicesResponse>>, StatusCode> {
    let frames = frame::Entity::find()
        .all(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let observed = |extract: fn(&frame::Model) -> &String| -> BTreeSet<String> {
        frames.iter().map(|f| extract(f).clone()).collect()
    };

    let merge = |predefined: &[&str], observed: BTreeSet<String>| -> Vec<ChoiceEntry> {
        let mut entries: Vec<ChoiceEntry> = predefined
            .iter()
            .map(|value| ChoiceEntry {
                value: value.to_string(),
                label: title_case(value),
            })
            .collect();
        for value in observed {
            if !predefined.contains(&value.as_str()) && !value.is_empty() {
                entries.push(ChoiceEntry {
                    label: title_case(&value),
                    value,
                });
            }
        }
        entries
    };

    let response = FrameChoicesResponse {
        frame_types: merge(FRAME_TYPE_CHOICES, observed(|f| &f.frame_type)),
        colors: merge(COLOR_CHOICES, observed(|f| &f.color)),
        materials: merge(MATERIAL_CHOICES, observed(|f| &f.material)),
        brands: observed(|f| &f.brand).into_iter().collect(),
    };

    Ok(Json(ApiResponse {
        data: response,
        message: "Choices retrieved successfully".to_string(),
        success: true,
    }))
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Get a specific frame by ID
#[utoipa::path(
    get,
    path = "/api/v1/frames/{frame_id}",
    tag = "frames",
    params(("frame_id" = i32, Path, description = "Frame ID")),
    responses(
        (status = 200, description = "Frame retrieved successfully", body = ApiResponse<FrameResponse>),
        (status = 404, description = "Frame not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_frame(
    _user: AuthUser,
    Path(frame_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FrameResponse>>, StatusCode> {
    match frame::Entity::find_by_id(frame_id).one(&state.db).await {
        Ok(Some(frame_model)) => Ok(Json(ApiResponse {
            data: FrameResponse::from(frame_model),
            message: "Frame retrieved successfully".to_string(),
            success: true,
        })),
        Ok(None) => {
            warn!("Frame with ID {} not found", frame_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve frame with ID {}: {}", frame_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a frame
#[utoipa::path(
    put,
    path = "/api/v1/frames/{frame_id}",
    tag = "frames",
    params(("frame_id" = i32, Path, description = "Frame ID")),
    request_body = UpdateFrameRequest,
    responses(
        (status = 200, description = "Frame updated successfully", body = ApiResponse<FrameResponse>),
        (status = 404, description = "Frame not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn update_frame(
    Distributor(_actor): Distributor,
    Path(frame_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateFrameRequest>,
) -> Result<Json<ApiResponse<FrameResponse>>, StatusCode> {
    let existing = match frame::Entity::find_by_id(frame_id).one(&state.db).await {
        Ok(Some(frame_model)) => frame_model,
        Ok(None) => {
            warn!("Frame with ID {} not found for update", frame_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to look up frame {} for update: {}", frame_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: frame::ActiveModel = existing.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(frame_type) = request.frame_type {
        active.frame_type = Set(frame_type);
    }
    if let Some(color) = request.color {
        active.color = Set(color);
    }
    if let Some(material) = request.material {
        active.material = Set(material);
    }
    if let Some(price) = request.price {
        active.price = Set(price);
    }
    if let Some(brand) = request.brand {
        active.brand = Set(brand);
    }

    match active.update(&state.db).await {
        Ok(updated) => {
            info!("Frame with ID {} updated successfully", frame_id);
            Ok(Json(ApiResponse {
                data: FrameResponse::from(updated),
                message: "Frame updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update frame with ID {}: {}", frame_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a frame
#[utoipa::path(
    delete,
    path = "/api/v1/frames/{frame_id}",
    tag = "frames",
    params(("frame_id" = i32, Path, description = "Frame ID")),
    responses(
        (status = 200, description = "Frame deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Frame not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_frame(
    Distributor(_actor): Distributor,
    Path(frame_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match frame::Entity::delete_by_id(frame_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Frame with ID {} deleted successfully", frame_id);
                Ok(Json(ApiResponse {
                    data: format!("Frame {} deleted", frame_id),
                    message: "Frame deleted successfully".to_string(),
                    success: true,
                }))
            } else {
                warn!("Frame with ID {} not found for deletion", frame_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete frame with ID {}: {}", frame_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Bulk create/update frames from a CSV body
///
/// Expected columns: `product_id,name,frame_type,price,color,material,brand`.
/// The upload is all-or-nothing: any bad row aborts the batch and the
/// offending rows are reported back with their line numbers.
#[utoipa::path(
    post,
    path = "/api/v1/frames/upload-csv",
    tag = "frames",
    request_body = String,
    responses(
        (status = 201, description = "CSV processed successfully", body = ApiResponse<CsvUploadResponse>),
        (status = 400, description = "CSV contained errors", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(body))]
pub async fn upload_frames_csv(
    Distributor(_actor): Distributor,
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<ApiResponse<CsvUploadResponse>>), (StatusCode, Json<ErrorResponse>)> {
    #[derive(Debug, Deserialize)]
    struct CsvRow {
        product_id: String,
        name: String,
        frame_type: String,
        price: String,
        color: String,
        material: String,
        brand: String,
    }

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut rows = Vec::new();
    let mut errors = Vec::new();

    // Header occupies line 1
    for (index, record) in reader.deserialize::<CsvRow>().enumerate() {
        let line = index + 2;
        match record {
            Ok(row) => {
                if row.product_id.trim().is_empty() {
                    errors.push(format!("Row {}: missing product_id", line));
                    continue;
                }
                match row.price.trim().parse::<Decimal>() {
                    Ok(price) if price >= Decimal::ZERO => rows.push((line, row, price)),
                    Ok(_) => errors.push(format!("Row {}: price cannot be negative", line)),
                    Err(_) => errors.push(format!("Row {}: invalid price format", line)),
                }
            }
            Err(e) => errors.push(format!("Row {}: {}", line, e)),
        }
    }

    if !errors.is_empty() {
        warn!("Frame CSV upload rejected with {} bad rows", errors.len());
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("CSV processing had errors: {}", errors.join("; ")),
                code: "CSV_ERRORS".to_string(),
                success: false,
            }),
        ));
    }

    let internal_error = || {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to process CSV".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            }),
        )
    };

    let result = async {
        let txn = state.db.begin().await?;
        let mut created = 0;
        let mut updated = 0;

        for (_line, row, price) in &rows {
            let existing = frame::Entity::find()
                .filter(frame::Column::ProductId.eq(row.product_id.trim()))
                .one(&txn)
                .await?;

            match existing {
                Some(frame_model) => {
                    let mut active: frame::ActiveModel = frame_model.into();
                    active.name = Set(row.name.clone());
                    active.frame_type = Set(row.frame_type.clone());
                    active.color = Set(row.color.clone());
                    active.material = Set(row.material.clone());
                    active.price = Set(*price);
                    active.brand = Set(row.brand.clone());
                    active.update(&txn).await?;
                    updated += 1;
                }
                None => {
                    frame::ActiveModel {
                        product_id: Set(row.product_id.trim().to_string()),
                        name: Set(row.name.clone()),
                        frame_type: Set(row.frame_type.clone()),
                        color: Set(row.color.clone()),
                        material: Set(row.material.clone()),
                        price: Set(*price),
                        brand: Set(row.brand.clone()),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;
                    created += 1;
                }
            }
        }

        txn.commit().await?;
        Ok::<(usize, usize), DbErr>((created, updated))
    }
    .await;

    match result {
        Ok((created, updated)) => {
            info!(
                "Frame CSV upload processed: {} created, {} updated",
                created, updated
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: CsvUploadResponse {
                        created,
                        updated,
                        errors: Vec::new(),
                    },
                    message: format!("Successfully processed {} rows", created + updated),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Frame CSV upload failed: {}", db_error);
            Err(internal_error())
        }
    }
}
