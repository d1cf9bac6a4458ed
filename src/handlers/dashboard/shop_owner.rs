use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::{SalesTrendPoint, ShopSalesSummary, TopProduct};
use serde::Deserialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::auth::ShopOwner;
use crate::handlers::inventory::ledger_error_response;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Query parameters for the shop's ranked product list
#[derive(Debug, Deserialize, ToSchema)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Query parameters for the shop's daily sales series
#[derive(Debug, Deserialize, ToSchema)]
pub struct DaysQuery {
    pub days: Option<i64>,
}

/// Month-to-date headline numbers for the caller's shop
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/shop/summary",
    tag = "dashboard",
    responses(
        (status = 200, description = "Shop summary retrieved successfully", body = ApiResponse<common::ShopSalesSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn shop_summary(
    seller: ShopOwner,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ShopSalesSummary>>, HandlerError> {
    let summary = ledger::reports::shop_sales_summary(
        &state.db,
        seller.shop_id,
        Utc::now().date_naive(),
    )
    .await
    .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse {
        data: summary,
        message: "Shop summary retrieved successfully".to_string(),
        success: true,
    }))
}

/// Top selling products for the caller's shop
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/shop/top-products",
    tag = "dashboard",
    responses(
        (status = 200, description = "Top products retrieved successfully", body = ApiResponse<Vec<common::TopProduct>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn shop_top_products(
    seller: ShopOwner,
    Query(query): Query<LimitQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TopProduct>>>, HandlerError> {
    let products = ledger::reports::shop_top_products(
        &state.db,
        seller.shop_id,
        query.limit.unwrap_or(10),
    )
    .await
    .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse {
        data: products,
        message: "Top products retrieved successfully".to_string(),
        success: true,
    }))
}

/// Units sold per day for the caller's shop over the trailing window
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/shop/sales-by-day",
    tag = "dashboard",
    responses(
        (status = 200, description = "Daily sales retrieved successfully", body = ApiResponse<Vec<common::SalesTrendPoint>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn shop_sales_by_day(
    seller: ShopOwner,
    Query(query): Query<DaysQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SalesTrendPoint>>>, HandlerError> {
    let daily = ledger::reports::shop_sales_by_day(
        &state.db,
        seller.shop_id,
        query.days.unwrap_or(30),
        Utc::now().date_naive(),
    )
    .await
    .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse {
        data: daily,
        message: "Daily sales retrieved successfully".to_string(),
        success: true,
    }))
}
