use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use super::ledger_error_response;
use crate::auth::ShopOwner;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum_valid::Valid;

/// Request body for recording a sale
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct ProcessSaleRequest {
    pub shop_inventory_id: i32,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    pub sale_price: Decimal,
}

/// Outcome of a recorded sale
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaleOutcomeResponse {
    pub quantity_sold: i32,
    pub total_amount: Decimal,
    pub remaining_stock: i32,
}

/// Record a sale against the caller's shop
///
/// Updates the stock position, appends a SALE row to the movement ledger
/// and folds the amounts into the current month's financial summary.
#[utoipa::path(
    post,
    path = "/api/v1/inventory/process-sale",
    tag = "inventory",
    request_body = ProcessSaleRequest,
    responses(
        (status = 200, description = "Sale processed successfully", body = ApiResponse<SaleOutcomeResponse>),
        (status = 400, description = "Invalid request or insufficient stock", body = ErrorResponse),
        (status = 403, description = "Inventory belongs to another shop", body = ErrorResponse),
        (status = 404, description = "Inventory not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn process_sale(
    seller: ShopOwner,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<ProcessSaleRequest>>,
) -> Result<Json<ApiResponse<SaleOutcomeResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let now = Utc::now().naive_utc();
    let outcome = ledger::process_sale(
        &state.db,
        seller.shop_id,
        request.shop_inventory_id,
        request.quantity,
        request.sale_price,
        seller.user.id,
        now,
    )
    .await
    .map_err(ledger_error_response)?;

    info!(
        "Sale of {} units processed for shop {}",
        outcome.quantity_sold, seller.shop_id
    );
    Ok(Json(ApiResponse {
        data: SaleOutcomeResponse {
            quantity_sold: outcome.quantity_sold,
            total_amount: outcome.total_amount,
            remaining_stock: outcome.remaining_stock,
        },
        message: "Sale processed successfully".to_string(),
        success: true,
    }))
}
