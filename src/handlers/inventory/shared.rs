use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::FinancialSnapshot;
use model::entities::{
    frame, inventory_transaction, shop, shop_financial_summary, shop_inventory,
    user::{self, Role},
};
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, instrument};
use utoipa::ToSchema;

use crate::auth::AuthUser;
use crate::schemas::{ApiResponse, AppState};

/// A stock position joined with its frame, as listed to both roles
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShopInventoryResponse {
    pub id: i32,
    pub shop_id: i32,
    pub frame_id: i32,
    pub frame_name: String,
    pub frame_product_id: String,
    pub frame_brand: String,
    pub frame_price: Decimal,
    pub quantity_received: i32,
    pub quantity_sold: i32,
    pub quantity_remaining: i32,
    pub cost_per_unit: Decimal,
    pub total_cost: Decimal,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    pub last_restocked: chrono::NaiveDateTime,
}

pub(crate) fn inventory_response(
    position: &shop_inventory::Model,
    frames: &HashMap<i32, frame::Model>,
) -> Option<ShopInventoryResponse> {
    let frame = frames.get(&position.frame_id)?;
    Some(ShopInventoryResponse {
        id: position.id,
        shop_id: position.shop_id,
        frame_id: position.frame_id,
        frame_name: frame.name.clone(),
        frame_product_id: frame.product_id.clone(),
        frame_brand: frame.brand.clone(),
        frame_price: frame.price,
        quantity_received: position.quantity_received,
        quantity_sold: position.quantity_sold,
        quantity_remaining: position.quantity_remaining(),
        cost_per_unit: position.cost_per_unit,
        total_cost: position.total_cost(),
        total_revenue: position.total_revenue(frame.price),
        total_profit: position.total_profit(frame.price),
        last_restocked: position.last_restocked,
    })
}

pub(crate) async fn frames_by_id(
    db: &sea_orm::DatabaseConnection,
) -> Result<HashMap<i32, frame::Model>, sea_orm::DbErr> {
    Ok(frame::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect())
}

/// Query parameters for the inventory list
#[derive(Debug, Deserialize, ToSchema)]
pub struct InventoryQuery {
    /// Only positions with fewer than 5 units remaining
    pub low_stock: Option<bool>,
    /// Substring match on the frame name
    pub frame_name: Option<String>,
}

/// Role-scoped inventory list: shop owners see their own shop, the
/// distributor sees every position.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/shop-inventory",
    tag = "inventory",
    responses(
        (status = 200, description = "Inventory retrieved successfully", body = ApiResponse<Vec<ShopInventoryResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn list_shop_inventory(
    caller: AuthUser,
    Query(query): Query<InventoryQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ShopInventoryResponse>>>, StatusCode> {
    let mut find = shop_inventory::Entity::find()
        .order_by_desc(shop_inventory::Column::LastRestocked);
    if caller.role == Role::ShopOwner {
        let shop_id = caller.shop_id.ok_or(StatusCode::FORBIDDEN)?;
        find = find.filter(shop_inventory::Column::ShopId.eq(shop_id));
    }

    let positions = find.all(&state.db).await.map_err(|e| {
        error!("Failed to retrieve inventory: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let frames = frames_by_id(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut responses: Vec<ShopInventoryResponse> = positions
        .iter()
        .filter_map(|p| inventory_response(p, &frames))
        .collect();

    if query.low_stock == Some(true) {
        responses.retain(|r| r.quantity_remaining < 5);
    }
    if let Some(frame_name) = &query.frame_name {
        let needle = frame_name.to_lowercase();
        responses.retain(|r| r.frame_name.to_lowercase().contains(&needle));
    }

    Ok(Json(ApiResponse {
        data: responses,
        message: "Inventory retrieved successfully".to_string(),
        success: true,
    }))
}

/// A movement ledger row with names resolved
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i32,
    pub shop_inventory_id: i32,
    pub shop_name: String,
    pub frame_name: String,
    pub frame_product_id: String,
    pub transaction_type: String,
    pub quantity: i32,
    pub unit_cost: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub notes: String,
    pub created_at: chrono::NaiveDateTime,
    pub created_by_username: String,
}

/// Query parameters for the transaction ledger
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransactionsQuery {
    /// STOCK_IN, SALE or ADJUSTMENT
    pub transaction_type: Option<String>,
}

/// Role-scoped movement ledger, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/transactions",
    tag = "inventory",
    responses(
        (status = 200, description = "Transactions retrieved successfully", body = ApiResponse<Vec<TransactionResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn list_transactions(
    caller: AuthUser,
    Query(query): Query<TransactionsQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransactionResponse>>>, StatusCode> {
    let mut find = inventory_transaction::Entity::find()
        .order_by_desc(inventory_transaction::Column::CreatedAt);
    if let Some(kind) = &query.transaction_type {
        let kind = inventory_transaction::TransactionType::try_from_value(kind)
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        find = find.filter(inventory_transaction::Column::TransactionType.eq(kind));
    }

    let movements = find.all(&state.db).await.map_err(|e| {
        error!("Failed to retrieve transactions: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let positions: HashMap<i32, shop_inventory::Model> = shop_inventory::Entity::find()
        .all(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let frames = frames_by_id(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let shops: HashMap<i32, shop::Model> = shop::Entity::find()
        .all(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();
    let users: HashMap<i32, user::Model> = user::Entity::find()
        .all(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let own_shop = caller.shop_id;
    let responses: Vec<TransactionResponse> = movements
        .into_iter()
        .filter_map(|t| {
            let position = positions.get(&t.shop_inventory_id)?;
            if caller.role == Role::ShopOwner && Some(position.shop_id) != own_shop {
                return None;
            }
            let frame = frames.get(&position.frame_id)?;
            let shop = shops.get(&position.shop_id)?;
            Some(TransactionResponse {
                id: t.id,
                shop_inventory_id: t.shop_inventory_id,
                shop_name: shop.name.clone(),
                frame_name: frame.name.clone(),
                frame_product_id: frame.product_id.clone(),
                transaction_type: t.transaction_type.to_value(),
                quantity: t.quantity,
                unit_cost: t.unit_cost,
                unit_price: t.unit_price,
                notes: t.notes,
                created_at: t.created_at,
                created_by_username: users
                    .get(&t.created_by)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
            })
        })
        .collect();

    Ok(Json(ApiResponse {
        data: responses,
        message: "Transactions retrieved successfully".to_string(),
        success: true,
    }))
}

/// Role-scoped monthly financial summaries, most recent month first.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/financial-summary",
    tag = "inventory",
    responses(
        (status = 200, description = "Financial summaries retrieved successfully", body = ApiResponse<Vec<FinancialSnapshot>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn list_financial_summaries(
    caller: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FinancialSnapshot>>>, StatusCode> {
    let mut find = shop_financial_summary::Entity::find()
        .order_by_desc(shop_financial_summary::Column::Month);
    if caller.role == Role::ShopOwner {
        let shop_id = caller.shop_id.ok_or(StatusCode::FORBIDDEN)?;
        find = find.filter(shop_financial_summary::Column::ShopId.eq(shop_id));
    }

    match find.all(&state.db).await {
        Ok(summaries) => Ok(Json(ApiResponse {
            data: summaries.into_iter().map(snapshot).collect(),
            message: "Financial summaries retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!("Failed to retrieve financial summaries: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub(crate) fn snapshot(model: shop_financial_summary::Model) -> FinancialSnapshot {
    FinancialSnapshot {
        shop_id: model.shop_id,
        month: model.month,
        total_revenue: model.total_revenue,
        total_cost: model.total_cost,
        total_profit: model.total_profit,
        amount_to_pay_distributor: model.amount_to_pay_distributor,
        units_sold: model.units_sold,
    }
}
