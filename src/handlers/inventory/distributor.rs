use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::{month_start, BillingReport, FinancialSnapshot};
use ledger::{ShopDistribution, StockInItem};
use model::entities::{frame, inventory_transaction, shop, shop_inventory, user};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use super::shared::{frames_by_id, inventory_response, snapshot, ShopInventoryResponse};
use super::ledger_error_response;
use crate::auth::Distributor;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// One line of a stock-in request
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StockInItemRequest {
    pub frame_id: i32,
    pub quantity: i32,
    pub cost_per_unit: Decimal,
}

/// Request body for a single-shop bulk stock-in
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StockInRequest {
    pub shop_id: i32,
    pub items: Vec<StockInItemRequest>,
}

/// What happened to one stock-in line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessedItemResponse {
    pub frame_id: i32,
    pub frame_name: String,
    pub product_id: String,
    pub quantity_added: i32,
    pub cost_per_unit: Decimal,
    pub new_total: i32,
    pub inventory_created: bool,
}

impl From<ledger::ProcessedItem> for ProcessedItemResponse {
    fn from(item: ledger::ProcessedItem) -> Self {
        Self {
            frame_id: item.frame_id,
            frame_name: item.frame_name,
            product_id: item.product_id,
            quantity_added: item.quantity_added,
            cost_per_unit: item.cost_per_unit,
            new_total: item.new_total,
            inventory_created: item.inventory_created,
        }
    }
}

fn stock_items(items: &[StockInItemRequest]) -> Vec<StockInItem> {
    items
        .iter()
        .map(|i| StockInItem {
            frame_id: i.frame_id,
            quantity: i.quantity,
            cost_per_unit: i.cost_per_unit,
        })
        .collect()
}

/// Bulk stock-in to a single shop
#[utoipa::path(
    post,
    path = "/api/v1/inventory/stock-in",
    tag = "inventory",
    request_body = StockInRequest,
    responses(
        (status = 201, description = "Stock received successfully", body = ApiResponse<Vec<ProcessedItemResponse>>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Shop or frame not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn stock_in(
    Distributor(actor): Distributor,
    State(state): State<AppState>,
    Json(request): Json<StockInRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<ProcessedItemResponse>>>), (StatusCode, Json<ErrorResponse>)>
{
    let now = Utc::now().naive_utc();
    let processed = ledger::stock_in(
        &state.db,
        request.shop_id,
        &stock_items(&request.items),
        actor.id,
        now,
        "Bulk stock in by distributor",
    )
    .await
    .map_err(ledger_error_response)?;

    info!(
        "Processed {} stock-in lines for shop {}",
        processed.len(),
        request.shop_id
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            message: format!("Successfully processed {} items", processed.len()),
            data: processed.into_iter().map(ProcessedItemResponse::from).collect(),
            success: true,
        }),
    ))
}

/// Stock destined for one shop inside a bulk distribution
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ShopDistributionRequest {
    pub shop_id: i32,
    pub items: Vec<StockInItemRequest>,
}

/// Request body for a multi-shop distribution
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BulkDistributionRequest {
    pub distributions: Vec<ShopDistributionRequest>,
}

/// Per-shop distribution result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DistributionShopResponse {
    pub shop_id: i32,
    pub shop_name: String,
    pub items_processed: Vec<ProcessedItemResponse>,
    pub total_items: i32,
}

/// Full bulk distribution result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkDistributionResponse {
    pub total_items_distributed: i32,
    pub shops_updated: usize,
    pub results: Vec<DistributionShopResponse>,
}

/// Distribute inventory to multiple shops in one transaction
#[utoipa::path(
    post,
    path = "/api/v1/inventory/distribution/bulk",
    tag = "inventory",
    request_body = BulkDistributionRequest,
    responses(
        (status = 201, description = "Distribution applied successfully", body = ApiResponse<BulkDistributionResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Shop or frame not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn distribute_bulk(
    Distributor(actor): Distributor,
    State(state): State<AppState>,
    Json(request): Json<BulkDistributionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BulkDistributionResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    let distributions: Vec<ShopDistribution> = request
        .distributions
        .iter()
        .map(|d| ShopDistribution {
            shop_id: d.shop_id,
            items: stock_items(&d.items),
        })
        .collect();

    let now = Utc::now().naive_utc();
    let outcome = ledger::distribute_bulk(&state.db, &distributions, actor.id, now)
        .await
        .map_err(ledger_error_response)?;

    let message = format!(
        "Successfully distributed {} items to {} shops",
        outcome.total_items_distributed, outcome.shops_updated
    );
    info!("{}", message);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: BulkDistributionResponse {
                total_items_distributed: outcome.total_items_distributed,
                shops_updated: outcome.shops_updated,
                results: outcome
                    .results
                    .into_iter()
                    .map(|r| DistributionShopResponse {
                        shop_id: r.shop_id,
                        shop_name: r.shop_name,
                        items_processed: r
                            .items_processed
                            .into_iter()
                            .map(ProcessedItemResponse::from)
                            .collect(),
                        total_items: r.total_items,
                    })
                    .collect(),
            },
            message,
            success: true,
        }),
    ))
}

/// Shop identity and contact fields as embedded in inventory payloads
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShopEntry {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
}

impl From<shop::Model> for ShopEntry {
    fn from(model: shop::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            owner_name: model.owner_name,
            phone: model.phone,
            email: model.email,
        }
    }
}

/// Per-shop inventory summary on the distribution dashboard
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShopInventorySummaryEntry {
    pub shop_id: i32,
    pub shop_name: String,
    pub address: String,
    pub owner_name: String,
    pub total_items: usize,
    pub total_value: Decimal,
    pub low_stock_count: usize,
    pub last_distribution: Option<chrono::NaiveDateTime>,
}

/// A recent STOCK_IN movement on the distribution dashboard
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecentDistributionEntry {
    pub id: i32,
    pub shop_name: String,
    pub frame_name: String,
    pub product_id: String,
    pub quantity: i32,
    pub unit_cost: Option<Decimal>,
    pub created_at: chrono::NaiveDateTime,
    pub created_by: String,
}

/// The distribution dashboard payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DistributionOverviewResponse {
    pub shops: Vec<ShopEntry>,
    pub frames: Vec<crate::handlers::frames::FrameResponse>,
    pub shop_inventory_summary: Vec<ShopInventorySummaryEntry>,
    pub recent_distributions: Vec<RecentDistributionEntry>,
}

/// Distribution dashboard: shops, catalog, per-shop stock summaries and
/// the ten most recent distributions
#[utoipa::path(
    get,
    path = "/api/v1/inventory/distribution",
    tag = "inventory",
    responses(
        (status = 200, description = "Overview retrieved successfully", body = ApiResponse<DistributionOverviewResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn distribution_overview(
    Distributor(_actor): Distributor,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DistributionOverviewResponse>>, StatusCode> {
    let shops = shop::Entity::find()
        .all(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let frames = frames_by_id(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let positions = shop_inventory::Entity::find()
        .all(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut summary = Vec::with_capacity(shops.len());
    for shop_model in &shops {
        let shop_positions: Vec<_> = positions
            .iter()
            .filter(|p| p.shop_id == shop_model.id)
            .collect();
        let total_value = shop_positions
            .iter()
            .map(|p| {
                let price = frames.get(&p.frame_id).map(|f| f.price).unwrap_or(Decimal::ZERO);
                Decimal::from(p.quantity_remaining()) * price
            })
            .sum();
        summary.push(ShopInventorySummaryEntry {
            shop_id: shop_model.id,
            shop_name: shop_model.name.clone(),
            address: shop_model.address.clone(),
            owner_name: shop_model.owner_name.clone(),
            total_items: shop_positions.len(),
            total_value,
            low_stock_count: shop_positions
                .iter()
                .filter(|p| p.quantity_remaining() < 5)
                .count(),
            last_distribution: shop_positions.iter().map(|p| p.last_restocked).max(),
        });
    }

    let recent = inventory_transaction::Entity::find()
        .filter(
            inventory_transaction::Column::TransactionType
                .eq(inventory_transaction::TransactionType::StockIn),
        )
        .order_by_desc(inventory_transaction::Column::CreatedAt)
        .limit(10)
        .all(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let position_index: HashMap<i32, &shop_inventory::Model> =
        positions.iter().map(|p| (p.id, p)).collect();
    let shop_index: HashMap<i32, &shop::Model> = shops.iter().map(|s| (s.id, s)).collect();
    let users: HashMap<i32, user::Model> = user::Entity::find()
        .all(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let recent_distributions: Vec<RecentDistributionEntry> = recent
        .into_iter()
        .filter_map(|t| {
            let position = position_index.get(&t.shop_inventory_id)?;
            let frame_model = frames.get(&position.frame_id)?;
            let shop_model = shop_index.get(&position.shop_id)?;
            Some(RecentDistributionEntry {
                id: t.id,
                shop_name: shop_model.name.clone(),
                frame_name: frame_model.name.clone(),
                product_id: frame_model.product_id.clone(),
                quantity: t.quantity,
                unit_cost: t.unit_cost,
                created_at: t.created_at,
                created_by: users
                    .get(&t.created_by)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
            })
        })
        .collect();

    let mut frame_list: Vec<frame::Model> = frames.into_values().collect();
    frame_list.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(ApiResponse {
        data: DistributionOverviewResponse {
            shops: shops.into_iter().map(ShopEntry::from).collect(),
            frames: frame_list
                .into_iter()
                .map(crate::handlers::frames::FrameResponse::from)
                .collect(),
            shop_inventory_summary: summary,
            recent_distributions,
        },
        message: "Distribution overview retrieved successfully".to_string(),
        success: true,
    }))
}

/// Detailed inventory for one shop, with totals and the current month's
/// financials
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShopInventoryDetailResponse {
    pub shop: ShopEntry,
    pub inventory: Vec<ShopInventoryResponse>,
    pub total_items: usize,
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub low_stock_items: Vec<ShopInventoryResponse>,
    pub financial_summary: FinancialSnapshot,
}

/// Detailed per-shop inventory for the distributor
#[utoipa::path(
    get,
    path = "/api/v1/inventory/shops/{shop_id}/inventory",
    tag = "inventory",
    params(("shop_id" = i32, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop inventory retrieved successfully", body = ApiResponse<ShopInventoryDetailResponse>),
        (status = 404, description = "Shop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn shop_inventory_detail(
    Distributor(_actor): Distributor,
    Path(shop_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ShopInventoryDetailResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Shop not found".to_string(),
                code: "SHOP_NOT_FOUND".to_string(),
                success: false,
            }),
        )
    };
    let internal = || {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal server error".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            }),
        )
    };

    let shop_model = shop::Entity::find_by_id(shop_id)
        .one(&state.db)
        .await
        .map_err(|_| internal())?
        .ok_or_else(not_found)?;

    let positions = shop_inventory::Entity::find()
        .filter(shop_inventory::Column::ShopId.eq(shop_id))
        .all(&state.db)
        .await
        .map_err(|_| internal())?;
    let frames = frames_by_id(&state.db).await.map_err(|_| internal())?;

    let inventory: Vec<ShopInventoryResponse> = positions
        .iter()
        .filter_map(|p| inventory_response(p, &frames))
        .collect();
    let total_value = inventory
        .iter()
        .map(|i| Decimal::from(i.quantity_remaining) * i.frame_price)
        .sum();
    let total_cost = inventory.iter().map(|i| i.total_cost).sum();
    let low_stock_items: Vec<ShopInventoryResponse> = positions
        .iter()
        .filter(|p| p.quantity_remaining() < 5)
        .filter_map(|p| inventory_response(p, &frames))
        .collect();

    let now = Utc::now().naive_utc();
    let financial = ledger::summary::get_or_create_month(
        &state.db,
        shop_id,
        month_start(now.date()),
        now,
    )
    .await
    .map_err(|e| {
        error!("Failed to load financial summary for shop {}: {}", shop_id, e);
        internal()
    })?;

    Ok(Json(ApiResponse {
        data: ShopInventoryDetailResponse {
            shop: ShopEntry::from(shop_model),
            total_items: inventory.len(),
            total_value,
            total_cost,
            inventory,
            low_stock_items,
            financial_summary: snapshot(financial),
        },
        message: "Shop inventory retrieved successfully".to_string(),
        success: true,
    }))
}

/// Query parameters for the billing report
#[derive(Debug, Deserialize, ToSchema)]
pub struct BillingQuery {
    /// Any date inside the month to bill; defaults to the current month
    pub month: Option<chrono::NaiveDate>,
}

/// Monthly billing report for one shop
#[utoipa::path(
    get,
    path = "/api/v1/inventory/shops/{shop_id}/billing-report",
    tag = "inventory",
    params(("shop_id" = i32, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Billing report generated successfully", body = ApiResponse<BillingReport>),
        (status = 404, description = "Shop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn billing_report(
    Distributor(_actor): Distributor,
    Path(shop_id): Path<i32>,
    Query(query): Query<BillingQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BillingReport>>, (StatusCode, Json<ErrorResponse>)> {
    let month = query.month.unwrap_or_else(|| Utc::now().date_naive());
    let report = ledger::reports::billing_report(&state.db, shop_id, month)
        .await
        .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse {
        data: report,
        message: "Billing report generated successfully".to_string(),
        success: true,
    }))
}

/// Query parameters for the inventory CSV upload
#[derive(Debug, Deserialize, ToSchema)]
pub struct InventoryCsvQuery {
    pub shop_id: i32,
}

/// Outcome of an inventory CSV upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InventoryCsvResponse {
    pub shop_name: String,
    pub processed_items: Vec<ProcessedItemResponse>,
}

/// CSV stock-in for one shop
///
/// Expected columns: `product_id,quantity`. Units are priced at the frame's
/// catalog price. Row errors abort the whole upload.
#[utoipa::path(
    post,
    path = "/api/v1/inventory/upload-csv",
    tag = "inventory",
    request_body = String,
    responses(
        (status = 201, description = "CSV processed successfully", body = ApiResponse<InventoryCsvResponse>),
        (status = 400, description = "CSV contained errors", body = ErrorResponse),
        (status = 404, description = "Shop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(body))]
pub async fn upload_inventory_csv(
    Distributor(actor): Distributor,
    Query(query): Query<InventoryCsvQuery>,
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<ApiResponse<InventoryCsvResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    #[derive(Debug, Deserialize)]
    struct CsvRow {
        product_id: String,
        quantity: String,
    }

    let bad_request = |errors: Vec<String>| {
        warn!("Inventory CSV upload rejected: {} bad rows", errors.len());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("CSV processing had errors: {}", errors.join("; ")),
                code: "CSV_ERRORS".to_string(),
                success: false,
            }),
        )
    };

    let shop_model = shop::Entity::find_by_id(query.shop_id)
        .one(&state.db)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Shop not found".to_string(),
                    code: "SHOP_NOT_FOUND".to_string(),
                    success: false,
                }),
            )
        })?;

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut errors = Vec::new();
    let mut items = Vec::new();

    for (index, record) in reader.deserialize::<CsvRow>().enumerate() {
        let line = index + 2;
        let row = match record {
            Ok(row) => row,
            Err(e) => {
                errors.push(format!("Row {}: {}", line, e));
                continue;
            }
        };

        let product_id = row.product_id.trim();
        if product_id.is_empty() {
            errors.push(format!("Row {}: missing product_id", line));
            continue;
        }
        let quantity: i32 = match row.quantity.trim().parse() {
            Ok(quantity) if quantity > 0 => quantity,
            Ok(_) => {
                errors.push(format!("Row {}: quantity must be positive", line));
                continue;
            }
            Err(_) => {
                errors.push(format!("Row {}: invalid quantity format", line));
                continue;
            }
        };

        let frame_model = frame::Entity::find()
            .filter(frame::Column::ProductId.eq(product_id))
            .one(&state.db)
            .await
            .map_err(|_| bad_request(vec![format!("Row {}: lookup failed", line)]))?;
        match frame_model {
            Some(frame_model) => items.push(StockInItem {
                frame_id: frame_model.id,
                quantity,
                cost_per_unit: frame_model.price,
            }),
            None => errors.push(format!("Row {}: frame '{}' not found", line, product_id)),
        }
    }

    if !errors.is_empty() {
        return Err(bad_request(errors));
    }

    let now = Utc::now().naive_utc();
    let processed = ledger::stock_in(
        &state.db,
        shop_model.id,
        &items,
        actor.id,
        now,
        "CSV upload",
    )
    .await
    .map_err(ledger_error_response)?;

    info!(
        "Inventory CSV upload processed {} rows for shop {}",
        processed.len(),
        shop_model.id
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            message: format!("Successfully processed {} items", processed.len()),
            data: InventoryCsvResponse {
                shop_name: shop_model.name,
                processed_items: processed
                    .into_iter()
                    .map(ProcessedItemResponse::from)
                    .collect(),
            },
            success: true,
        }),
    ))
}
