use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::{
    LowStockReport, RevenueSummaryReport, SalesTrendPoint, ShopPerformance, SlowMovingItem,
    SummaryPeriod, TopProduct, TrendInterval,
};
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::auth::Distributor;
use crate::handlers::inventory::ledger_error_response;
use crate::schemas::{ApiResponse, AppState, CachedReport, ErrorResponse};

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Query parameters for trend endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct TrendQuery {
    /// day, week or month (default month)
    pub period: Option<String>,
}

/// Query parameters for ranked-list endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Query parameters for the slow-mover report
#[derive(Debug, Deserialize, ToSchema)]
pub struct DaysQuery {
    pub days: Option<i64>,
}

/// Query parameters for summary-window endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct PeriodQuery {
    /// month, quarter or year (default month)
    pub period: Option<String>,
}

/// Query parameters for low-stock alerts
#[derive(Debug, Deserialize, ToSchema)]
pub struct ThresholdQuery {
    pub threshold: Option<i32>,
}

/// Sales trends grouped by day, week or month
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/sales-trends",
    tag = "dashboard",
    responses(
        (status = 200, description = "Trends retrieved successfully", body = ApiResponse<Vec<common::SalesTrendPoint>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn sales_trends(
    Distributor(_actor): Distributor,
    Query(query): Query<TrendQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SalesTrendPoint>>>, HandlerError> {
    let interval = TrendInterval::from_param(query.period.as_deref().unwrap_or("month"));

    let cache_key = format!("sales_trends_{}", interval.as_str());
    if let Some(CachedReport::Trends(trends)) = state.cache.get(&cache_key).await {
        debug!("Sales trends served from cache");
        return Ok(Json(ApiResponse {
            data: trends,
            message: "Sales trends retrieved from cache".to_string(),
            success: true,
        }));
    }

    let trends = ledger::reports::sales_trends(&state.db, interval)
        .await
        .map_err(ledger_error_response)?;
    state
        .cache
        .insert(cache_key, CachedReport::Trends(trends.clone()))
        .await;

    Ok(Json(ApiResponse {
        data: trends,
        message: "Sales trends retrieved successfully".to_string(),
        success: true,
    }))
}

/// Top selling frames across all shops
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/top-products",
    tag = "dashboard",
    responses(
        (status = 200, description = "Top products retrieved successfully", body = ApiResponse<Vec<common::TopProduct>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn top_products(
    Distributor(_actor): Distributor,
    Query(query): Query<LimitQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TopProduct>>>, HandlerError> {
    let products = ledger::reports::top_products(&state.db, query.limit.unwrap_or(10))
        .await
        .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse {
        data: products,
        message: "Top products retrieved successfully".to_string(),
        success: true,
    }))
}

/// Inventory not restocked within the threshold
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/slow-moving-inventory",
    tag = "dashboard",
    responses(
        (status = 200, description = "Slow movers retrieved successfully", body = ApiResponse<Vec<common::SlowMovingItem>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn slow_moving_inventory(
    Distributor(_actor): Distributor,
    Query(query): Query<DaysQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SlowMovingItem>>>, HandlerError> {
    let items = ledger::reports::slow_moving_inventory(
        &state.db,
        query.days.unwrap_or(90),
        Utc::now().date_naive(),
    )
    .await
    .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse {
        data: items,
        message: "Slow moving inventory retrieved successfully".to_string(),
        success: true,
    }))
}

/// Shop performance comparison over the selected window
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/shop-performance",
    tag = "dashboard",
    responses(
        (status = 200, description = "Performance comparison retrieved successfully", body = ApiResponse<Vec<common::ShopPerformance>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn shop_performance(
    Distributor(_actor): Distributor,
    Query(query): Query<PeriodQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ShopPerformance>>>, HandlerError> {
    let period = SummaryPeriod::from_param(query.period.as_deref().unwrap_or("month"));
    let performance =
        ledger::reports::shop_performance(&state.db, period, Utc::now().date_naive())
            .await
            .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse {
        data: performance,
        message: "Shop performance retrieved successfully".to_string(),
        success: true,
    }))
}

/// Revenue summary over the selected window
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/revenue-summary",
    tag = "dashboard",
    responses(
        (status = 200, description = "Revenue summary retrieved successfully", body = ApiResponse<common::RevenueSummaryReport>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn revenue_summary(
    Distributor(_actor): Distributor,
    Query(query): Query<PeriodQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RevenueSummaryReport>>, HandlerError> {
    let period = SummaryPeriod::from_param(query.period.as_deref().unwrap_or("month"));

    let cache_key = format!("revenue_summary_{}", period.as_str());
    if let Some(CachedReport::Revenue(report)) = state.cache.get(&cache_key).await {
        debug!("Revenue summary served from cache");
        return Ok(Json(ApiResponse {
            data: report,
            message: "Revenue summary retrieved from cache".to_string(),
            success: true,
        }));
    }

    let report = ledger::reports::revenue_summary(&state.db, period, Utc::now().date_naive())
        .await
        .map_err(ledger_error_response)?;
    state
        .cache
        .insert(cache_key, CachedReport::Revenue(report.clone()))
        .await;

    Ok(Json(ApiResponse {
        data: report,
        message: "Revenue summary retrieved successfully".to_string(),
        success: true,
    }))
}

/// Low stock alerts grouped by shop
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/low-stock-alerts",
    tag = "dashboard",
    responses(
        (status = 200, description = "Low stock alerts retrieved successfully", body = ApiResponse<common::LowStockReport>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn low_stock_alerts(
    Distributor(_actor): Distributor,
    Query(query): Query<ThresholdQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LowStockReport>>, HandlerError> {
    let report = ledger::reports::low_stock_alerts(&state.db, query.threshold.unwrap_or(5))
        .await
        .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse {
        data: report,
        message: "Low stock alerts retrieved successfully".to_string(),
        success: true,
    }))
}
