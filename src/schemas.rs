use common::{RevenueSummaryReport, SalesTrendPoint};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::auth::AuthConfig;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive dashboard aggregations
    pub cache: Cache<String, CachedReport>,
    /// JWT configuration
    pub auth: AuthConfig,
}

/// Cached report types
#[derive(Clone, Debug)]
pub enum CachedReport {
    Trends(Vec<SalesTrendPoint>),
    Revenue(RevenueSummaryReport),
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::login,
        crate::handlers::auth::me,
        crate::handlers::shops::create_shop,
        crate::handlers::shops::get_shops,
        crate::handlers::frames::create_frame,
        crate::handlers::frames::get_frames,
        crate::handlers::inventory::distributor::stock_in,
        crate::handlers::inventory::shop_owner::process_sale,
        crate::handlers::dashboard::distributor::sales_trends,
    ),
    components(
        schemas(
            ApiResponse<crate::handlers::auth::LoginResponse>,
            ApiResponse<crate::handlers::auth::UserInfoResponse>,
            ApiResponse<crate::handlers::shops::ShopResponse>,
            ApiResponse<Vec<crate::handlers::shops::ShopResponse>>,
            ApiResponse<crate::handlers::frames::FrameResponse>,
            ApiResponse<Vec<crate::handlers::frames::FrameResponse>>,
            ApiResponse<Vec<crate::handlers::inventory::ProcessedItemResponse>>,
            ApiResponse<crate::handlers::inventory::SaleOutcomeResponse>,
            ApiResponse<Vec<common::SalesTrendPoint>>,
            ErrorResponse,
            HealthResponse,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::LoginResponse,
            crate::handlers::auth::UserInfoResponse,
            crate::handlers::shops::CreateShopRequest,
            crate::handlers::shops::ShopResponse,
            crate::handlers::frames::CreateFrameRequest,
            crate::handlers::frames::FrameResponse,
            crate::handlers::inventory::StockInRequest,
            crate::handlers::inventory::StockInItemRequest,
            crate::handlers::inventory::ProcessedItemResponse,
            crate::handlers::inventory::ProcessSaleRequest,
            crate::handlers::inventory::SaleOutcomeResponse,
            common::SalesTrendPoint,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "shops", description = "Shop management endpoints"),
        (name = "frames", description = "Frame catalog endpoints"),
        (name = "inventory", description = "Inventory and sales endpoints"),
        (name = "dashboard", description = "Analytics endpoints"),
    ),
    info(
        title = "Optistock API",
        description = "Inventory and sales management backend for an eyewear distribution business",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
