use crate::handlers::{
    auth::{login, me},
    dashboard::{
        distributor::{
            low_stock_alerts, revenue_summary, sales_trends, shop_performance,
            slow_moving_inventory, top_products,
        },
        shop_owner::{shop_sales_by_day, shop_summary, shop_top_products},
    },
    frames::{
        create_frame, delete_frame, frame_choices, get_frame, get_frames, search_frames,
        update_frame, upload_frames_csv,
    },
    health::health_check,
    inventory::{
        distributor::{
            billing_report, distribute_bulk, distribution_overview, shop_inventory_detail,
            stock_in, upload_inventory_csv,
        },
        shared::{list_financial_summaries, list_shop_inventory, list_transactions},
        shop_owner::process_sale,
    },
    lens_types::{create_lens_type, delete_lens_type, get_lens_types, update_lens_type},
    shops::{create_shop, delete_shop, get_shop, get_shops, update_shop},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Authentication
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        // Shop CRUD routes (distributor only)
        .route("/api/v1/shops", post(create_shop))
        .route("/api/v1/shops", get(get_shops))
        .route("/api/v1/shops/:shop_id", get(get_shop))
        .route("/api/v1/shops/:shop_id", put(update_shop))
        .route("/api/v1/shops/:shop_id", delete(delete_shop))
        // Frame catalog routes
        .route("/api/v1/frames", post(create_frame))
        .route("/api/v1/frames", get(get_frames))
        .route("/api/v1/frames/search", get(search_frames))
        .route("/api/v1/frames/choices", get(frame_choices))
        .route("/api/v1/frames/upload-csv", post(upload_frames_csv))
        .route("/api/v1/frames/:frame_id", get(get_frame))
        .route("/api/v1/frames/:frame_id", put(update_frame))
        .route("/api/v1/frames/:frame_id", delete(delete_frame))
        // Lens type routes
        .route("/api/v1/lens-types", post(create_lens_type))
        .route("/api/v1/lens-types", get(get_lens_types))
        .route("/api/v1/lens-types/:lens_type_id", put(update_lens_type))
        .route("/api/v1/lens-types/:lens_type_id", delete(delete_lens_type))
        // Inventory: shared, role-scoped reads
        .route("/api/v1/inventory/shop-inventory", get(list_shop_inventory))
        .route("/api/v1/inventory/transactions", get(list_transactions))
        .route(
            "/api/v1/inventory/financial-summary",
            get(list_financial_summaries),
        )
        // Inventory: distributor operations
        .route("/api/v1/inventory/stock-in", post(stock_in))
        .route("/api/v1/inventory/distribution", get(distribution_overview))
        .route("/api/v1/inventory/distribution/bulk", post(distribute_bulk))
        .route(
            "/api/v1/inventory/shops/:shop_id/inventory",
            get(shop_inventory_detail),
        )
        .route(
            "/api/v1/inventory/shops/:shop_id/billing-report",
            get(billing_report),
        )
        .route("/api/v1/inventory/upload-csv", post(upload_inventory_csv))
        // Inventory: shop owner operations
        .route("/api/v1/inventory/process-sale", post(process_sale))
        // Dashboard: distributor analytics
        .route("/api/v1/dashboard/sales-trends", get(sales_trends))
        .route("/api/v1/dashboard/top-products", get(top_products))
        .route(
            "/api/v1/dashboard/slow-moving-inventory",
            get(slow_moving_inventory),
        )
        .route("/api/v1/dashboard/shop-performance", get(shop_performance))
        .route("/api/v1/dashboard/revenue-summary", get(revenue_summary))
        .route("/api/v1/dashboard/low-stock-alerts", get(low_stock_alerts))
        // Dashboard: shop owner analytics
        .route("/api/v1/dashboard/shop/summary", get(shop_summary))
        .route("/api/v1/dashboard/shop/top-products", get(shop_top_products))
        .route("/api/v1/dashboard/shop/sales-by-day", get(shop_sales_by_day))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
