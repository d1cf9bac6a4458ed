use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One bucket of a sales trend series.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SalesTrendPoint {
    /// Bucket label, e.g. `2025-02`, `2025-W06` or `2025-02-03`.
    pub period: String,
    /// Units sold in the bucket.
    pub sales_count: i64,
    pub total_revenue: Decimal,
}

/// A top-selling frame with its sale volume.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TopProduct {
    pub frame_name: String,
    pub product_id: String,
    pub sales_count: i64,
    pub total_revenue: Decimal,
}

/// A stock position that has not been restocked recently.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SlowMovingItem {
    pub shop_inventory_id: i32,
    pub frame_name: String,
    pub product_id: String,
    pub frame_price: Decimal,
    pub shop_id: i32,
    pub shop_name: String,
    pub quantity_remaining: i32,
    pub last_restocked: NaiveDate,
    pub days_since_restock: i64,
}

/// Per-shop comparison row for the distributor dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShopPerformance {
    pub shop_id: i32,
    pub shop_name: String,
    pub owner_name: String,
    pub total_sales: i64,
    pub total_revenue: Decimal,
    pub avg_sale_value: Decimal,
    pub total_inventory_value: Decimal,
    pub total_items_in_stock: i64,
    pub low_stock_items: i64,
    pub total_profit: Decimal,
    pub total_cost: Decimal,
}

/// Overall totals for a revenue summary window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RevenueTotals {
    pub total_sales: i64,
    pub total_revenue: Decimal,
    pub avg_sale_value: Decimal,
}

/// Revenue attributed to one shop inside a summary window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShopRevenue {
    pub shop_id: i32,
    pub shop_name: String,
    pub total_sales: i64,
    pub total_revenue: Decimal,
    pub avg_sale_value: Decimal,
}

/// One month of the revenue trend inside a summary window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RevenueTrendPoint {
    pub month: String,
    pub total_sales: i64,
    pub total_revenue: Decimal,
}

/// Revenue summary: overall totals, a per-shop ranking and the monthly
/// trend, all over the same window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RevenueSummaryReport {
    pub overall_summary: RevenueTotals,
    pub shop_revenue: Vec<ShopRevenue>,
    pub revenue_trends: Vec<RevenueTrendPoint>,
}

/// A position below the low-stock threshold.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LowStockItem {
    pub frame_name: String,
    pub product_id: String,
    pub quantity_remaining: i32,
    pub quantity_sold: i32,
    pub quantity_received: i32,
    pub frame_price: Decimal,
    pub last_restocked: NaiveDate,
}

/// Low-stock positions grouped by shop.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShopLowStockAlert {
    pub shop_id: i32,
    pub shop_name: String,
    pub items: Vec<LowStockItem>,
}

/// The full low-stock alert payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LowStockReport {
    pub threshold: i32,
    pub total_low_stock_items: usize,
    pub shops_affected: usize,
    pub shop_alerts: Vec<ShopLowStockAlert>,
}

/// One frame's line on a monthly bill.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BillingLine {
    pub product_id: String,
    pub frame_name: String,
    pub quantity_sold: i64,
    pub total_cost: Decimal,
}

/// What a shop owes the distributor for one month's sales.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BillingReport {
    pub shop_name: String,
    /// Month label, `YYYY-MM`.
    pub month: String,
    pub total_amount_due: Decimal,
    pub items: Vec<BillingLine>,
}

/// A shop's monthly financial rollup as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FinancialSnapshot {
    pub shop_id: i32,
    pub month: NaiveDate,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    pub amount_to_pay_distributor: Decimal,
    pub units_sold: i32,
}

/// Month-to-date headline numbers for a shop owner's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShopSalesSummary {
    pub shop_name: String,
    pub total_sales_current_month: i64,
    pub total_revenue_current_month: Decimal,
    pub items_in_stock: i64,
}
