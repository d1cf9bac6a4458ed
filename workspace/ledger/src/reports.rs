//! Read-side aggregations for the dashboard and billing endpoints.
//!
//! All reports are computed from the SALE rows of the movement ledger and
//! the current stock positions. Rows are fetched once and folded in memory;
//! the datasets are per-tenant and small enough that pushing the grouping
//! into SQL buys nothing but dialect trouble.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use common::{
    BillingLine, BillingReport, LowStockItem, LowStockReport, RevenueSummaryReport, RevenueTotals,
    RevenueTrendPoint, SalesTrendPoint, ShopLowStockAlert, ShopPerformance, ShopRevenue,
    ShopSalesSummary, SlowMovingItem, SummaryPeriod, TopProduct, TrendInterval,
};
use model::entities::{
    frame, inventory_transaction, shop, shop_financial_summary, shop_inventory,
};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use tracing::instrument;

use crate::error::{LedgerError, Result};

/// One sale movement resolved against its stock position.
#[derive(Debug, Clone)]
struct SaleRow {
    units: i64,
    revenue: Decimal,
    cost: Decimal,
    created_at: NaiveDateTime,
    shop_id: i32,
    frame_id: i32,
}

/// Load SALE ledger rows, optionally bounded by time and shop, with the
/// owning shop and frame resolved through the stock position.
async fn sale_rows(
    db: &DatabaseConnection,
    since: Option<NaiveDateTime>,
    shop_id: Option<i32>,
) -> Result<Vec<SaleRow>> {
    let mut query = inventory_transaction::Entity::find().filter(
        inventory_transaction::Column::TransactionType
            .eq(inventory_transaction::TransactionType::Sale),
    );
    if let Some(since) = since {
        query = query.filter(inventory_transaction::Column::CreatedAt.gte(since));
    }
    let movements = query.all(db).await?;
    if movements.is_empty() {
        return Ok(Vec::new());
    }

    let position_ids: HashSet<i32> = movements.iter().map(|t| t.shop_inventory_id).collect();
    let positions: HashMap<i32, (i32, i32)> = shop_inventory::Entity::find()
        .filter(shop_inventory::Column::Id.is_in(position_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, (p.shop_id, p.frame_id)))
        .collect();

    let rows = movements
        .into_iter()
        .filter_map(|t| {
            let (row_shop_id, frame_id) = *positions.get(&t.shop_inventory_id)?;
            if shop_id.is_some_and(|wanted| wanted != row_shop_id) {
                return None;
            }
            let units = i64::from(-t.quantity);
            Some(SaleRow {
                units,
                revenue: t.unit_price.unwrap_or(Decimal::ZERO) * Decimal::from(units),
                cost: t.unit_cost.unwrap_or(Decimal::ZERO) * Decimal::from(units),
                created_at: t.created_at,
                shop_id: row_shop_id,
                frame_id,
            })
        })
        .collect();
    Ok(rows)
}

async fn frame_names(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, frame::Model>> {
    let ids: HashSet<i32> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(frame::Entity::find()
        .filter(frame::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect())
}

async fn require_shop(db: &DatabaseConnection, shop_id: i32) -> Result<shop::Model> {
    shop::Entity::find_by_id(shop_id)
        .one(db)
        .await?
        .ok_or(LedgerError::ShopNotFound(shop_id))
}

fn average(revenue: Decimal, units: i64) -> Decimal {
    if units > 0 {
        (revenue / Decimal::from(units)).round_dp(2)
    } else {
        Decimal::ZERO
    }
}

/// Units sold and revenue, bucketed by day, ISO week or month.
#[instrument(skip(db))]
pub async fn sales_trends(
    db: &DatabaseConnection,
    interval: TrendInterval,
) -> Result<Vec<SalesTrendPoint>> {
    let rows = sale_rows(db, None, None).await?;

    let mut buckets: BTreeMap<String, (i64, Decimal)> = BTreeMap::new();
    for row in rows {
        let label = interval.bucket_label(row.created_at.date());
        let entry = buckets.entry(label).or_insert((0, Decimal::ZERO));
        entry.0 += row.units;
        entry.1 += row.revenue;
    }

    Ok(buckets
        .into_iter()
        .map(|(period, (sales_count, total_revenue))| SalesTrendPoint {
            period,
            sales_count,
            total_revenue,
        })
        .collect())
}

/// Best-selling frames across all shops, by units sold.
#[instrument(skip(db))]
pub async fn top_products(db: &DatabaseConnection, limit: usize) -> Result<Vec<TopProduct>> {
    let rows = sale_rows(db, None, None).await?;
    top_products_from(db, rows, limit).await
}

/// Best-selling frames for a single shop.
#[instrument(skip(db))]
pub async fn shop_top_products(
    db: &DatabaseConnection,
    shop_id: i32,
    limit: usize,
) -> Result<Vec<TopProduct>> {
    require_shop(db, shop_id).await?;
    let rows = sale_rows(db, None, Some(shop_id)).await?;
    top_products_from(db, rows, limit).await
}

async fn top_products_from(
    db: &DatabaseConnection,
    rows: Vec<SaleRow>,
    limit: usize,
) -> Result<Vec<TopProduct>> {
    let mut per_frame: HashMap<i32, (i64, Decimal)> = HashMap::new();
    for row in &rows {
        let entry = per_frame.entry(row.frame_id).or_insert((0, Decimal::ZERO));
        entry.0 += row.units;
        entry.1 += row.revenue;
    }

    let frames = frame_names(db, per_frame.keys().copied()).await?;
    let mut products: Vec<TopProduct> = per_frame
        .into_iter()
        .filter_map(|(frame_id, (sales_count, total_revenue))| {
            let frame = frames.get(&frame_id)?;
            Some(TopProduct {
                frame_name: frame.name.clone(),
                product_id: frame.product_id.clone(),
                sales_count,
                total_revenue,
            })
        })
        .collect();
    products.sort_by(|a, b| b.sales_count.cmp(&a.sales_count));
    products.truncate(limit);
    Ok(products)
}

/// Stock positions not restocked within `days_threshold` days.
#[instrument(skip(db))]
pub async fn slow_moving_inventory(
    db: &DatabaseConnection,
    days_threshold: i64,
    today: NaiveDate,
) -> Result<Vec<SlowMovingItem>> {
    let cutoff = today - chrono::Duration::days(days_threshold);
    let positions = shop_inventory::Entity::find().all(db).await?;

    let mut stale: Vec<&shop_inventory::Model> = positions
        .iter()
        .filter(|p| p.last_restocked.date() < cutoff)
        .collect();
    stale.sort_by_key(|p| p.last_restocked);

    let frames = frame_names(db, stale.iter().map(|p| p.frame_id)).await?;
    let shops: HashMap<i32, shop::Model> = shop::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    Ok(stale
        .into_iter()
        .filter_map(|p| {
            let frame = frames.get(&p.frame_id)?;
            let shop = shops.get(&p.shop_id)?;
            let restocked = p.last_restocked.date();
            Some(SlowMovingItem {
                shop_inventory_id: p.id,
                frame_name: frame.name.clone(),
                product_id: frame.product_id.clone(),
                frame_price: frame.price,
                shop_id: shop.id,
                shop_name: shop.name.clone(),
                quantity_remaining: p.quantity_remaining(),
                last_restocked: restocked,
                days_since_restock: (today - restocked).num_days(),
            })
        })
        .collect())
}

/// Compare every shop's sales, inventory and financials over the period.
#[instrument(skip(db))]
pub async fn shop_performance(
    db: &DatabaseConnection,
    period: SummaryPeriod,
    today: NaiveDate,
) -> Result<Vec<ShopPerformance>> {
    let start = period
        .start(today)
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid");

    let rows = sale_rows(db, Some(start), None).await?;
    let mut sales_by_shop: HashMap<i32, (i64, Decimal)> = HashMap::new();
    for row in &rows {
        let entry = sales_by_shop.entry(row.shop_id).or_insert((0, Decimal::ZERO));
        entry.0 += row.units;
        entry.1 += row.revenue;
    }

    let positions = shop_inventory::Entity::find().all(db).await?;
    let frames = frame_names(db, positions.iter().map(|p| p.frame_id)).await?;
    let mut stock_by_shop: HashMap<i32, (Decimal, i64, i64)> = HashMap::new();
    for p in &positions {
        let price = frames.get(&p.frame_id).map(|f| f.price).unwrap_or(Decimal::ZERO);
        let remaining = i64::from(p.quantity_remaining());
        let entry = stock_by_shop
            .entry(p.shop_id)
            .or_insert((Decimal::ZERO, 0, 0));
        entry.0 += Decimal::from(remaining) * price;
        entry.1 += remaining;
        if p.quantity_remaining() < 5 {
            entry.2 += 1;
        }
    }

    let summaries = shop_financial_summary::Entity::find()
        .filter(shop_financial_summary::Column::Month.gte(period.start(today)))
        .all(db)
        .await?;
    let mut financials_by_shop: HashMap<i32, (Decimal, Decimal)> = HashMap::new();
    for s in summaries {
        let entry = financials_by_shop
            .entry(s.shop_id)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += s.total_profit;
        entry.1 += s.total_cost;
    }

    let shops = shop::Entity::find().all(db).await?;
    let mut performance: Vec<ShopPerformance> = shops
        .into_iter()
        .map(|s| {
            let (total_sales, total_revenue) =
                sales_by_shop.get(&s.id).copied().unwrap_or((0, Decimal::ZERO));
            let (inventory_value, in_stock, low_stock) = stock_by_shop
                .get(&s.id)
                .copied()
                .unwrap_or((Decimal::ZERO, 0, 0));
            let (profit, cost) = financials_by_shop
                .get(&s.id)
                .copied()
                .unwrap_or((Decimal::ZERO, Decimal::ZERO));
            ShopPerformance {
                shop_id: s.id,
                shop_name: s.name,
                owner_name: s.owner_name,
                total_sales,
                total_revenue,
                avg_sale_value: average(total_revenue, total_sales),
                total_inventory_value: inventory_value,
                total_items_in_stock: in_stock,
                low_stock_items: low_stock,
                total_profit: profit,
                total_cost: cost,
            }
        })
        .collect();
    performance.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    Ok(performance)
}

/// Overall, per-shop and per-month revenue inside the period.
#[instrument(skip(db))]
pub async fn revenue_summary(
    db: &DatabaseConnection,
    period: SummaryPeriod,
    today: NaiveDate,
) -> Result<RevenueSummaryReport> {
    let start = period
        .start(today)
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid");
    let rows = sale_rows(db, Some(start), None).await?;

    let mut total_sales = 0;
    let mut total_revenue = Decimal::ZERO;
    let mut per_shop: HashMap<i32, (i64, Decimal)> = HashMap::new();
    let mut per_month: BTreeMap<String, (i64, Decimal)> = BTreeMap::new();
    for row in &rows {
        total_sales += row.units;
        total_revenue += row.revenue;

        let shop_entry = per_shop.entry(row.shop_id).or_insert((0, Decimal::ZERO));
        shop_entry.0 += row.units;
        shop_entry.1 += row.revenue;

        let label = TrendInterval::Month.bucket_label(row.created_at.date());
        let month_entry = per_month.entry(label).or_insert((0, Decimal::ZERO));
        month_entry.0 += row.units;
        month_entry.1 += row.revenue;
    }

    let shops: HashMap<i32, shop::Model> = shop::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();
    let mut shop_revenue: Vec<ShopRevenue> = per_shop
        .into_iter()
        .filter_map(|(shop_id, (sales, revenue))| {
            let shop = shops.get(&shop_id)?;
            Some(ShopRevenue {
                shop_id,
                shop_name: shop.name.clone(),
                total_sales: sales,
                total_revenue: revenue,
                avg_sale_value: average(revenue, sales),
            })
        })
        .collect();
    shop_revenue.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));

    Ok(RevenueSummaryReport {
        overall_summary: RevenueTotals {
            total_sales,
            total_revenue,
            avg_sale_value: average(total_revenue, total_sales),
        },
        shop_revenue,
        revenue_trends: per_month
            .into_iter()
            .map(|(month, (sales, revenue))| RevenueTrendPoint {
                month,
                total_sales: sales,
                total_revenue: revenue,
            })
            .collect(),
    })
}

/// Positions with fewer than `threshold` units remaining, grouped by shop.
#[instrument(skip(db))]
pub async fn low_stock_alerts(db: &DatabaseConnection, threshold: i32) -> Result<LowStockReport> {
    let positions = shop_inventory::Entity::find().all(db).await?;
    let mut low: Vec<&shop_inventory::Model> = positions
        .iter()
        .filter(|p| p.quantity_remaining() < threshold)
        .collect();
    low.sort_by_key(|p| p.quantity_remaining());

    let frames = frame_names(db, low.iter().map(|p| p.frame_id)).await?;
    let shops: HashMap<i32, shop::Model> = shop::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let mut grouped: BTreeMap<String, ShopLowStockAlert> = BTreeMap::new();
    let mut total = 0;
    for p in low {
        let (Some(frame), Some(shop)) = (frames.get(&p.frame_id), shops.get(&p.shop_id)) else {
            continue;
        };
        total += 1;
        grouped
            .entry(shop.name.clone())
            .or_insert_with(|| ShopLowStockAlert {
                shop_id: shop.id,
                shop_name: shop.name.clone(),
                items: Vec::new(),
            })
            .items
            .push(LowStockItem {
                frame_name: frame.name.clone(),
                product_id: frame.product_id.clone(),
                quantity_remaining: p.quantity_remaining(),
                quantity_sold: p.quantity_sold,
                quantity_received: p.quantity_received,
                frame_price: frame.price,
                last_restocked: p.last_restocked.date(),
            });
    }

    let shop_alerts: Vec<ShopLowStockAlert> = grouped.into_values().collect();
    Ok(LowStockReport {
        threshold,
        total_low_stock_items: total,
        shops_affected: shop_alerts.len(),
        shop_alerts,
    })
}

/// What one shop owes for one month, aggregated per frame from the SALE
/// ledger rows of that month.
#[instrument(skip(db))]
pub async fn billing_report(
    db: &DatabaseConnection,
    shop_id: i32,
    month: NaiveDate,
) -> Result<BillingReport> {
    let shop = require_shop(db, shop_id).await?;

    let month = common::month_start(month);
    let next_month = if month.month() == 12 {
        NaiveDate::from_ymd_opt(month.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(month.year(), month.month() + 1, 1)
    }
    .expect("first day of month is always valid");

    let start = month.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    let end = next_month
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid");

    let rows: Vec<SaleRow> = sale_rows(db, Some(start), Some(shop_id))
        .await?
        .into_iter()
        .filter(|r| r.created_at < end)
        .collect();

    let mut per_frame: HashMap<i32, (i64, Decimal)> = HashMap::new();
    let mut total_amount_due = Decimal::ZERO;
    for row in &rows {
        let entry = per_frame.entry(row.frame_id).or_insert((0, Decimal::ZERO));
        entry.0 += row.units;
        entry.1 += row.cost;
        total_amount_due += row.cost;
    }

    let frames = frame_names(db, per_frame.keys().copied()).await?;
    let mut items: Vec<BillingLine> = per_frame
        .into_iter()
        .filter_map(|(frame_id, (quantity_sold, total_cost))| {
            let frame = frames.get(&frame_id)?;
            Some(BillingLine {
                product_id: frame.product_id.clone(),
                frame_name: frame.name.clone(),
                quantity_sold,
                total_cost,
            })
        })
        .collect();
    items.sort_by(|a, b| a.product_id.cmp(&b.product_id));

    Ok(BillingReport {
        shop_name: shop.name,
        month: month.format("%Y-%m").to_string(),
        total_amount_due,
        items,
    })
}

/// Month-to-date headline numbers for a shop owner's dashboard.
#[instrument(skip(db))]
pub async fn shop_sales_summary(
    db: &DatabaseConnection,
    shop_id: i32,
    today: NaiveDate,
) -> Result<ShopSalesSummary> {
    let shop = require_shop(db, shop_id).await?;

    let start = common::month_start(today)
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid");
    let rows = sale_rows(db, Some(start), Some(shop_id)).await?;

    let total_sales: i64 = rows.iter().map(|r| r.units).sum();
    let total_revenue: Decimal = rows.iter().map(|r| r.revenue).sum();

    let items_in_stock: i64 = shop_inventory::Entity::find()
        .filter(shop_inventory::Column::ShopId.eq(shop_id))
        .all(db)
        .await?
        .iter()
        .map(|p| i64::from(p.quantity_remaining()))
        .sum();

    Ok(ShopSalesSummary {
        shop_name: shop.name,
        total_sales_current_month: total_sales,
        total_revenue_current_month: total_revenue,
        items_in_stock,
    })
}

/// Units sold per day for one shop over the trailing `days` days.
#[instrument(skip(db))]
pub async fn shop_sales_by_day(
    db: &DatabaseConnection,
    shop_id: i32,
    days: i64,
    today: NaiveDate,
) -> Result<Vec<SalesTrendPoint>> {
    require_shop(db, shop_id).await?;

    let start = (today - chrono::Duration::days(days))
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid");
    let rows = sale_rows(db, Some(start), Some(shop_id)).await?;

    let mut buckets: BTreeMap<String, (i64, Decimal)> = BTreeMap::new();
    for row in rows {
        let label = TrendInterval::Day.bucket_label(row.created_at.date());
        let entry = buckets.entry(label).or_insert((0, Decimal::ZERO));
        entry.0 += row.units;
        entry.1 += row.revenue;
    }

    Ok(buckets
        .into_iter()
        .map(|(period, (sales_count, total_revenue))| SalesTrendPoint {
            period,
            sales_count,
            total_revenue,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::process_sale;
    use crate::stock::{stock_in, StockInItem};
    use crate::testing::{self, ts};
    use model::entities::prelude::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    /// Stock both shops and record a few sales across two months.
    async fn seed_sales(ctx: &testing::Context) {
        let items = vec![
            StockInItem {
                frame_id: ctx.frame_a.id,
                quantity: 20,
                cost_per_unit: dec("60.00"),
            },
            StockInItem {
                frame_id: ctx.frame_b.id,
                quantity: 10,
                cost_per_unit: dec("40.00"),
            },
        ];
        stock_in(
            &ctx.db,
            ctx.shop.id,
            &items,
            ctx.distributor.id,
            ts(2025, 5, 1),
            "t",
        )
        .await
        .unwrap();
        stock_in(
            &ctx.db,
            ctx.other_shop.id,
            &items[..1],
            ctx.distributor.id,
            ts(2025, 5, 1),
            "t",
        )
        .await
        .unwrap();

        let positions = ShopInventory::find().all(&ctx.db).await.unwrap();
        let pos = |shop: i32, frame: i32| {
            positions
                .iter()
                .find(|p| p.shop_id == shop && p.frame_id == frame)
                .unwrap()
                .id
        };

        // May: 2 aviators + 1 round in shop one
        process_sale(
            &ctx.db,
            ctx.shop.id,
            pos(ctx.shop.id, ctx.frame_a.id),
            2,
            dec("120.50"),
            ctx.owner.id,
            ts(2025, 5, 10),
        )
        .await
        .unwrap();
        process_sale(
            &ctx.db,
            ctx.shop.id,
            pos(ctx.shop.id, ctx.frame_b.id),
            1,
            dec("80.00"),
            ctx.owner.id,
            ts(2025, 5, 12),
        )
        .await
        .unwrap();
        // June: 3 aviators in shop one, 1 in shop two
        process_sale(
            &ctx.db,
            ctx.shop.id,
            pos(ctx.shop.id, ctx.frame_a.id),
            3,
            dec("120.50"),
            ctx.owner.id,
            ts(2025, 6, 2),
        )
        .await
        .unwrap();
        process_sale(
            &ctx.db,
            ctx.other_shop.id,
            pos(ctx.other_shop.id, ctx.frame_a.id),
            1,
            dec("125.00"),
            ctx.owner.id,
            ts(2025, 6, 3),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn trends_bucket_by_month() {
        let ctx = testing::seed().await;
        seed_sales(&ctx).await;

        let trends = sales_trends(&ctx.db, TrendInterval::Month).await.unwrap();
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].period, "2025-05");
        assert_eq!(trends[0].sales_count, 3);
        assert_eq!(trends[0].total_revenue, dec("321.00"));
        assert_eq!(trends[1].period, "2025-06");
        assert_eq!(trends[1].sales_count, 4);
        assert_eq!(trends[1].total_revenue, dec("486.50"));
    }

    #[tokio::test]
    async fn top_products_ranked_by_units() {
        let ctx = testing::seed().await;
        seed_sales(&ctx).await;

        let products = top_products(&ctx.db, 10).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_id, "AV-001");
        assert_eq!(products[0].sales_count, 6);
        assert_eq!(products[1].product_id, "RN-010");
        assert_eq!(products[1].sales_count, 1);

        let limited = top_products(&ctx.db, 1).await.unwrap();
        assert_eq!(limited.len(), 1);

        let per_shop = shop_top_products(&ctx.db, ctx.other_shop.id, 10)
            .await
            .unwrap();
        assert_eq!(per_shop.len(), 1);
        assert_eq!(per_shop[0].sales_count, 1);
    }

    #[tokio::test]
    async fn revenue_summary_overall_and_per_shop() {
        let ctx = testing::seed().await;
        seed_sales(&ctx).await;

        // Year window from mid-June sees everything
        let report = revenue_summary(&ctx.db, SummaryPeriod::Year, ts(2025, 6, 15).date())
            .await
            .unwrap();
        assert_eq!(report.overall_summary.total_sales, 7);
        assert_eq!(report.overall_summary.total_revenue, dec("807.50"));
        assert_eq!(report.shop_revenue.len(), 2);
        assert_eq!(report.shop_revenue[0].shop_id, ctx.shop.id);
        assert_eq!(report.revenue_trends.len(), 2);

        // Month window only sees June
        let june = revenue_summary(&ctx.db, SummaryPeriod::Month, ts(2025, 6, 15).date())
            .await
            .unwrap();
        assert_eq!(june.overall_summary.total_sales, 4);
        assert_eq!(june.overall_summary.total_revenue, dec("486.50"));
    }

    #[tokio::test]
    async fn low_stock_and_slow_movers() {
        let ctx = testing::seed().await;
        seed_sales(&ctx).await;

        // Shop two has 19 aviators left; shop one has 15 + 9
        let report = low_stock_alerts(&ctx.db, 10).await.unwrap();
        assert_eq!(report.total_low_stock_items, 1);
        assert_eq!(report.shops_affected, 1);
        assert_eq!(report.shop_alerts[0].items[0].product_id, "RN-010");
        assert_eq!(report.shop_alerts[0].items[0].quantity_remaining, 9);

        // Positions were last restocked 2025-05-01
        let stale = slow_moving_inventory(&ctx.db, 30, ts(2025, 7, 1).date())
            .await
            .unwrap();
        assert_eq!(stale.len(), 3);
        assert_eq!(stale[0].days_since_restock, 61);

        let fresh = slow_moving_inventory(&ctx.db, 90, ts(2025, 7, 1).date())
            .await
            .unwrap();
        assert!(fresh.is_empty());
    }

    #[tokio::test]
    async fn shop_performance_ranks_by_revenue() {
        let ctx = testing::seed().await;
        seed_sales(&ctx).await;

        let performance = shop_performance(&ctx.db, SummaryPeriod::Year, ts(2025, 6, 15).date())
            .await
            .unwrap();
        assert_eq!(performance.len(), 2);
        assert_eq!(performance[0].shop_id, ctx.shop.id);
        assert_eq!(performance[0].total_sales, 6);
        assert_eq!(performance[0].total_revenue, dec("682.50"));
        assert_eq!(performance[0].avg_sale_value, dec("113.75"));
        // 15 aviators at 120.50 + 9 rounds at 80.00 remain in shop one
        assert_eq!(performance[0].total_items_in_stock, 24);
        assert_eq!(performance[0].total_inventory_value, dec("2527.50"));
        assert_eq!(performance[1].shop_id, ctx.other_shop.id);
        assert_eq!(performance[1].total_sales, 1);
    }

    #[tokio::test]
    async fn billing_report_aggregates_month_cost() {
        let ctx = testing::seed().await;
        seed_sales(&ctx).await;

        let may = billing_report(&ctx.db, ctx.shop.id, ts(2025, 5, 20).date())
            .await
            .unwrap();
        assert_eq!(may.month, "2025-05");
        // 2 aviators at 60.00 + 1 round at 40.00
        assert_eq!(may.total_amount_due, dec("160.00"));
        assert_eq!(may.items.len(), 2);

        let june = billing_report(&ctx.db, ctx.shop.id, ts(2025, 6, 20).date())
            .await
            .unwrap();
        assert_eq!(june.total_amount_due, dec("180.00"));
        assert_eq!(june.items.len(), 1);

        let missing = billing_report(&ctx.db, 777, ts(2025, 6, 20).date()).await;
        assert!(matches!(missing, Err(LedgerError::ShopNotFound(777))));
    }

    #[tokio::test]
    async fn shop_owner_dashboard_numbers() {
        let ctx = testing::seed().await;
        seed_sales(&ctx).await;

        let summary = shop_sales_summary(&ctx.db, ctx.shop.id, ts(2025, 6, 15).date())
            .await
            .unwrap();
        assert_eq!(summary.total_sales_current_month, 3);
        assert_eq!(summary.total_revenue_current_month, dec("361.50"));
        assert_eq!(summary.items_in_stock, 24);
        assert_eq!(summary.shop_name, "Downtown Optics");

        let daily = shop_sales_by_day(&ctx.db, ctx.shop.id, 30, ts(2025, 6, 15).date())
            .await
            .unwrap();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].period, "2025-06-02");
        assert_eq!(daily[0].sales_count, 3);
    }
}
