use chrono::{NaiveDate, NaiveDateTime};
use model::entities::shop_financial_summary;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;

use crate::error::Result;

/// Fetch the financial summary row for `(shop, month)`, creating a zeroed
/// one if it does not exist yet.
pub async fn get_or_create_month<C: ConnectionTrait>(
    conn: &C,
    shop_id: i32,
    month: NaiveDate,
    now: NaiveDateTime,
) -> Result<shop_financial_summary::Model> {
    let existing = shop_financial_summary::Entity::find()
        .filter(shop_financial_summary::Column::ShopId.eq(shop_id))
        .filter(shop_financial_summary::Column::Month.eq(month))
        .one(conn)
        .await?;

    if let Some(summary) = existing {
        return Ok(summary);
    }

    debug!(shop_id, %month, "creating financial summary row");
    let created = shop_financial_summary::ActiveModel {
        shop_id: Set(shop_id),
        month: Set(month),
        total_revenue: Set(Decimal::ZERO),
        total_cost: Set(Decimal::ZERO),
        total_profit: Set(Decimal::ZERO),
        amount_to_pay_distributor: Set(Decimal::ZERO),
        units_sold: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    Ok(created)
}

/// Fold one sale into the month's rollup: revenue and cost move the profit
/// and the amount owed to the distributor in lockstep.
pub(crate) async fn apply_sale<C: ConnectionTrait>(
    conn: &C,
    shop_id: i32,
    month: NaiveDate,
    sale_amount: Decimal,
    cost: Decimal,
    units: i32,
    now: NaiveDateTime,
) -> Result<shop_financial_summary::Model> {
    let summary = get_or_create_month(conn, shop_id, month, now).await?;

    let mut active: shop_financial_summary::ActiveModel = summary.clone().into();
    active.total_revenue = Set(summary.total_revenue + sale_amount);
    active.total_cost = Set(summary.total_cost + cost);
    active.total_profit = Set(summary.total_profit + (sale_amount - cost));
    active.amount_to_pay_distributor = Set(summary.amount_to_pay_distributor + cost);
    active.units_sold = Set(summary.units_sold + units);
    active.updated_at = Set(now);

    Ok(active.update(conn).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use common::month_start;
    use model::entities::prelude::*;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let ctx = testing::seed().await;
        let month = month_start(ctx.now.date());

        let first = get_or_create_month(&ctx.db, ctx.shop.id, month, ctx.now)
            .await
            .unwrap();
        let second = get_or_create_month(&ctx.db, ctx.shop.id, month, ctx.now)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(
            ShopFinancialSummary::find().all(&ctx.db).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn apply_sale_accumulates() {
        let ctx = testing::seed().await;
        let month = month_start(ctx.now.date());

        apply_sale(
            &ctx.db,
            ctx.shop.id,
            month,
            "100.00".parse().unwrap(),
            "60.00".parse().unwrap(),
            2,
            ctx.now,
        )
        .await
        .unwrap();
        let summary = apply_sale(
            &ctx.db,
            ctx.shop.id,
            month,
            "50.00".parse().unwrap(),
            "30.00".parse().unwrap(),
            1,
            ctx.now,
        )
        .await
        .unwrap();

        assert_eq!(summary.total_revenue, "150.00".parse().unwrap());
        assert_eq!(summary.total_cost, "90.00".parse().unwrap());
        assert_eq!(summary.total_profit, "60.00".parse().unwrap());
        assert_eq!(summary.amount_to_pay_distributor, "90.00".parse().unwrap());
        assert_eq!(summary.units_sold, 3);
    }
}
