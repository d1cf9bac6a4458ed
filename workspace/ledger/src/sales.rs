use chrono::NaiveDateTime;
use common::month_start;
use model::entities::{inventory_transaction, shop_inventory};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait,
};
use tracing::{info, instrument};

use crate::error::{LedgerError, Result};
use crate::summary;

/// Result of a processed sale.
#[derive(Debug, Clone)]
pub struct SaleOutcome {
    pub quantity_sold: i32,
    pub total_amount: Decimal,
    pub remaining_stock: i32,
}

/// Record a sale against a stock position owned by `shop_id`.
///
/// Atomically: bumps the position's sold counter, appends a SALE row to the
/// movement ledger (negative quantity, sale price and cost captured), and
/// folds revenue/cost into the current month's financial summary.
#[instrument(skip(db))]
pub async fn process_sale(
    db: &DatabaseConnection,
    shop_id: i32,
    shop_inventory_id: i32,
    quantity: i32,
    sale_price: Decimal,
    actor: i32,
    now: NaiveDateTime,
) -> Result<SaleOutcome> {
    if quantity < 1 {
        return Err(LedgerError::Invalid("quantity must be at least 1".to_string()));
    }
    if sale_price < Decimal::ZERO {
        return Err(LedgerError::Invalid("sale price cannot be negative".to_string()));
    }

    let txn = db.begin().await?;

    let position = shop_inventory::Entity::find_by_id(shop_inventory_id)
        .one(&txn)
        .await?
        .ok_or(LedgerError::InventoryNotFound(shop_inventory_id))?;

    if position.shop_id != shop_id {
        return Err(LedgerError::WrongShop {
            inventory_id: shop_inventory_id,
            shop_id,
        });
    }

    let available = position.quantity_remaining();
    if available < quantity {
        return Err(LedgerError::InsufficientStock {
            available,
            requested: quantity,
        });
    }

    let mut active: shop_inventory::ActiveModel = position.clone().into();
    active.quantity_sold = Set(position.quantity_sold + quantity);
    let updated = active.update(&txn).await?;

    inventory_transaction::ActiveModel {
        shop_inventory_id: Set(position.id),
        transaction_type: Set(inventory_transaction::TransactionType::Sale),
        quantity: Set(-quantity),
        unit_price: Set(Some(sale_price)),
        unit_cost: Set(Some(position.cost_per_unit)),
        notes: Set("Sale processed".to_string()),
        created_at: Set(now),
        created_by: Set(actor),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let total_amount = Decimal::from(quantity) * sale_price;
    let total_cost = Decimal::from(quantity) * position.cost_per_unit;
    summary::apply_sale(
        &txn,
        shop_id,
        month_start(now.date()),
        total_amount,
        total_cost,
        quantity,
        now,
    )
    .await?;

    txn.commit().await?;

    info!(
        shop_id,
        shop_inventory_id,
        quantity,
        %total_amount,
        "sale recorded"
    );
    Ok(SaleOutcome {
        quantity_sold: quantity,
        total_amount,
        remaining_stock: updated.quantity_remaining(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock::{stock_in, StockInItem};
    use crate::testing;
    use common::month_start;
    use model::entities::prelude::*;
    use model::entities::inventory_transaction::TransactionType;
    use sea_orm::EntityTrait;

    async fn seeded_position(ctx: &testing::Context) -> i32 {
        let items = vec![StockInItem {
            frame_id: ctx.frame_a.id,
            quantity: 10,
            cost_per_unit: "60.00".parse().unwrap(),
        }];
        stock_in(&ctx.db, ctx.shop.id, &items, ctx.distributor.id, ctx.now, "t")
            .await
            .unwrap();
        ShopInventory::find().one(&ctx.db).await.unwrap().unwrap().id
    }

    #[tokio::test]
    async fn sale_updates_position_ledger_and_summary() {
        let ctx = testing::seed().await;
        let position_id = seeded_position(&ctx).await;

        let outcome = process_sale(
            &ctx.db,
            ctx.shop.id,
            position_id,
            2,
            "120.50".parse().unwrap(),
            ctx.owner.id,
            ctx.now,
        )
        .await
        .unwrap();

        assert_eq!(outcome.quantity_sold, 2);
        assert_eq!(outcome.total_amount, "241.00".parse().unwrap());
        assert_eq!(outcome.remaining_stock, 8);

        let position = ShopInventory::find_by_id(position_id)
            .one(&ctx.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(position.quantity_sold, 2);

        let sale_rows: Vec<_> = InventoryTransaction::find()
            .all(&ctx.db)
            .await
            .unwrap()
            .into_iter()
            .filter(|t| t.transaction_type == TransactionType::Sale)
            .collect();
        assert_eq!(sale_rows.len(), 1);
        assert_eq!(sale_rows[0].quantity, -2);
        assert_eq!(sale_rows[0].unit_price, Some("120.50".parse().unwrap()));
        assert_eq!(sale_rows[0].unit_cost, Some("60.00".parse().unwrap()));

        let summary = ShopFinancialSummary::find()
            .one(&ctx.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.month, month_start(ctx.now.date()));
        assert_eq!(summary.total_revenue, "241.00".parse().unwrap());
        assert_eq!(summary.total_cost, "120.00".parse().unwrap());
        assert_eq!(summary.total_profit, "121.00".parse().unwrap());
        assert_eq!(summary.units_sold, 2);
    }

    #[tokio::test]
    async fn sale_rejects_insufficient_stock() {
        let ctx = testing::seed().await;
        let position_id = seeded_position(&ctx).await;

        let err = process_sale(
            &ctx.db,
            ctx.shop.id,
            position_id,
            11,
            "120.50".parse().unwrap(),
            ctx.owner.id,
            ctx.now,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientStock {
                available: 10,
                requested: 11
            }
        ));

        // Nothing was recorded
        let position = ShopInventory::find_by_id(position_id)
            .one(&ctx.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(position.quantity_sold, 0);
        assert!(ShopFinancialSummary::find()
            .one(&ctx.db)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn sale_rejects_foreign_shop_position() {
        let ctx = testing::seed().await;
        let position_id = seeded_position(&ctx).await;

        let err = process_sale(
            &ctx.db,
            ctx.other_shop.id,
            position_id,
            1,
            "120.50".parse().unwrap(),
            ctx.owner.id,
            ctx.now,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LedgerError::WrongShop { .. }));
    }
}
