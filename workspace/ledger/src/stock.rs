use chrono::NaiveDateTime;
use model::entities::{frame, inventory_transaction, shop, shop_inventory};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::error::{LedgerError, Result};

/// One line of a stock-in request.
#[derive(Debug, Clone)]
pub struct StockInItem {
    pub frame_id: i32,
    pub quantity: i32,
    pub cost_per_unit: Decimal,
}

/// What happened to one line of a stock-in request.
#[derive(Debug, Clone)]
pub struct ProcessedItem {
    pub frame_id: i32,
    pub frame_name: String,
    pub product_id: String,
    pub quantity_added: i32,
    pub cost_per_unit: Decimal,
    /// Total units received for this position after the operation.
    pub new_total: i32,
    /// True when the position was created by this operation.
    pub inventory_created: bool,
}

/// Stock destined for one shop inside a bulk distribution.
#[derive(Debug, Clone)]
pub struct ShopDistribution {
    pub shop_id: i32,
    pub items: Vec<StockInItem>,
}

/// Per-shop result of a bulk distribution.
#[derive(Debug, Clone)]
pub struct DistributionShopResult {
    pub shop_id: i32,
    pub shop_name: String,
    pub items_processed: Vec<ProcessedItem>,
    pub total_items: i32,
}

/// Result of a whole bulk distribution run.
#[derive(Debug, Clone)]
pub struct DistributionOutcome {
    pub total_items_distributed: i32,
    pub shops_updated: usize,
    pub results: Vec<DistributionShopResult>,
}

/// Receive stock into one shop. The whole batch is applied inside a single
/// transaction; any unknown shop/frame or invalid line aborts everything.
#[instrument(skip(db, items))]
pub async fn stock_in(
    db: &DatabaseConnection,
    shop_id: i32,
    items: &[StockInItem],
    actor: i32,
    now: NaiveDateTime,
    notes: &str,
) -> Result<Vec<ProcessedItem>> {
    if items.is_empty() {
        return Err(LedgerError::Invalid("no items provided".to_string()));
    }

    let txn = db.begin().await?;
    let shop = require_shop(&txn, shop_id).await?;
    let processed = apply_stock_in(&txn, &shop, items, actor, now, notes).await?;
    txn.commit().await?;

    info!(
        shop_id,
        lines = processed.len(),
        "stock-in applied"
    );
    Ok(processed)
}

/// Distribute stock to multiple shops in one transaction. Mirrors
/// `stock_in` per shop; a failure for any shop rolls back the entire run.
#[instrument(skip(db, distributions))]
pub async fn distribute_bulk(
    db: &DatabaseConnection,
    distributions: &[ShopDistribution],
    actor: i32,
    now: NaiveDateTime,
) -> Result<DistributionOutcome> {
    if distributions.is_empty() {
        return Err(LedgerError::Invalid("no distributions provided".to_string()));
    }

    let txn = db.begin().await?;

    let mut results = Vec::with_capacity(distributions.len());
    let mut total_items_distributed = 0;

    for distribution in distributions {
        if distribution.items.is_empty() {
            return Err(LedgerError::Invalid(
                "each distribution must have shop_id and items".to_string(),
            ));
        }

        let shop = require_shop(&txn, distribution.shop_id).await?;
        let items_processed = apply_stock_in(
            &txn,
            &shop,
            &distribution.items,
            actor,
            now,
            "Bulk distribution",
        )
        .await?;

        let total_items: i32 = items_processed.iter().map(|i| i.quantity_added).sum();
        total_items_distributed += total_items;
        results.push(DistributionShopResult {
            shop_id: shop.id,
            shop_name: shop.name,
            items_processed,
            total_items,
        });
    }

    txn.commit().await?;

    info!(
        total_items_distributed,
        shops = results.len(),
        "bulk distribution applied"
    );
    Ok(DistributionOutcome {
        total_items_distributed,
        shops_updated: results.len(),
        results,
    })
}

async fn require_shop<C: ConnectionTrait>(conn: &C, shop_id: i32) -> Result<shop::Model> {
    shop::Entity::find_by_id(shop_id)
        .one(conn)
        .await?
        .ok_or(LedgerError::ShopNotFound(shop_id))
}

/// Upsert the stock positions and append the STOCK_IN ledger rows for one
/// shop. Runs inside the caller's transaction.
async fn apply_stock_in<C: ConnectionTrait>(
    conn: &C,
    shop: &shop::Model,
    items: &[StockInItem],
    actor: i32,
    now: NaiveDateTime,
    notes: &str,
) -> Result<Vec<ProcessedItem>> {
    let mut processed = Vec::with_capacity(items.len());

    for item in items {
        if item.quantity <= 0 {
            return Err(LedgerError::Invalid("quantity must be positive".to_string()));
        }
        if item.cost_per_unit <= Decimal::ZERO {
            return Err(LedgerError::Invalid(
                "cost per unit must be positive".to_string(),
            ));
        }

        let frame = frame::Entity::find_by_id(item.frame_id)
            .one(conn)
            .await?
            .ok_or(LedgerError::FrameNotFound(item.frame_id))?;

        let existing = shop_inventory::Entity::find()
            .filter(shop_inventory::Column::ShopId.eq(shop.id))
            .filter(shop_inventory::Column::FrameId.eq(frame.id))
            .one(conn)
            .await?;

        let (position, created) = match existing {
            Some(position) => {
                debug!(
                    shop_id = shop.id,
                    frame_id = frame.id,
                    added = item.quantity,
                    "topping up existing position"
                );
                let mut active: shop_inventory::ActiveModel = position.clone().into();
                active.quantity_received = Set(position.quantity_received + item.quantity);
                active.cost_per_unit = Set(item.cost_per_unit);
                active.last_restocked = Set(now);
                (active.update(conn).await?, false)
            }
            None => {
                debug!(
                    shop_id = shop.id,
                    frame_id = frame.id,
                    quantity = item.quantity,
                    "creating new position"
                );
                let active = shop_inventory::ActiveModel {
                    shop_id: Set(shop.id),
                    frame_id: Set(frame.id),
                    quantity_received: Set(item.quantity),
                    quantity_sold: Set(0),
                    cost_per_unit: Set(item.cost_per_unit),
                    last_restocked: Set(now),
                    created_at: Set(now),
                    ..Default::default()
                };
                (active.insert(conn).await?, true)
            }
        };

        inventory_transaction::ActiveModel {
            shop_inventory_id: Set(position.id),
            transaction_type: Set(inventory_transaction::TransactionType::StockIn),
            quantity: Set(item.quantity),
            unit_cost: Set(Some(item.cost_per_unit)),
            unit_price: Set(None),
            notes: Set(notes.to_string()),
            created_at: Set(now),
            created_by: Set(actor),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        processed.push(ProcessedItem {
            frame_id: frame.id,
            frame_name: frame.name,
            product_id: frame.product_id,
            quantity_added: item.quantity,
            cost_per_unit: item.cost_per_unit,
            new_total: position.quantity_received,
            inventory_created: created,
        });
    }

    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use model::entities::prelude::*;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn stock_in_creates_position_and_ledger_row() {
        let ctx = testing::seed().await;

        let items = vec![StockInItem {
            frame_id: ctx.frame_a.id,
            quantity: 10,
            cost_per_unit: dec("30.00"),
        }];
        let processed = stock_in(&ctx.db, ctx.shop.id, &items, ctx.distributor.id, ctx.now, "t")
            .await
            .unwrap();

        assert_eq!(processed.len(), 1);
        assert!(processed[0].inventory_created);
        assert_eq!(processed[0].new_total, 10);

        let positions = ShopInventory::find().all(&ctx.db).await.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].quantity_received, 10);

        let movements = InventoryTransaction::find().all(&ctx.db).await.unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].quantity, 10);
    }

    #[tokio::test]
    async fn stock_in_tops_up_existing_position() {
        let ctx = testing::seed().await;

        let first = vec![StockInItem {
            frame_id: ctx.frame_a.id,
            quantity: 10,
            cost_per_unit: dec("30.00"),
        }];
        stock_in(&ctx.db, ctx.shop.id, &first, ctx.distributor.id, ctx.now, "t")
            .await
            .unwrap();

        let second = vec![StockInItem {
            frame_id: ctx.frame_a.id,
            quantity: 5,
            cost_per_unit: dec("28.00"),
        }];
        let processed = stock_in(&ctx.db, ctx.shop.id, &second, ctx.distributor.id, ctx.now, "t")
            .await
            .unwrap();

        assert!(!processed[0].inventory_created);
        assert_eq!(processed[0].new_total, 15);

        // Still a single position, with refreshed cost
        let positions = ShopInventory::find().all(&ctx.db).await.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].quantity_received, 15);
        assert_eq!(positions[0].cost_per_unit, dec("28.00"));

        let movements = InventoryTransaction::find().all(&ctx.db).await.unwrap();
        assert_eq!(movements.len(), 2);
    }

    #[tokio::test]
    async fn stock_in_rejects_unknown_shop_and_frame() {
        let ctx = testing::seed().await;

        let items = vec![StockInItem {
            frame_id: ctx.frame_a.id,
            quantity: 1,
            cost_per_unit: dec("30.00"),
        }];
        let err = stock_in(&ctx.db, 9999, &items, ctx.distributor.id, ctx.now, "t")
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::ShopNotFound(9999)));

        let items = vec![StockInItem {
            frame_id: 9999,
            quantity: 1,
            cost_per_unit: dec("30.00"),
        }];
        let err = stock_in(&ctx.db, ctx.shop.id, &items, ctx.distributor.id, ctx.now, "t")
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::FrameNotFound(9999)));
    }

    #[tokio::test]
    async fn bulk_distribution_rolls_back_on_unknown_shop() {
        let ctx = testing::seed().await;

        let distributions = vec![
            ShopDistribution {
                shop_id: ctx.shop.id,
                items: vec![StockInItem {
                    frame_id: ctx.frame_a.id,
                    quantity: 4,
                    cost_per_unit: dec("30.00"),
                }],
            },
            ShopDistribution {
                shop_id: 4242,
                items: vec![StockInItem {
                    frame_id: ctx.frame_a.id,
                    quantity: 4,
                    cost_per_unit: dec("30.00"),
                }],
            },
        ];
        let err = distribute_bulk(&ctx.db, &distributions, ctx.distributor.id, ctx.now)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::ShopNotFound(4242)));

        // Nothing from the first shop survived the rollback
        assert!(ShopInventory::find().all(&ctx.db).await.unwrap().is_empty());
        assert!(InventoryTransaction::find()
            .all(&ctx.db)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn bulk_distribution_totals() {
        let ctx = testing::seed().await;

        let distributions = vec![
            ShopDistribution {
                shop_id: ctx.shop.id,
                items: vec![
                    StockInItem {
                        frame_id: ctx.frame_a.id,
                        quantity: 10,
                        cost_per_unit: dec("30.00"),
                    },
                    StockInItem {
                        frame_id: ctx.frame_b.id,
                        quantity: 5,
                        cost_per_unit: dec("25.00"),
                    },
                ],
            },
            ShopDistribution {
                shop_id: ctx.other_shop.id,
                items: vec![StockInItem {
                    frame_id: ctx.frame_a.id,
                    quantity: 3,
                    cost_per_unit: dec("30.00"),
                }],
            },
        ];
        let outcome = distribute_bulk(&ctx.db, &distributions, ctx.distributor.id, ctx.now)
            .await
            .unwrap();

        assert_eq!(outcome.total_items_distributed, 18);
        assert_eq!(outcome.shops_updated, 2);
        assert_eq!(outcome.results[0].total_items, 15);
        assert_eq!(outcome.results[1].total_items, 3);

        let positions = ShopInventory::find().all(&ctx.db).await.unwrap();
        assert_eq!(positions.len(), 3);
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }
}
