use sea_orm::entity::prelude::*;

/// Quantity-based stock position for one frame in one shop.
/// `(shop_id, frame_id)` is unique; movements are recorded separately in
/// `inventory_transaction`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shop_inventories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub shop_id: i32,
    pub frame_id: i32,
    /// Total units ever received from the distributor.
    pub quantity_received: i32,
    /// Total units ever sold to customers.
    pub quantity_sold: i32,
    /// Cost per unit the shop pays to the distributor.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cost_per_unit: Decimal,
    pub last_restocked: DateTime,
    pub created_at: DateTime,
}

impl Model {
    /// Units still on the shelf. Never negative.
    pub fn quantity_remaining(&self) -> i32 {
        (self.quantity_received - self.quantity_sold).max(0)
    }

    /// Total paid to the distributor for all received units.
    pub fn total_cost(&self) -> Decimal {
        Decimal::from(self.quantity_received) * self.cost_per_unit
    }

    /// Revenue from sold units at the given retail price.
    pub fn total_revenue(&self, frame_price: Decimal) -> Decimal {
        Decimal::from(self.quantity_sold) * frame_price
    }

    /// Profit on sold units (revenue minus cost of goods sold).
    pub fn total_profit(&self, frame_price: Decimal) -> Decimal {
        self.total_revenue(frame_price) - Decimal::from(self.quantity_sold) * self.cost_per_unit
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shop::Entity",
        from = "Column::ShopId",
        to = "super::shop::Column::Id"
    )]
    Shop,
    #[sea_orm(
        belongs_to = "super::frame::Entity",
        from = "Column::FrameId",
        to = "super::frame::Column::Id"
    )]
    Frame,
    #[sea_orm(has_many = "super::inventory_transaction::Entity")]
    InventoryTransaction,
}

impl Related<super::shop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shop.def()
    }
}

impl Related<super::frame::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Frame.def()
    }
}

impl Related<super::inventory_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryTransaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn position(received: i32, sold: i32, cost: &str) -> Model {
        let stamp = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Model {
            id: 1,
            shop_id: 1,
            frame_id: 1,
            quantity_received: received,
            quantity_sold: sold,
            cost_per_unit: cost.parse().unwrap(),
            last_restocked: stamp,
            created_at: stamp,
        }
    }

    #[test]
    fn remaining_clamps_at_zero() {
        assert_eq!(position(10, 4, "30.00").quantity_remaining(), 6);
        assert_eq!(position(3, 5, "30.00").quantity_remaining(), 0);
    }

    #[test]
    fn derived_totals() {
        let inv = position(10, 4, "30.00");
        let price: Decimal = "50.00".parse().unwrap();
        assert_eq!(inv.total_cost(), "300.00".parse().unwrap());
        assert_eq!(inv.total_revenue(price), "200.00".parse().unwrap());
        assert_eq!(inv.total_profit(price), "80.00".parse().unwrap());
    }
}
