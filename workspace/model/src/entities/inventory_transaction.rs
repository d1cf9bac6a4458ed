use sea_orm::entity::prelude::*;

/// The kind of inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum TransactionType {
    #[sea_orm(string_value = "STOCK_IN")]
    StockIn,
    #[sea_orm(string_value = "SALE")]
    Sale,
    #[sea_orm(string_value = "ADJUSTMENT")]
    Adjustment,
}

/// Append-only ledger of inventory movements.
/// Quantity is signed: positive for stock coming in, negative for units
/// leaving through a sale.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub shop_inventory_id: i32,
    pub transaction_type: TransactionType,
    pub quantity: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub unit_cost: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub unit_price: Option<Decimal>,
    pub notes: String,
    pub created_at: DateTime,
    pub created_by: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shop_inventory::Entity",
        from = "Column::ShopInventoryId",
        to = "super::shop_inventory::Column::Id"
    )]
    ShopInventory,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::shop_inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShopInventory.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
