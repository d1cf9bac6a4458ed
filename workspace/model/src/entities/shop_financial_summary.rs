use sea_orm::entity::prelude::*;

/// Monthly financial rollup per shop, updated incrementally as sales are
/// processed. `month` is the first day of the month; `(shop_id, month)` is
/// unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shop_financial_summaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub shop_id: i32,
    pub month: Date,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_revenue: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_profit: Decimal,
    /// Cost of goods sold this month, owed back to the distributor.
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount_to_pay_distributor: Decimal,
    pub units_sold: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shop::Entity",
        from = "Column::ShopId",
        to = "super::shop::Column::Id"
    )]
    Shop,
}

impl Related<super::shop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
