use sea_orm::entity::prelude::*;

/// A retail shop the distributor supplies.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shops")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user::Entity")]
    User,
    #[sea_orm(has_many = "super::shop_inventory::Entity")]
    ShopInventory,
    #[sea_orm(has_many = "super::shop_financial_summary::Entity")]
    ShopFinancialSummary,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::shop_inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShopInventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
