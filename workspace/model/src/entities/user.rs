use sea_orm::entity::prelude::*;

/// The role attached to every account. Distributors manage the catalog and
/// push stock into shops; shop owners record sales for their own shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Role {
    #[sea_orm(string_value = "DISTRIBUTOR")]
    Distributor,
    #[sea_orm(string_value = "SHOP_OWNER")]
    ShopOwner,
}

/// Represents a user of the system.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    /// One-way hash, never the plaintext password.
    pub password_hash: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub role: Role,
    /// Set for shop owners; distributors are not bound to a shop.
    pub shop_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shop::Entity",
        from = "Column::ShopId",
        to = "super::shop::Column::Id"
    )]
    Shop,
    #[sea_orm(has_many = "super::inventory_transaction::Entity")]
    InventoryTransaction,
}

impl Related<super::shop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
