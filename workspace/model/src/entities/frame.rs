use sea_orm::entity::prelude::*;

/// An eyeglass frame in the product catalog.
///
/// `frame_type`, `color` and `material` are free-form so new values can be
/// introduced without a schema change; the API layer exposes a predefined
/// set of filter choices alongside the values actually present.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "frames")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// External product identifier, unique across the catalog.
    #[sea_orm(unique)]
    pub product_id: String,
    pub name: String,
    pub frame_type: String,
    pub color: String,
    pub material: String,
    /// Retail price per unit.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub brand: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shop_inventory::Entity")]
    ShopInventory,
}

impl Related<super::shop_inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShopInventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
