use sea_orm::entity::prelude::*;

/// A lens option offered alongside frames.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lens_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    /// Added on top of the frame price when sold with this lens.
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub price_modifier: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
