pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_table;
mod m20250715_000001_add_shop_contact_fields;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_table::Migration),
            Box::new(m20250715_000001_add_shop_contact_fields::Migration),
        ]
    }
}
