//! This file serves as the root for all SeaORM entity modules.
//! The data models for the eyewear distribution backend live here: the
//! catalog (frames, lens types), the tenancy side (shops, users) and the
//! quantity-based inventory ledger with its monthly financial rollups.

pub mod frame;
pub mod inventory_transaction;
pub mod lens_type;
pub mod shop;
pub mod shop_financial_summary;
pub mod shop_inventory;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::frame::Entity as Frame;
    pub use super::inventory_transaction::Entity as InventoryTransaction;
    pub use super::lens_type::Entity as LensType;
    pub use super::shop::Entity as Shop;
    pub use super::shop_financial_summary::Entity as ShopFinancialSummary;
    pub use super::shop_inventory::Entity as ShopInventory;
    pub use super::user::Entity as User;
}
