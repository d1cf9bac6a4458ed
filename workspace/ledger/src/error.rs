use thiserror::Error;

/// Error types for the ledger module
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Shop with ID {0} not found")]
    ShopNotFound(i32),

    #[error("Frame with ID {0} not found")]
    FrameNotFound(i32),

    #[error("Shop inventory with ID {0} not found")]
    InventoryNotFound(i32),

    /// The inventory position belongs to a different shop than the caller's.
    #[error("Inventory {inventory_id} does not belong to shop {shop_id}")]
    WrongShop { inventory_id: i32, shop_id: i32 },

    #[error("Not enough stock: available {available}, requested {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// Type alias for Result with LedgerError
pub type Result<T> = std::result::Result<T, LedgerError>;
