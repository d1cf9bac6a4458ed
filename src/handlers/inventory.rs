pub mod distributor;
pub mod shared;
pub mod shop_owner;

pub use distributor::{ProcessedItemResponse, StockInItemRequest, StockInRequest};
pub use shop_owner::{ProcessSaleRequest, SaleOutcomeResponse};

use axum::http::StatusCode;
use axum::response::Json;
use ledger::LedgerError;
use tracing::error;

use crate::schemas::ErrorResponse;

/// Map a ledger error onto the API surface: not-found lookups become 404,
/// validation problems 400, tenancy violations 403, and anything from the
/// database layer a logged 500.
pub(crate) fn ledger_error_response(err: LedgerError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        LedgerError::ShopNotFound(_) => (StatusCode::NOT_FOUND, "SHOP_NOT_FOUND"),
        LedgerError::FrameNotFound(_) => (StatusCode::NOT_FOUND, "FRAME_NOT_FOUND"),
        LedgerError::InventoryNotFound(_) => (StatusCode::NOT_FOUND, "INVENTORY_NOT_FOUND"),
        LedgerError::WrongShop { .. } => (StatusCode::FORBIDDEN, "WRONG_SHOP"),
        LedgerError::InsufficientStock { .. } => (StatusCode::BAD_REQUEST, "INSUFFICIENT_STOCK"),
        LedgerError::Invalid(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
        LedgerError::Database(db_error) => {
            error!("Ledger operation failed: {}", db_error);
            (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR")
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
            success: false,
        }),
    )
}
