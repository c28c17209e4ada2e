//! Inventory error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The movement would drive stock below zero.
    #[error("Insufficient stock in warehouse {warehouse_id}: available {available}, requested {requested}")]
    InsufficientStock {
        /// Warehouse.
        warehouse_id: Uuid,
        /// Current on-hand quantity.
        available: Decimal,
        /// Quantity the movement tried to remove.
        requested: Decimal,
    },

    /// SKU already in use.
    #[error("SKU {0} already exists")]
    DuplicateSku(String),

    /// Warehouse code already in use.
    #[error("Warehouse code {0} already exists")]
    DuplicateWarehouseCode(String),

    /// Stock item not found.
    #[error("Stock item {0} not found")]
    ItemNotFound(Uuid),

    /// Warehouse not found.
    #[error("Warehouse {0} not found")]
    WarehouseNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl InventoryError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InsufficientStock { .. } => 422,
            Self::DuplicateSku(_) | Self::DuplicateWarehouseCode(_) => 409,
            Self::ItemNotFound(_) | Self::WarehouseNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::DuplicateSku(_) => "DUPLICATE_SKU",
            Self::DuplicateWarehouseCode(_) => "DUPLICATE_WAREHOUSE_CODE",
            Self::ItemNotFound(_) => "STOCK_ITEM_NOT_FOUND",
            Self::WarehouseNotFound(_) => "WAREHOUSE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
