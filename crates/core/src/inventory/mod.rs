//! Warehouses, stock items and stock movements.
//!
//! # Modules
//!
//! - `types` - Movement types and targets
//! - `movement` - Stock level arithmetic
//! - `requests` - Warehouse, item and movement payloads

pub mod error;
pub mod movement;
pub mod requests;
pub mod types;

#[cfg(test)]
mod movement_props;

pub use error::InventoryError;
pub use movement::{InventoryService, LevelChange};
pub use requests::{
    CreateStockItemRequest, CreateWarehouseRequest, NewStockItem, NewWarehouse,
    RecordMovementRequest, StockItemQuery, StockItemQueryParams,
};
pub use types::{MovementTarget, MovementType, NewStockMovement};
