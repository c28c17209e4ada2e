//! Warehouse, stock item and stock movement repository.

use std::collections::BTreeMap;

use chrono::Utc;
use ridgeline_core::inventory::{
    InventoryError, InventoryService, MovementType, NewStockItem, NewStockMovement, NewWarehouse,
    StockItemQuery,
};
use ridgeline_core::validation::{ListQuery, Unfiltered};
use ridgeline_shared::types::PageResponse;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::support::{fetch_page, search_condition};
use crate::entities::{stock_items, stock_levels, stock_movements, warehouses};

fn db_err(e: DbErr) -> InventoryError {
    InventoryError::Database(e.to_string())
}

const LOW_STOCK_SQL: &str = "stock_items.reorder_level >= COALESCE((SELECT SUM(sl.quantity) \
     FROM stock_levels sl WHERE sl.stock_item_id = stock_items.id), 0)";

const IN_WAREHOUSE_SQL: &str = "EXISTS (SELECT 1 FROM stock_levels sl \
     WHERE sl.stock_item_id = stock_items.id AND sl.warehouse_id = $1)";

/// A stock item with its total on-hand quantity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemView {
    /// Item master data.
    #[serde(flatten)]
    pub item: stock_items::Model,
    /// Sum of on-hand across warehouses.
    pub total_on_hand: Decimal,
    /// `totalOnHand <= reorderLevel`.
    pub low_stock: bool,
}

/// A stock item with per-warehouse levels.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemDetail {
    /// Item and totals.
    #[serde(flatten)]
    pub item: StockItemView,
    /// On-hand per warehouse.
    pub levels: Vec<stock_levels::Model>,
}

/// Inventory persistence.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: DatabaseConnection,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a warehouse.
    ///
    /// # Errors
    ///
    /// `DuplicateWarehouseCode` if the code is taken.
    pub async fn create_warehouse(
        &self,
        input: NewWarehouse,
    ) -> Result<warehouses::Model, InventoryError> {
        let existing = warehouses::Entity::find()
            .filter(warehouses::Column::Code.eq(&input.code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(InventoryError::DuplicateWarehouseCode(input.code));
        }

        let now = Utc::now().into();
        let warehouse = warehouses::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            location: Set(input.location),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        info!(warehouse_id = %warehouse.id, code = %warehouse.code, "Warehouse created");
        Ok(warehouse)
    }

    /// Lists warehouses.
    pub async fn list_warehouses(
        &self,
        query: &ListQuery<Unfiltered, Unfiltered>,
    ) -> Result<PageResponse<warehouses::Model>, InventoryError> {
        let mut select = warehouses::Entity::find().order_by_asc(warehouses::Column::Code);
        if let Some(term) = &query.search {
            select = select.filter(search_condition(
                &[warehouses::Column::Name, warehouses::Column::Code],
                term,
            ));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Creates a stock item.
    ///
    /// # Errors
    ///
    /// `DuplicateSku` if the SKU is taken.
    pub async fn create_item(&self, input: NewStockItem) -> Result<stock_items::Model, InventoryError> {
        let existing = stock_items::Entity::find()
            .filter(stock_items::Column::Sku.eq(&input.sku))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(InventoryError::DuplicateSku(input.sku));
        }

        let now = Utc::now().into();
        let item = stock_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            sku: Set(input.sku),
            name: Set(input.name),
            unit: Set(input.unit),
            category: Set(input.category),
            reorder_level: Set(input.reorder_level),
            reorder_quantity: Set(input.reorder_quantity),
            unit_cost: Set(input.unit_cost),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        info!(stock_item_id = %item.id, sku = %item.sku, "Stock item created");
        Ok(item)
    }

    /// Lists stock items with their totals.
    pub async fn list_items(
        &self,
        query: &StockItemQuery,
    ) -> Result<PageResponse<StockItemView>, InventoryError> {
        let mut select = stock_items::Entity::find().order_by_asc(stock_items::Column::Sku);
        if let Some(term) = &query.list.search {
            select = select.filter(search_condition(
                &[stock_items::Column::Sku, stock_items::Column::Name],
                term,
            ));
        }
        if query.low_stock {
            select = select.filter(Expr::cust(LOW_STOCK_SQL));
        }
        if let Some(warehouse_id) = query.warehouse_id {
            select = select.filter(Expr::cust_with_values(IN_WAREHOUSE_SQL, [warehouse_id]));
        }

        let page = fetch_page(&self.db, select, query.list.page)
            .await
            .map_err(db_err)?;

        let ids: Vec<Uuid> = page.data.iter().map(|i| i.id).collect();
        let levels = stock_levels::Entity::find()
            .filter(stock_levels::Column::StockItemId.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let mut totals: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        for level in levels {
            *totals.entry(level.stock_item_id).or_default() += level.quantity;
        }

        Ok(page.map(|item| {
            let total = totals.get(&item.id).copied().unwrap_or_default();
            view(item, total)
        }))
    }

    /// Fetches a stock item with per-warehouse levels.
    pub async fn get_item(&self, id: Uuid) -> Result<StockItemDetail, InventoryError> {
        let item = stock_items::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(InventoryError::ItemNotFound(id))?;
        let levels = stock_levels::Entity::find()
            .filter(stock_levels::Column::StockItemId.eq(id))
            .order_by_asc(stock_levels::Column::WarehouseId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let total = levels.iter().map(|l| l.quantity).sum();

        Ok(StockItemDetail {
            item: view(item, total),
            levels,
        })
    }

    /// Records a movement and applies it to stock levels atomically.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` / `WarehouseNotFound`
    /// - `InsufficientStock` if any level would go negative
    pub async fn record_movement(
        &self,
        performed_by: Uuid,
        movement: NewStockMovement,
    ) -> Result<stock_movements::Model, InventoryError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        stock_items::Entity::find_by_id(movement.item_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(InventoryError::ItemNotFound(movement.item_id))?;

        let (from, to) = movement.warehouses();
        for warehouse_id in from.into_iter().chain(to) {
            warehouses::Entity::find_by_id(warehouse_id)
                .one(&txn)
                .await
                .map_err(db_err)?
                .ok_or(InventoryError::WarehouseNotFound(warehouse_id))?;
        }

        let record = apply_movement(&txn, performed_by, movement).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(record)
    }

    /// Lists movements, newest first. `kind` filters by movement type.
    pub async fn list_movements(
        &self,
        query: &ListQuery<Unfiltered, MovementType>,
        item_id: Option<Uuid>,
    ) -> Result<PageResponse<stock_movements::Model>, InventoryError> {
        let mut select =
            stock_movements::Entity::find().order_by_desc(stock_movements::Column::CreatedAt);
        if let Some(kind) = query.kind {
            select = select.filter(stock_movements::Column::MovementType.eq(kind.as_str()));
        }
        if let Some(item_id) = item_id {
            select = select.filter(stock_movements::Column::StockItemId.eq(item_id));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(
                &[stock_movements::Column::Reference, stock_movements::Column::Notes],
                term,
            ));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }
}

fn view(item: stock_items::Model, total_on_hand: Decimal) -> StockItemView {
    let low_stock = InventoryService::is_low_stock(total_on_hand, item.reorder_level);
    StockItemView {
        item,
        total_on_hand,
        low_stock,
    }
}

/// Applies `movement` to stock levels and inserts the movement record.
///
/// Levels are locked `FOR UPDATE` so concurrent movements serialize per
/// item and warehouse. Runs on the caller's connection, normally a
/// transaction.
pub(crate) async fn apply_movement<C: ConnectionTrait>(
    conn: &C,
    performed_by: Uuid,
    movement: NewStockMovement,
) -> Result<stock_movements::Model, InventoryError> {
    let now = Utc::now();

    for change in InventoryService::level_changes(movement.kind, movement.quantity, movement.target)
    {
        let level = stock_levels::Entity::find()
            .filter(stock_levels::Column::StockItemId.eq(movement.item_id))
            .filter(stock_levels::Column::WarehouseId.eq(change.warehouse_id))
            .lock_exclusive()
            .one(conn)
            .await
            .map_err(db_err)?;

        match level {
            Some(level) => {
                let next = InventoryService::apply(level.quantity, change)?;
                let mut active: stock_levels::ActiveModel = level.into();
                active.quantity = Set(next);
                active.updated_at = Set(now.into());
                active.update(conn).await.map_err(db_err)?;
            }
            None => {
                let next = InventoryService::apply(Decimal::ZERO, change)?;
                stock_levels::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    stock_item_id: Set(movement.item_id),
                    warehouse_id: Set(change.warehouse_id),
                    quantity: Set(next),
                    updated_at: Set(now.into()),
                }
                .insert(conn)
                .await
                .map_err(db_err)?;
            }
        }
    }

    let (from, to) = movement.warehouses();
    let record = stock_movements::ActiveModel {
        id: Set(Uuid::new_v4()),
        stock_item_id: Set(movement.item_id),
        movement_type: Set(movement.kind.as_str().to_string()),
        quantity: Set(movement.quantity),
        from_warehouse_id: Set(from),
        to_warehouse_id: Set(to),
        reference: Set(movement.reference),
        notes: Set(movement.notes),
        performed_by: Set(performed_by),
        created_at: Set(now.into()),
    }
    .insert(conn)
    .await
    .map_err(db_err)?;

    info!(
        movement_id = %record.id,
        stock_item_id = %record.stock_item_id,
        movement_type = %record.movement_type,
        quantity = %record.quantity,
        "Stock movement recorded"
    );
    Ok(record)
}
