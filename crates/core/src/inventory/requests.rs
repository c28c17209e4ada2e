//! Inventory request payloads.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::types::{MovementTarget, MovementType, NewStockMovement};
use crate::validation::{
    FieldErrors, ListQuery, ListQueryParams, LooseValue, Unfiltered, Validate, ValidationErrors,
    parse_loose_bool,
};

/// Payload for `POST /inventory/warehouses`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehouseRequest {
    /// Display name.
    pub name: Option<String>,
    /// Short unique code.
    pub code: Option<String>,
    /// Site or pit location.
    pub location: Option<String>,
}

/// A validated warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWarehouse {
    /// Display name.
    pub name: String,
    /// Upper-cased code.
    pub code: String,
    /// Location.
    pub location: Option<String>,
}

impl Validate for CreateWarehouseRequest {
    type Output = NewWarehouse;

    fn validate(self) -> Result<NewWarehouse, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let name = errs.required_text("name", self.name.as_deref());
        let code = errs.required_text("code", self.code.as_deref());
        match (name, code) {
            (Some(name), Some(code)) => Ok(NewWarehouse {
                name,
                code: code.to_ascii_uppercase(),
                location: FieldErrors::optional_text(self.location.as_deref()),
            }),
            _ => Err(errs.into_errors()),
        }
    }
}

/// Payload for `POST /inventory/items`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockItemRequest {
    /// Stock keeping unit.
    pub sku: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Unit of measure (each, litre, kg).
    pub unit: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Low-stock threshold.
    pub reorder_level: Option<LooseValue>,
    /// Suggested reorder quantity.
    pub reorder_quantity: Option<LooseValue>,
    /// Standard unit cost.
    pub unit_cost: Option<LooseValue>,
}

/// A validated stock item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStockItem {
    /// Upper-cased SKU.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Unit of measure.
    pub unit: String,
    /// Category.
    pub category: Option<String>,
    /// Low-stock threshold.
    pub reorder_level: Decimal,
    /// Suggested reorder quantity.
    pub reorder_quantity: Decimal,
    /// Standard unit cost.
    pub unit_cost: Decimal,
}

impl Validate for CreateStockItemRequest {
    type Output = NewStockItem;

    fn validate(self) -> Result<NewStockItem, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let sku = errs.required_text("sku", self.sku.as_deref());
        let name = errs.required_text("name", self.name.as_deref());
        let unit = errs.required_text("unit", self.unit.as_deref());
        let reorder_level = match &self.reorder_level {
            Some(v) => errs.non_negative_decimal("reorderLevel", Some(v)),
            None => Some(Decimal::ZERO),
        };
        let reorder_quantity = match &self.reorder_quantity {
            Some(v) => errs.non_negative_decimal("reorderQuantity", Some(v)),
            None => Some(Decimal::ZERO),
        };
        let unit_cost = match &self.unit_cost {
            Some(v) => errs.non_negative_decimal("unitCost", Some(v)),
            None => Some(Decimal::ZERO),
        };

        match (sku, name, unit, reorder_level, reorder_quantity, unit_cost) {
            (
                Some(sku),
                Some(name),
                Some(unit),
                Some(reorder_level),
                Some(reorder_quantity),
                Some(unit_cost),
            ) if errs.is_empty() => Ok(NewStockItem {
                sku: sku.to_ascii_uppercase(),
                name,
                unit,
                category: FieldErrors::optional_text(self.category.as_deref()),
                reorder_level,
                reorder_quantity,
                unit_cost,
            }),
            _ => Err(errs.into_errors()),
        }
    }
}

/// Payload for `POST /inventory/movements`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMovementRequest {
    /// Stock item.
    pub item_id: Option<String>,
    /// Movement type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Quantity; signed for adjustments.
    pub quantity: Option<LooseValue>,
    /// Warehouse for single-warehouse movements.
    pub warehouse_id: Option<String>,
    /// Transfer source.
    pub from_warehouse_id: Option<String>,
    /// Transfer destination.
    pub to_warehouse_id: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

impl Validate for RecordMovementRequest {
    type Output = NewStockMovement;

    fn validate(self) -> Result<NewStockMovement, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let item_id = errs.uuid("itemId", self.item_id.as_deref());
        let kind = errs.enum_value::<MovementType>("type", self.kind.as_deref());

        let quantity = match kind {
            Some(MovementType::Adjustment) => {
                let q = errs.decimal("quantity", self.quantity.as_ref());
                if q.is_some_and(|q| q.is_zero()) {
                    errs.add("quantity", "non_zero", "quantity must not be zero");
                }
                q
            }
            _ => errs.positive_decimal("quantity", self.quantity.as_ref()),
        };

        let target = match kind {
            Some(MovementType::Transfer) => {
                let from = errs.uuid("fromWarehouseId", self.from_warehouse_id.as_deref());
                let to = errs.uuid("toWarehouseId", self.to_warehouse_id.as_deref());
                match (from, to) {
                    (Some(from), Some(to)) if from == to => {
                        errs.add(
                            "toWarehouseId",
                            "same_warehouse",
                            "toWarehouseId must differ from fromWarehouseId",
                        );
                        None
                    }
                    (Some(from), Some(to)) => Some(MovementTarget::Transfer { from, to }),
                    _ => None,
                }
            }
            Some(_) => errs
                .uuid("warehouseId", self.warehouse_id.as_deref())
                .map(MovementTarget::Single),
            None => None,
        };

        match (item_id, kind, quantity, target) {
            (Some(item_id), Some(kind), Some(quantity), Some(target)) if errs.is_empty() => {
                Ok(NewStockMovement {
                    item_id,
                    kind,
                    quantity,
                    target,
                    reference: FieldErrors::optional_text(self.reference.as_deref()),
                    notes: FieldErrors::optional_text(self.notes.as_deref()),
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

/// Query string for `GET /inventory/items`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemQueryParams {
    /// Common list parameters.
    #[serde(flatten)]
    pub list: ListQueryParams,
    /// Only items at or below their reorder level.
    pub low_stock: Option<String>,
    /// Only items stocked in this warehouse.
    pub warehouse_id: Option<String>,
}

/// Validated stock item query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockItemQuery {
    /// Common list parameters.
    pub list: ListQuery<Unfiltered, Unfiltered>,
    /// Low-stock filter.
    pub low_stock: bool,
    /// Warehouse filter.
    pub warehouse_id: Option<Uuid>,
}

impl Validate for StockItemQueryParams {
    type Output = StockItemQuery;

    fn validate(self) -> Result<StockItemQuery, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let warehouse_id = errs.optional_uuid("warehouseId", self.warehouse_id.as_deref());
        let list = match self.list.validate_plain() {
            Ok(list) => Some(list),
            Err(ValidationErrors(list_errs)) => {
                for e in list_errs {
                    errs.add(e.field, e.code, e.message);
                }
                None
            }
        };
        match list {
            Some(list) if errs.is_empty() => Ok(StockItemQuery {
                list,
                low_stock: self
                    .low_stock
                    .as_deref()
                    .and_then(parse_loose_bool)
                    .unwrap_or(false),
                warehouse_id,
            }),
            _ => Err(errs.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn movement(kind: &str, qty: &str) -> RecordMovementRequest {
        RecordMovementRequest {
            item_id: Some(Uuid::new_v4().to_string()),
            kind: Some(kind.into()),
            quantity: Some(qty.into()),
            warehouse_id: Some(Uuid::new_v4().to_string()),
            ..RecordMovementRequest::default()
        }
    }

    #[test]
    fn test_issue_requires_positive_quantity() {
        let errs = movement("OUT", "-2").validate().unwrap_err();
        assert_eq!(errs.code_for("quantity"), Some("positive"));
    }

    #[test]
    fn test_adjustment_accepts_signed_quantity() {
        let m = movement("adjustment", "-2.5").validate().unwrap();
        assert_eq!(m.quantity, dec!(-2.5));
        let errs = movement("ADJUSTMENT", "0").validate().unwrap_err();
        assert_eq!(errs.code_for("quantity"), Some("non_zero"));
    }

    #[test]
    fn test_outbound_records_source_warehouse() {
        let m = movement("DAMAGED", "1").validate().unwrap();
        assert!(matches!(m.warehouses(), (Some(_), None)));
        let m = movement("IN", "1").validate().unwrap();
        assert!(matches!(m.warehouses(), (None, Some(_))));
    }

    #[test]
    fn test_transfer_needs_distinct_warehouses() {
        let w = Uuid::new_v4().to_string();
        let errs = RecordMovementRequest {
            item_id: Some(Uuid::new_v4().to_string()),
            kind: Some("TRANSFER".into()),
            quantity: Some("4".into()),
            from_warehouse_id: Some(w.clone()),
            to_warehouse_id: Some(w),
            ..RecordMovementRequest::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("toWarehouseId"), Some("same_warehouse"));
    }

    #[test]
    fn test_unknown_movement_type() {
        let errs = movement("STOLEN", "1").validate().unwrap_err();
        assert_eq!(errs.code_for("type"), Some("enum"));
    }

    #[test]
    fn test_stock_item_defaults() {
        let item = CreateStockItemRequest {
            sku: Some("brg-6205".into()),
            name: Some("Bearing 6205".into()),
            unit: Some("each".into()),
            reorder_level: Some("20".into()),
            ..CreateStockItemRequest::default()
        }
        .validate()
        .unwrap();
        assert_eq!(item.sku, "BRG-6205");
        assert_eq!(item.reorder_level, dec!(20));
        assert_eq!(item.unit_cost, dec!(0));
    }

    #[test]
    fn test_item_query_low_stock_flag() {
        let q = StockItemQueryParams {
            low_stock: Some("yes".into()),
            ..StockItemQueryParams::default()
        }
        .validate()
        .unwrap();
        assert!(q.low_stock);

        let errs = StockItemQueryParams {
            list: ListQueryParams {
                page_size: Some("500".into()),
                ..ListQueryParams::default()
            },
            ..StockItemQueryParams::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("pageSize"), Some("max"));
    }
}
