//! Shared helpers for database-backed tests.
//!
//! Tests run only when `DATABASE_URL` points at a migrated database
//! (`cargo run -p ridgeline-migrator -- up`); otherwise they return early.

#![allow(dead_code)]

use ridgeline_core::inventory::{NewStockItem, NewWarehouse};
use ridgeline_core::procurement::NewVendor;
use ridgeline_db::entities::{stock_items, vendors, warehouses};
use ridgeline_db::{InventoryRepository, VendorRepository};
use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

/// Connects to the test database, or `None` when none is configured.
pub async fn connect() -> Option<DatabaseConnection> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("Skipping test - DATABASE_URL not set");
        return None;
    };
    match Database::connect(&url).await {
        Ok(db) => Some(db),
        Err(e) => {
            eprintln!("Skipping test - database not available: {e}");
            None
        }
    }
}

/// Short unique suffix for codes with unique constraints.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", &Uuid::new_v4().simple().to_string()[..8]).to_uppercase()
}

pub async fn warehouse(db: &DatabaseConnection) -> warehouses::Model {
    InventoryRepository::new(db.clone())
        .create_warehouse(NewWarehouse {
            name: "Pit 2 stores".into(),
            code: unique("WH"),
            location: Some("North pit".into()),
        })
        .await
        .expect("create warehouse")
}

pub async fn stock_item(db: &DatabaseConnection) -> stock_items::Model {
    InventoryRepository::new(db.clone())
        .create_item(NewStockItem {
            sku: unique("SKU"),
            name: "Hydraulic hose 1in".into(),
            unit: "EA".into(),
            category: Some("SPARES".into()),
            reorder_level: dec!(20),
            reorder_quantity: dec!(50),
            unit_cost: dec!(10.00),
        })
        .await
        .expect("create stock item")
}

pub async fn vendor(db: &DatabaseConnection) -> vendors::Model {
    VendorRepository::new(db.clone())
        .create(NewVendor {
            name: "Highveld Hydraulics".into(),
            code: unique("VEN"),
            contact_email: Some("orders@highveld.example".into()),
            phone: None,
        })
        .await
        .expect("create vendor")
}
