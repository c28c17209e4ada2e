//! Development data seeder for Ridgeline.
//!
//! Seeds warehouses, stock items with opening balances, vendors and fleet
//! vehicles. Records that already exist are skipped, so the seeder can be
//! re-run against the same database.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use rust_decimal::Decimal;
use uuid::Uuid;

use ridgeline_core::fleet::{FleetError, NewVehicle, VehicleType};
use ridgeline_core::inventory::{
    InventoryError, MovementTarget, MovementType, NewStockItem, NewStockMovement, NewWarehouse,
};
use ridgeline_core::procurement::{NewVendor, ProcurementError};
use ridgeline_db::{FleetRepository, InventoryRepository, VendorRepository, connect};
use ridgeline_shared::config::DatabaseConfig;
use sea_orm::DatabaseConnection;

/// Recorded as the performer of opening-balance movements.
const SEED_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0001);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    println!("Connecting to database...");
    let db = connect(&DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 1,
    })
    .await
    .context("failed to connect to database")?;

    println!("Seeding warehouses...");
    let warehouses = seed_warehouses(&db).await?;

    println!("Seeding stock items...");
    seed_stock_items(&db, &warehouses).await?;

    println!("Seeding vendors...");
    seed_vendors(&db).await?;

    println!("Seeding vehicles...");
    seed_vehicles(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Seeds the main store and a pit-side satellite store. Returns the ids of
/// the warehouses created by this run, main store first.
async fn seed_warehouses(db: &DatabaseConnection) -> anyhow::Result<Vec<Uuid>> {
    let repo = InventoryRepository::new(db.clone());
    let data = [
        ("WH-MAIN", "Main Store", Some("Plant yard, building 3")),
        ("WH-PIT", "Pit Satellite Store", Some("North pit ramp")),
    ];

    let mut created = Vec::new();
    for (code, name, location) in data {
        let input = NewWarehouse {
            code: code.to_string(),
            name: name.to_string(),
            location: location.map(str::to_string),
        };
        match repo.create_warehouse(input).await {
            Ok(warehouse) => {
                println!("  Created warehouse {code}");
                created.push(warehouse.id);
            }
            Err(InventoryError::DuplicateWarehouseCode(_)) => {
                println!("  Warehouse {code} already exists, skipping...");
            }
            Err(e) => return Err(e).context(format!("failed to insert warehouse {code}")),
        }
    }
    Ok(created)
}

/// Seeds consumables and spares. New items get an opening balance in the
/// main store through a stock movement, keeping the ledger consistent.
async fn seed_stock_items(db: &DatabaseConnection, warehouses: &[Uuid]) -> anyhow::Result<()> {
    let repo = InventoryRepository::new(db.clone());
    // sku, name, unit, category, reorder level, reorder qty, unit cost, opening
    let data: [(&str, &str, &str, &str, i64, i64, Decimal, i64); 6] = [
        ("DSL-50", "Diesel 50ppm", "L", "Fuel", 20_000, 50_000, Decimal::new(142, 2), 60_000),
        ("EMUL-01", "Bulk emulsion explosive", "KG", "Explosives", 5_000, 20_000, Decimal::new(95, 2), 12_000),
        ("BIT-115", "115mm drill bit", "EA", "Drilling", 10, 40, Decimal::new(38_500, 2), 24),
        ("TYR-2700", "27.00R49 haul truck tyre", "EA", "Tyres", 4, 8, Decimal::new(2_450_000, 2), 6),
        ("FLT-HYD", "Hydraulic filter element", "EA", "Spares", 20, 60, Decimal::new(6_200, 2), 45),
        ("PPE-GLV", "Nitrile work gloves", "PR", "PPE", 200, 1_000, Decimal::new(310, 2), 150),
    ];

    let main_store = warehouses.first().copied();
    let mut inserted = 0;
    for (sku, name, unit, category, reorder_level, reorder_quantity, unit_cost, opening) in data {
        let input = NewStockItem {
            sku: sku.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            category: Some(category.to_string()),
            reorder_level: Decimal::from(reorder_level),
            reorder_quantity: Decimal::from(reorder_quantity),
            unit_cost,
        };
        let item = match repo.create_item(input).await {
            Ok(item) => item,
            Err(InventoryError::DuplicateSku(_)) => continue,
            Err(e) => return Err(e).context(format!("failed to insert stock item {sku}")),
        };
        inserted += 1;

        if let Some(warehouse_id) = main_store {
            let movement = NewStockMovement {
                item_id: item.id,
                kind: MovementType::In,
                quantity: Decimal::from(opening),
                target: MovementTarget::Single(warehouse_id),
                reference: Some("OPENING-BALANCE".to_string()),
                notes: Some("Seeded opening balance".to_string()),
            };
            repo.record_movement(SEED_USER_ID, movement)
                .await
                .context(format!("failed to record opening balance for {sku}"))?;
        }
    }

    println!("  Inserted {inserted} stock items");
    Ok(())
}

/// Seeds regular suppliers.
async fn seed_vendors(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = VendorRepository::new(db.clone());
    let data = [
        ("FUELCO", "FuelCo Bulk Supplies", Some("accounts@fuelco.example"), Some("+27 11 555 0101")),
        ("BLASTX", "BlastX Explosives", Some("billing@blastx.example"), None),
        ("DRILLPRO", "DrillPro Consumables", Some("ar@drillpro.example"), Some("+27 11 555 0142")),
        ("TYREMAX", "TyreMax OTR", None, Some("+27 11 555 0190")),
    ];

    let mut inserted = 0;
    for (code, name, contact_email, phone) in data {
        let input = NewVendor {
            code: code.to_string(),
            name: name.to_string(),
            contact_email: contact_email.map(str::to_string),
            phone: phone.map(str::to_string),
        };
        match repo.create(input).await {
            Ok(_) => inserted += 1,
            Err(ProcurementError::DuplicateVendorCode(_)) => {}
            Err(e) => return Err(e).context(format!("failed to insert vendor {code}")),
        }
    }

    println!("  Inserted {inserted} vendors");
    Ok(())
}

/// Seeds haul trucks, loading equipment and a light vehicle.
async fn seed_vehicles(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = FleetRepository::new(db.clone());
    let data = [
        ("HT-101-GP", "HT101", "Caterpillar", "777G", 2019, VehicleType::HaulTruck, 48_210),
        ("HT-102-GP", "HT102", "Caterpillar", "777G", 2020, VehicleType::HaulTruck, 39_877),
        ("EX-201-GP", "EX201", "Komatsu", "PC2000-8", 2018, VehicleType::Excavator, 21_450),
        ("LD-301-GP", "LD301", "Volvo", "L220H", 2021, VehicleType::Loader, 9_830),
        ("LV-401-GP", "LV401", "Toyota", "Land Cruiser 79", 2022, VehicleType::LightVehicle, 61_002),
    ];

    let mut inserted = 0;
    for (registration, fleet_number, make, model, year, kind, odometer) in data {
        let input = NewVehicle {
            registration: registration.to_string(),
            fleet_number: Some(fleet_number.to_string()),
            make: make.to_string(),
            model: model.to_string(),
            year: Some(year),
            kind,
            odometer: Decimal::from(odometer),
        };
        match repo.create_vehicle(input).await {
            Ok(_) => inserted += 1,
            Err(FleetError::DuplicateRegistration(_)) => {}
            Err(e) => return Err(e).context(format!("failed to insert vehicle {registration}")),
        }
    }

    println!("  Inserted {inserted} vehicles");
    Ok(())
}
