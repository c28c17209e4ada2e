//! Stock movements against a real database.

mod common;

use ridgeline_core::inventory::{
    InventoryError, MovementTarget, MovementType, NewStockMovement, StockItemQuery,
};
use ridgeline_core::validation::ListQuery;
use ridgeline_db::InventoryRepository;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn movement(item_id: Uuid, kind: MovementType, quantity: Decimal, target: MovementTarget) -> NewStockMovement {
    NewStockMovement {
        item_id,
        kind,
        quantity,
        target,
        reference: None,
        notes: None,
    }
}

#[tokio::test]
async fn test_movements_update_levels() {
    let Some(db) = common::connect().await else {
        return;
    };
    let user = Uuid::new_v4();
    let repo = InventoryRepository::new(db.clone());
    let main = common::warehouse(&db).await;
    let satellite = common::warehouse(&db).await;
    let item = common::stock_item(&db).await;

    repo.record_movement(user, movement(item.id, MovementType::In, dec!(50), MovementTarget::Single(main.id)))
        .await
        .unwrap();
    repo.record_movement(
        user,
        movement(
            item.id,
            MovementType::Transfer,
            dec!(20),
            MovementTarget::Transfer {
                from: main.id,
                to: satellite.id,
            },
        ),
    )
    .await
    .unwrap();
    repo.record_movement(user, movement(item.id, MovementType::Adjustment, dec!(-5), MovementTarget::Single(main.id)))
        .await
        .unwrap();

    let detail = repo.get_item(item.id).await.unwrap();
    assert_eq!(detail.item.total_on_hand, dec!(45));
    let at = |w: Uuid| {
        detail
            .levels
            .iter()
            .find(|l| l.warehouse_id == w)
            .map(|l| l.quantity)
    };
    assert_eq!(at(main.id), Some(dec!(25)));
    assert_eq!(at(satellite.id), Some(dec!(20)));

    let movements = repo
        .list_movements(&ListQuery::default(), Some(item.id))
        .await
        .unwrap();
    assert_eq!(movements.meta.total, 3);
}

#[tokio::test]
async fn test_issue_cannot_go_negative() {
    let Some(db) = common::connect().await else {
        return;
    };
    let user = Uuid::new_v4();
    let repo = InventoryRepository::new(db.clone());
    let warehouse = common::warehouse(&db).await;
    let item = common::stock_item(&db).await;

    repo.record_movement(user, movement(item.id, MovementType::In, dec!(5), MovementTarget::Single(warehouse.id)))
        .await
        .unwrap();
    let err = repo
        .record_movement(user, movement(item.id, MovementType::Out, dec!(6), MovementTarget::Single(warehouse.id)))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::InsufficientStock { .. }));

    // Nothing was written by the failed movement
    let detail = repo.get_item(item.id).await.unwrap();
    assert_eq!(detail.item.total_on_hand, dec!(5));
    assert!(detail.item.low_stock);
}

#[tokio::test]
async fn test_low_stock_filter() {
    let Some(db) = common::connect().await else {
        return;
    };
    let user = Uuid::new_v4();
    let repo = InventoryRepository::new(db.clone());
    let warehouse = common::warehouse(&db).await;
    let stocked = common::stock_item(&db).await;
    let empty = common::stock_item(&db).await;

    repo.record_movement(user, movement(stocked.id, MovementType::In, dec!(500), MovementTarget::Single(warehouse.id)))
        .await
        .unwrap();

    let mut query = StockItemQuery {
        low_stock: true,
        ..StockItemQuery::default()
    };
    query.list.search = Some(empty.sku.clone());
    let low = repo.list_items(&query).await.unwrap();
    assert_eq!(low.data.len(), 1);
    assert_eq!(low.data[0].item.id, empty.id);

    query.list.search = Some(stocked.sku.clone());
    assert!(repo.list_items(&query).await.unwrap().data.is_empty());
}
