//! Property tests for stock movements.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::movement::InventoryService;
use super::types::{MovementTarget, MovementType};

fn any_single_kind() -> impl Strategy<Value = MovementType> {
    prop::sample::select(vec![
        MovementType::In,
        MovementType::Out,
        MovementType::Return,
        MovementType::Damaged,
        MovementType::Expired,
        MovementType::Adjustment,
    ])
}

proptest! {
    /// No sequence of accepted movements leaves a negative level.
    #[test]
    fn prop_levels_never_negative(
        moves in prop::collection::vec((any_single_kind(), -500i64..500), 1..40),
    ) {
        let warehouse = Uuid::new_v4();
        let mut level = Decimal::ZERO;
        for (kind, qty) in moves {
            let qty = Decimal::from(qty);
            for change in InventoryService::level_changes(kind, qty, MovementTarget::Single(warehouse)) {
                if let Ok(next) = InventoryService::apply(level, change) {
                    level = next;
                }
            }
            prop_assert!(level >= Decimal::ZERO);
        }
    }

    /// A transfer conserves the total across both warehouses.
    #[test]
    fn prop_transfer_conserves_total(qty in 1i64..10_000) {
        let changes = InventoryService::level_changes(
            MovementType::Transfer,
            Decimal::from(qty),
            MovementTarget::Transfer { from: Uuid::new_v4(), to: Uuid::new_v4() },
        );
        let net: Decimal = changes.iter().map(|c| c.delta).sum();
        prop_assert_eq!(net, Decimal::ZERO);
    }
}
