//! Stock level arithmetic.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::InventoryError;
use super::types::{MovementTarget, MovementType};

/// Signed change to one warehouse's on-hand quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    /// Warehouse.
    pub warehouse_id: Uuid,
    /// Signed delta.
    pub delta: Decimal,
}

/// Stateless inventory rules.
pub struct InventoryService;

impl InventoryService {
    /// Level changes implied by a movement.
    ///
    /// `IN`/`RETURN` add, `OUT`/`DAMAGED`/`EXPIRED` subtract, `ADJUSTMENT`
    /// applies its signed quantity and `TRANSFER` subtracts from the source
    /// and adds to the destination.
    #[must_use]
    pub fn level_changes(
        kind: MovementType,
        quantity: Decimal,
        target: MovementTarget,
    ) -> Vec<LevelChange> {
        match target {
            MovementTarget::Transfer { from, to } => vec![
                LevelChange {
                    warehouse_id: from,
                    delta: -quantity.abs(),
                },
                LevelChange {
                    warehouse_id: to,
                    delta: quantity.abs(),
                },
            ],
            MovementTarget::Single(warehouse_id) => {
                let delta = match kind {
                    MovementType::Adjustment => quantity,
                    k if k.is_outbound() => -quantity.abs(),
                    _ => quantity.abs(),
                };
                vec![LevelChange {
                    warehouse_id,
                    delta,
                }]
            }
        }
    }

    /// Applies a change to the current on-hand quantity.
    ///
    /// # Errors
    ///
    /// `InsufficientStock` if the result would be negative.
    pub fn apply(current: Decimal, change: LevelChange) -> Result<Decimal, InventoryError> {
        let next = current + change.delta;
        if next < Decimal::ZERO {
            return Err(InventoryError::InsufficientStock {
                warehouse_id: change.warehouse_id,
                available: current,
                requested: -change.delta,
            });
        }
        Ok(next)
    }

    /// An item is low on stock when its total on-hand is at or below the reorder level.
    #[must_use]
    pub fn is_low_stock(total_on_hand: Decimal, reorder_level: Decimal) -> bool {
        total_on_hand <= reorder_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn single(kind: MovementType, qty: Decimal) -> LevelChange {
        InventoryService::level_changes(kind, qty, MovementTarget::Single(Uuid::nil()))[0]
    }

    #[test]
    fn test_inbound_and_outbound_signs() {
        assert_eq!(single(MovementType::In, dec!(5)).delta, dec!(5));
        assert_eq!(single(MovementType::Return, dec!(5)).delta, dec!(5));
        assert_eq!(single(MovementType::Out, dec!(5)).delta, dec!(-5));
        assert_eq!(single(MovementType::Damaged, dec!(5)).delta, dec!(-5));
        assert_eq!(single(MovementType::Expired, dec!(5)).delta, dec!(-5));
        assert_eq!(single(MovementType::Adjustment, dec!(-3)).delta, dec!(-3));
    }

    #[test]
    fn test_transfer_moves_between_warehouses() {
        let from = Uuid::new_v4();
        let to = Uuid::new_v4();
        let changes = InventoryService::level_changes(
            MovementType::Transfer,
            dec!(7),
            MovementTarget::Transfer { from, to },
        );
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0], LevelChange { warehouse_id: from, delta: dec!(-7) });
        assert_eq!(changes[1], LevelChange { warehouse_id: to, delta: dec!(7) });
    }

    #[test]
    fn test_cannot_go_negative() {
        let err = InventoryService::apply(dec!(4), single(MovementType::Out, dec!(5))).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::InsufficientStock { available, requested, .. }
                if available == dec!(4) && requested == dec!(5)
        ));
        assert_eq!(
            InventoryService::apply(dec!(5), single(MovementType::Out, dec!(5))).unwrap(),
            dec!(0)
        );
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        assert!(InventoryService::is_low_stock(dec!(10), dec!(10)));
        assert!(!InventoryService::is_low_stock(dec!(11), dec!(10)));
    }
}
