//! Inventory domain types.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::macros::string_enum;

string_enum! {
    /// Reason for a stock movement.
    pub enum MovementType {
        /// Goods received into a warehouse.
        In => "IN",
        /// Goods issued out of a warehouse.
        Out => "OUT",
        /// Stock-take correction (signed).
        Adjustment => "ADJUSTMENT",
        /// Moved between warehouses.
        Transfer => "TRANSFER",
        /// Returned into stock.
        Return => "RETURN",
        /// Written off as damaged.
        Damaged => "DAMAGED",
        /// Written off as expired.
        Expired => "EXPIRED",
    }
}

impl MovementType {
    /// Returns true for movements that add to a single warehouse.
    #[must_use]
    pub const fn is_inbound(&self) -> bool {
        matches!(self, Self::In | Self::Return)
    }

    /// Returns true for movements that remove from a single warehouse.
    #[must_use]
    pub const fn is_outbound(&self) -> bool {
        matches!(self, Self::Out | Self::Damaged | Self::Expired)
    }
}

/// Where a movement applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementTarget {
    /// A single warehouse.
    Single(Uuid),
    /// From one warehouse to another.
    Transfer {
        /// Source warehouse.
        from: Uuid,
        /// Destination warehouse.
        to: Uuid,
    },
}

/// A validated stock movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStockMovement {
    /// Stock item.
    pub item_id: Uuid,
    /// Movement type.
    pub kind: MovementType,
    /// Quantity; positive except for adjustments, which are signed.
    pub quantity: Decimal,
    /// Warehouse(s) affected.
    pub target: MovementTarget,
    /// External reference (GRN number, job card).
    pub reference: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

impl NewStockMovement {
    /// `(from, to)` warehouses as stored on the movement record.
    #[must_use]
    pub fn warehouses(&self) -> (Option<Uuid>, Option<Uuid>) {
        match self.target {
            MovementTarget::Transfer { from, to } => (Some(from), Some(to)),
            MovementTarget::Single(w) if self.kind.is_outbound() => (Some(w), None),
            MovementTarget::Single(w) => (None, Some(w)),
        }
    }
}
