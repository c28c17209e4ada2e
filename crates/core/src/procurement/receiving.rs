//! Goods receipt planning.
//!
//! Accepted quantities accumulate against each order line and may never
//! exceed the ordered quantity. Over-receipt is an error, never clamped.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::error::ProcurementError;
use super::types::PurchaseOrderStatus;

/// Snapshot of a purchase order line before the receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoLineState {
    /// Order line id.
    pub line_id: Uuid,
    /// Ordered quantity.
    pub ordered_quantity: Decimal,
    /// Quantity accepted by earlier receipts.
    pub accepted_quantity: Decimal,
}

/// One validated goods receipt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    /// Order line being received.
    pub po_line_id: Uuid,
    /// Quantity delivered.
    pub received_quantity: Decimal,
    /// Quantity accepted into stock.
    pub accepted_quantity: Decimal,
    /// Quantity rejected.
    pub rejected_quantity: Decimal,
    /// Why goods were rejected.
    pub rejection_reason: Option<String>,
}

/// What a receipt does to the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptPlan {
    /// New cumulative accepted quantity for every line the receipt touches.
    pub accepted_totals: BTreeMap<Uuid, Decimal>,
    /// Order status after the receipt.
    pub new_status: PurchaseOrderStatus,
}

impl ReceiptPlan {
    /// Returns the new cumulative accepted quantity for a line, if touched.
    #[must_use]
    pub fn accepted_total(&self, line_id: Uuid) -> Option<Decimal> {
        self.accepted_totals.get(&line_id).copied()
    }
}

/// Stateless goods receipt rules.
pub struct ReceivingService;

impl ReceivingService {
    /// Checks a receipt against the order and computes its effect.
    ///
    /// # Errors
    ///
    /// - `NotReceivable` unless the order is `APPROVED` or `PARTIALLY_RECEIVED`
    /// - `UnknownOrderLine` if a line is not part of the order
    /// - `OverReceipt` if a line's cumulative accepted quantity would exceed
    ///   its ordered quantity
    pub fn plan(
        status: PurchaseOrderStatus,
        order_lines: &[PoLineState],
        receipt: &[ReceiptLine],
    ) -> Result<ReceiptPlan, ProcurementError> {
        if !status.accepts_receipts() {
            return Err(ProcurementError::NotReceivable(status));
        }

        // Lines may appear more than once in one receipt (split pallets).
        let mut incoming: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        for line in receipt {
            if !order_lines.iter().any(|l| l.line_id == line.po_line_id) {
                return Err(ProcurementError::UnknownOrderLine(line.po_line_id));
            }
            *incoming.entry(line.po_line_id).or_default() += line.accepted_quantity;
        }

        let mut accepted_totals = BTreeMap::new();
        for line in order_lines {
            let Some(attempted) = incoming.get(&line.line_id).copied() else {
                continue;
            };
            let total = line.accepted_quantity + attempted;
            if total > line.ordered_quantity {
                return Err(ProcurementError::OverReceipt {
                    line_id: line.line_id,
                    ordered: line.ordered_quantity,
                    already_accepted: line.accepted_quantity,
                    attempted,
                });
            }
            accepted_totals.insert(line.line_id, total);
        }

        let cumulative = |l: &PoLineState| {
            accepted_totals
                .get(&l.line_id)
                .copied()
                .unwrap_or(l.accepted_quantity)
        };
        let new_status = if order_lines.iter().all(|l| cumulative(l) >= l.ordered_quantity) {
            PurchaseOrderStatus::Received
        } else if order_lines.iter().any(|l| cumulative(l) > Decimal::ZERO) {
            PurchaseOrderStatus::PartiallyReceived
        } else {
            status
        };

        Ok(ReceiptPlan {
            accepted_totals,
            new_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order_line(ordered: Decimal, accepted: Decimal) -> PoLineState {
        PoLineState {
            line_id: Uuid::new_v4(),
            ordered_quantity: ordered,
            accepted_quantity: accepted,
        }
    }

    fn receive(line: &PoLineState, accepted: Decimal, rejected: Decimal) -> ReceiptLine {
        ReceiptLine {
            po_line_id: line.line_id,
            received_quantity: accepted + rejected,
            accepted_quantity: accepted,
            rejected_quantity: rejected,
            rejection_reason: (rejected > Decimal::ZERO).then(|| "Damaged in transit".to_string()),
        }
    }

    #[test]
    fn test_full_receipt_marks_received() {
        let line = order_line(dec!(100), dec!(0));
        let plan = ReceivingService::plan(
            PurchaseOrderStatus::Approved,
            std::slice::from_ref(&line),
            &[receive(&line, dec!(100), dec!(0))],
        )
        .unwrap();
        assert_eq!(plan.new_status, PurchaseOrderStatus::Received);
        assert_eq!(plan.accepted_total(line.line_id), Some(dec!(100)));
    }

    #[test]
    fn test_partial_receipt() {
        let a = order_line(dec!(10), dec!(0));
        let b = order_line(dec!(5), dec!(0));
        let plan = ReceivingService::plan(
            PurchaseOrderStatus::Approved,
            &[a.clone(), b.clone()],
            &[receive(&a, dec!(10), dec!(0))],
        )
        .unwrap();
        assert_eq!(plan.new_status, PurchaseOrderStatus::PartiallyReceived);
        assert_eq!(plan.accepted_total(b.line_id), None);
    }

    #[test]
    fn test_second_receipt_completes_order() {
        let a = order_line(dec!(10), dec!(6));
        let plan = ReceivingService::plan(
            PurchaseOrderStatus::PartiallyReceived,
            std::slice::from_ref(&a),
            &[receive(&a, dec!(4), dec!(1))],
        )
        .unwrap();
        assert_eq!(plan.new_status, PurchaseOrderStatus::Received);
    }

    #[test]
    fn test_rejected_only_keeps_status() {
        let a = order_line(dec!(10), dec!(0));
        let plan = ReceivingService::plan(
            PurchaseOrderStatus::Approved,
            std::slice::from_ref(&a),
            &[receive(&a, dec!(0), dec!(10))],
        )
        .unwrap();
        assert_eq!(plan.new_status, PurchaseOrderStatus::Approved);
    }

    #[test]
    fn test_over_receipt_rejected() {
        let a = order_line(dec!(100), dec!(95));
        let err = ReceivingService::plan(
            PurchaseOrderStatus::PartiallyReceived,
            std::slice::from_ref(&a),
            &[receive(&a, dec!(6), dec!(0))],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProcurementError::OverReceipt { attempted, .. } if attempted == dec!(6)
        ));
    }

    #[test]
    fn test_split_lines_are_summed_before_check() {
        let a = order_line(dec!(10), dec!(0));
        let err = ReceivingService::plan(
            PurchaseOrderStatus::Approved,
            std::slice::from_ref(&a),
            &[receive(&a, dec!(6), dec!(0)), receive(&a, dec!(6), dec!(0))],
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "OVER_RECEIPT");
    }

    #[test]
    fn test_unknown_line_rejected() {
        let a = order_line(dec!(10), dec!(0));
        let stranger = order_line(dec!(10), dec!(0));
        let err = ReceivingService::plan(
            PurchaseOrderStatus::Approved,
            std::slice::from_ref(&a),
            &[receive(&stranger, dec!(1), dec!(0))],
        )
        .unwrap_err();
        assert!(matches!(err, ProcurementError::UnknownOrderLine(id) if id == stranger.line_id));
    }

    #[test]
    fn test_wrong_status_rejected() {
        let a = order_line(dec!(10), dec!(0));
        for status in [
            PurchaseOrderStatus::Draft,
            PurchaseOrderStatus::PendingApproval,
            PurchaseOrderStatus::Received,
            PurchaseOrderStatus::MatchPending,
            PurchaseOrderStatus::Cancelled,
        ] {
            let err = ReceivingService::plan(
                status,
                std::slice::from_ref(&a),
                &[receive(&a, dec!(1), dec!(0))],
            )
            .unwrap_err();
            assert_eq!(err.error_code(), "PO_NOT_RECEIVABLE");
        }
    }
}
