//! Property tests for goods receipt planning.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::receiving::{PoLineState, ReceiptLine, ReceivingService};
use super::types::PurchaseOrderStatus;

fn receipt(line_id: Uuid, accepted: i64) -> ReceiptLine {
    ReceiptLine {
        po_line_id: line_id,
        received_quantity: Decimal::from(accepted),
        accepted_quantity: Decimal::from(accepted),
        rejected_quantity: Decimal::ZERO,
        rejection_reason: None,
    }
}

proptest! {
    /// Applying any sequence of receipts never pushes accepted past ordered.
    #[test]
    fn prop_cumulative_never_exceeds_ordered(
        ordered in 1i64..500,
        attempts in prop::collection::vec(0i64..200, 1..12),
    ) {
        let line_id = Uuid::new_v4();
        let mut state = PoLineState {
            line_id,
            ordered_quantity: Decimal::from(ordered),
            accepted_quantity: Decimal::ZERO,
        };
        let mut status = PurchaseOrderStatus::Approved;

        for qty in attempts {
            if !status.accepts_receipts() {
                break;
            }
            let before = state.accepted_quantity;
            match ReceivingService::plan(status, std::slice::from_ref(&state), &[receipt(line_id, qty)]) {
                Ok(plan) => {
                    let total = plan.accepted_total(line_id).unwrap_or(before);
                    prop_assert_eq!(total, before + Decimal::from(qty));
                    state.accepted_quantity = total;
                    status = plan.new_status;
                }
                Err(err) => {
                    prop_assert_eq!(err.error_code(), "OVER_RECEIPT");
                    prop_assert!(before + Decimal::from(qty) > state.ordered_quantity);
                }
            }
            prop_assert!(state.accepted_quantity <= state.ordered_quantity);
        }
    }

    /// The order is RECEIVED exactly when every line is fully accepted.
    #[test]
    fn prop_received_iff_all_lines_full(
        lines in prop::collection::vec((1i64..100, 0i64..100), 1..6),
    ) {
        let order: Vec<PoLineState> = lines
            .iter()
            .map(|(ordered, _)| PoLineState {
                line_id: Uuid::new_v4(),
                ordered_quantity: Decimal::from(*ordered),
                accepted_quantity: Decimal::ZERO,
            })
            .collect();
        let rcpt: Vec<ReceiptLine> = order
            .iter()
            .zip(&lines)
            .map(|(l, (ordered, accepted))| receipt(l.line_id, (*accepted).min(*ordered)))
            .collect();

        let plan = ReceivingService::plan(PurchaseOrderStatus::Approved, &order, &rcpt).unwrap();
        let all_full = lines.iter().all(|(ordered, accepted)| accepted >= ordered);
        prop_assert_eq!(plan.new_status == PurchaseOrderStatus::Received, all_full);
    }
}
