//! Property tests for the three-way match.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::matching::{MatchLine, MatchState, MatchingService, variance_percent};
use super::types::{MatchStatus, PaymentStatus};

fn money() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..10_000).prop_map(Decimal::from)
}

fn match_line() -> impl Strategy<Value = MatchLine> {
    (money(), quantity(), quantity(), money()).prop_map(|(po, received, qty, price)| MatchLine {
        po_line_id: Uuid::nil(),
        po_unit_price: po,
        received_quantity: received,
        invoice_quantity: qty,
        invoice_unit_price: price,
    })
}

proptest! {
    /// Matching the same invoice twice yields the same status and variances.
    #[test]
    fn prop_matching_is_idempotent(
        lines in prop::collection::vec(match_line(), 1..8),
        tolerance in (0i64..=100).prop_map(Decimal::from),
    ) {
        let first = MatchingService::evaluate(&lines, tolerance);
        let second = MatchingService::evaluate(&lines, tolerance);
        prop_assert_eq!(first, second);
    }

    /// Variances are never negative and are symmetric around the baseline.
    #[test]
    fn prop_variance_non_negative(base in money(), delta in 0i64..10_000) {
        let d = Decimal::new(delta, 2);
        let above = variance_percent(base + d, base);
        prop_assert!(above >= Decimal::ZERO);
        if base > d {
            prop_assert_eq!(above, variance_percent(base - d, base));
        }
    }

    /// An invoice equal to the order and receipt always matches, whatever the tolerance.
    #[test]
    fn prop_exact_invoice_always_matches(
        price in money(),
        qty in quantity(),
        tolerance in (0i64..=100).prop_map(Decimal::from),
    ) {
        let line = MatchLine {
            po_line_id: Uuid::nil(),
            po_unit_price: price,
            received_quantity: qty,
            invoice_quantity: qty,
            invoice_unit_price: price,
        };
        let outcome = MatchingService::evaluate(&[line], tolerance);
        prop_assert_eq!(outcome.status, MatchStatus::Matched);
        prop_assert_eq!(outcome.price_variance, Decimal::ZERO);
    }

    /// Raising the tolerance never turns a match into a dispute.
    #[test]
    fn prop_tolerance_is_monotonic(
        lines in prop::collection::vec(match_line(), 1..5),
        low in 0i64..=100,
        extra in 0i64..=100,
    ) {
        let low = Decimal::from(low);
        let high = low + Decimal::from(extra);
        let strict = MatchingService::evaluate(&lines, low);
        let relaxed = MatchingService::evaluate(&lines, high);
        if strict.status == MatchStatus::Matched {
            prop_assert_eq!(relaxed.status, MatchStatus::Matched);
        }
    }

    /// Once payment starts, no tolerance can re-open the match.
    #[test]
    fn prop_paid_invoices_cannot_be_rematched(
        lines in prop::collection::vec(match_line(), 1..5),
        tolerance in (0i64..=100).prop_map(Decimal::from),
        paid_in_full in any::<bool>(),
        status in prop::sample::select(vec![MatchStatus::Matched, MatchStatus::Disputed]),
    ) {
        let payment = if paid_in_full { PaymentStatus::Paid } else { PaymentStatus::PartiallyPaid };
        let state = MatchState { status, payment, overridden: false };
        prop_assert!(MatchingService::run(state, &lines, tolerance).is_err());
    }
}
