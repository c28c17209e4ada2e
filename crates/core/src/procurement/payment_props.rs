//! Property tests for invoice payments.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::payment::PaymentService;
use super::types::{MatchStatus, PaymentStatus};

proptest! {
    /// Whatever sequence of payments is attempted, paid never exceeds total.
    #[test]
    fn prop_paid_never_exceeds_total(
        total_cents in 1i64..10_000_000,
        attempts in prop::collection::vec(1i64..5_000_000, 1..20),
    ) {
        let total = Decimal::new(total_cents, 2);
        let mut paid = Decimal::ZERO;
        for cents in attempts {
            let amount = Decimal::new(cents, 2);
            if let Ok(plan) = PaymentService::plan(MatchStatus::Matched, total, paid, amount) {
                paid = plan.paid_amount;
                prop_assert_eq!(plan.remaining, total - paid);
            }
            prop_assert!(paid <= total);
        }
    }

    /// Paying exactly the remainder always settles the invoice.
    #[test]
    fn prop_exact_remainder_pays_invoice(
        total_cents in 2i64..10_000_000,
        paid_fraction in 0u32..100,
    ) {
        let total = Decimal::new(total_cents, 2);
        let paid = (total * Decimal::from(paid_fraction) / Decimal::ONE_HUNDRED).round_dp(2);
        prop_assume!(paid < total);
        let plan = PaymentService::plan(MatchStatus::Matched, total, paid, total - paid).unwrap();
        prop_assert_eq!(plan.payment_status, PaymentStatus::Paid);
        prop_assert_eq!(plan.paid_amount, total);
    }
}
