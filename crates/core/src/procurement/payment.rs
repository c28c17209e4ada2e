//! Invoice payment planning.

use rust_decimal::Decimal;

use super::error::ProcurementError;
use super::types::{MatchStatus, PaymentStatus};

/// Effect of a payment on its invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentPlan {
    /// Paid amount after this payment.
    pub paid_amount: Decimal,
    /// Outstanding amount after this payment.
    pub remaining: Decimal,
    /// Payment status after this payment.
    pub payment_status: PaymentStatus,
}

/// Stateless payment rules.
pub struct PaymentService;

impl PaymentService {
    /// Payment status for a paid amount against a total.
    #[must_use]
    pub fn status_for(total: Decimal, paid: Decimal) -> PaymentStatus {
        if paid >= total {
            PaymentStatus::Paid
        } else if paid > Decimal::ZERO {
            PaymentStatus::PartiallyPaid
        } else {
            PaymentStatus::Unpaid
        }
    }

    /// Checks a payment against the invoice and computes its effect.
    ///
    /// # Errors
    ///
    /// - `NotMatched` unless the invoice is `MATCHED`
    /// - `AlreadyPaid` if nothing is outstanding
    /// - `Overpayment` if `amount` exceeds `total - paid`
    pub fn plan(
        match_status: MatchStatus,
        total: Decimal,
        paid: Decimal,
        amount: Decimal,
    ) -> Result<PaymentPlan, ProcurementError> {
        if match_status != MatchStatus::Matched {
            return Err(ProcurementError::NotMatched(match_status));
        }
        let remaining = total - paid;
        if remaining <= Decimal::ZERO {
            return Err(ProcurementError::AlreadyPaid(PaymentStatus::Paid));
        }
        if amount > remaining {
            return Err(ProcurementError::Overpayment {
                remaining,
                attempted: amount,
            });
        }

        let paid_amount = paid + amount;
        Ok(PaymentPlan {
            paid_amount,
            remaining: total - paid_amount,
            payment_status: Self::status_for(total, paid_amount),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_partial_then_exact_remainder() {
        let first = PaymentService::plan(MatchStatus::Matched, dec!(1000), dec!(0), dec!(400)).unwrap();
        assert_eq!(first.payment_status, PaymentStatus::PartiallyPaid);
        assert_eq!(first.remaining, dec!(600));

        let second =
            PaymentService::plan(MatchStatus::Matched, dec!(1000), first.paid_amount, dec!(600)).unwrap();
        assert_eq!(second.payment_status, PaymentStatus::Paid);
        assert_eq!(second.remaining, dec!(0));
    }

    #[test]
    fn test_overpayment_rejected() {
        let err = PaymentService::plan(MatchStatus::Matched, dec!(1000), dec!(900), dec!(100.01)).unwrap_err();
        assert!(matches!(
            err,
            ProcurementError::Overpayment { remaining, .. } if remaining == dec!(100)
        ));
    }

    #[test]
    fn test_requires_matched_invoice() {
        for status in [MatchStatus::MatchPending, MatchStatus::Disputed] {
            let err = PaymentService::plan(status, dec!(10), dec!(0), dec!(1)).unwrap_err();
            assert_eq!(err.error_code(), "INVOICE_NOT_MATCHED");
        }
    }

    #[test]
    fn test_fully_paid_invoice_rejects_more() {
        let err = PaymentService::plan(MatchStatus::Matched, dec!(10), dec!(10), dec!(1)).unwrap_err();
        assert_eq!(err.error_code(), "INVOICE_ALREADY_PAID");
    }

    #[test]
    fn test_status_for() {
        assert_eq!(PaymentService::status_for(dec!(10), dec!(0)), PaymentStatus::Unpaid);
        assert_eq!(PaymentService::status_for(dec!(10), dec!(5)), PaymentStatus::PartiallyPaid);
        assert_eq!(PaymentService::status_for(dec!(10), dec!(10)), PaymentStatus::Paid);
    }
}
