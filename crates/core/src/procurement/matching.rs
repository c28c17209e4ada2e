//! Three-way match: order price and received quantity against the invoice.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use uuid::Uuid;

use super::error::ProcurementError;
use super::types::{MatchStatus, PaymentStatus};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Tolerance used when configuration holds no usable value.
pub const DEFAULT_TOLERANCE_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Parses the configured default tolerance.
///
/// Values that are not decimals in 0-100 fall back to
/// [`DEFAULT_TOLERANCE_PERCENT`].
#[must_use]
pub fn configured_tolerance(raw: &str) -> Decimal {
    raw.trim()
        .parse::<Decimal>()
        .ok()
        .filter(|t| (Decimal::ZERO..=HUNDRED).contains(t))
        .unwrap_or(DEFAULT_TOLERANCE_PERCENT)
}

/// Inputs for matching one invoice line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLine {
    /// Order line the invoice line refers to.
    pub po_line_id: Uuid,
    /// Unit price on the order.
    pub po_unit_price: Decimal,
    /// Cumulative accepted quantity on the order line.
    pub received_quantity: Decimal,
    /// Quantity invoiced.
    pub invoice_quantity: Decimal,
    /// Unit price invoiced.
    pub invoice_unit_price: Decimal,
}

/// Where an invoice stands when a match is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchState {
    /// Current match status.
    pub status: MatchStatus,
    /// Current payment status.
    pub payment: PaymentStatus,
    /// True once a dispute was accepted by manual override.
    pub overridden: bool,
}

/// Variances for one invoice line, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineVariance {
    /// Order line.
    pub po_line_id: Uuid,
    /// Price variance.
    pub price_variance: Decimal,
    /// Quantity variance.
    pub quantity_variance: Decimal,
}

/// Result of matching an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    /// `MATCHED` or `DISPUTED`.
    pub status: MatchStatus,
    /// Largest line price variance.
    pub price_variance: Decimal,
    /// Largest line quantity variance.
    pub quantity_variance: Decimal,
    /// Tolerance applied.
    pub tolerance: Decimal,
    /// Per-line detail.
    pub lines: Vec<LineVariance>,
}

/// `|actual - baseline| / baseline × 100`, rounded to 2 dp.
///
/// A zero baseline yields 0% when `actual` is also zero and 100% otherwise.
#[must_use]
pub fn variance_percent(actual: Decimal, baseline: Decimal) -> Decimal {
    if baseline.is_zero() {
        return if actual.is_zero() { Decimal::ZERO } else { HUNDRED };
    }
    (actual - baseline)
        .abs()
        .checked_div(baseline.abs())
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(Decimal::MAX)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Stateless three-way match rules.
pub struct MatchingService;

impl MatchingService {
    /// Computes line and invoice variances and the resulting status.
    ///
    /// Quantity is compared per order line: invoice lines sharing an order
    /// line are summed before the received quantity is applied.
    ///
    /// Deterministic: the same lines and tolerance always give the same outcome.
    #[must_use]
    pub fn evaluate(lines: &[MatchLine], tolerance: Decimal) -> MatchOutcome {
        let mut invoiced: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        for line in lines {
            *invoiced.entry(line.po_line_id).or_default() += line.invoice_quantity;
        }

        let lines: Vec<LineVariance> = lines
            .iter()
            .map(|l| LineVariance {
                po_line_id: l.po_line_id,
                price_variance: variance_percent(l.invoice_unit_price, l.po_unit_price),
                quantity_variance: variance_percent(
                    invoiced.get(&l.po_line_id).copied().unwrap_or(l.invoice_quantity),
                    l.received_quantity,
                ),
            })
            .collect();

        let price_variance = lines
            .iter()
            .map(|l| l.price_variance)
            .max()
            .unwrap_or(Decimal::ZERO);
        let quantity_variance = lines
            .iter()
            .map(|l| l.quantity_variance)
            .max()
            .unwrap_or(Decimal::ZERO);

        let status = if price_variance <= tolerance && quantity_variance <= tolerance {
            MatchStatus::Matched
        } else {
            MatchStatus::Disputed
        };

        MatchOutcome {
            status,
            price_variance,
            quantity_variance,
            tolerance,
            lines,
        }
    }

    /// Runs the match for an invoice in `state`.
    ///
    /// The result is frozen once payment starts or a dispute has been
    /// overridden.
    ///
    /// # Errors
    ///
    /// - `NotMatchable` for a status outside `MATCH_PENDING|MATCHED|DISPUTED`
    /// - `PaymentStarted` once anything has been paid
    /// - `MatchOverridden` after a manual override
    pub fn run(
        state: MatchState,
        lines: &[MatchLine],
        tolerance: Decimal,
    ) -> Result<MatchOutcome, ProcurementError> {
        if !state.status.can_rematch() {
            return Err(ProcurementError::NotMatchable(state.status));
        }
        if state.payment != PaymentStatus::Unpaid {
            return Err(ProcurementError::PaymentStarted(state.payment));
        }
        if state.overridden {
            return Err(ProcurementError::MatchOverridden);
        }
        Ok(Self::evaluate(lines, tolerance))
    }

    /// Disputed → Matched by manual override. Notes are validated by the caller.
    pub fn override_dispute(current: MatchStatus) -> Result<MatchStatus, ProcurementError> {
        if current == MatchStatus::Disputed {
            Ok(MatchStatus::Matched)
        } else {
            Err(ProcurementError::NotDisputed(current))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn line(po_price: Decimal, received: Decimal, qty: Decimal, price: Decimal) -> MatchLine {
        MatchLine {
            po_line_id: Uuid::new_v4(),
            po_unit_price: po_price,
            received_quantity: received,
            invoice_quantity: qty,
            invoice_unit_price: price,
        }
    }

    #[test]
    fn test_exact_invoice_matches() {
        let outcome = MatchingService::evaluate(&[line(dec!(10.00), dec!(100), dec!(100), dec!(10.00))], dec!(5));
        assert_eq!(outcome.status, MatchStatus::Matched);
        assert_eq!(outcome.price_variance, dec!(0));
        assert_eq!(outcome.quantity_variance, dec!(0));
    }

    #[test]
    fn test_ten_percent_price_is_disputed_at_five() {
        let outcome = MatchingService::evaluate(&[line(dec!(10.00), dec!(100), dec!(100), dec!(11.00))], dec!(5));
        assert_eq!(outcome.status, MatchStatus::Disputed);
        assert_eq!(outcome.price_variance, dec!(10));
        assert_eq!(outcome.quantity_variance, dec!(0));
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let outcome = MatchingService::evaluate(&[line(dec!(10.00), dec!(100), dec!(100), dec!(10.50))], dec!(5));
        assert_eq!(outcome.price_variance, dec!(5));
        assert_eq!(outcome.status, MatchStatus::Matched);
    }

    #[test]
    fn test_invoice_variance_is_max_of_lines() {
        let outcome = MatchingService::evaluate(
            &[
                line(dec!(10), dec!(100), dec!(100), dec!(10.2)),
                line(dec!(4), dec!(50), dec!(52), dec!(4)),
            ],
            dec!(5),
        );
        assert_eq!(outcome.price_variance, dec!(2));
        assert_eq!(outcome.quantity_variance, dec!(4));
        assert_eq!(outcome.lines.len(), 2);
        assert_eq!(outcome.status, MatchStatus::Matched);
    }

    #[test]
    fn test_configured_tolerance_falls_back() {
        assert_eq!(configured_tolerance("2.5"), dec!(2.5));
        assert_eq!(configured_tolerance(" 10 "), dec!(10));
        assert_eq!(configured_tolerance("abc"), dec!(5));
        assert_eq!(configured_tolerance("150"), dec!(5));
        assert_eq!(configured_tolerance("-1"), dec!(5));
    }

    #[test]
    fn test_zero_baseline() {
        assert_eq!(variance_percent(dec!(0), dec!(0)), dec!(0));
        assert_eq!(variance_percent(dec!(3), dec!(0)), dec!(100));
    }

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(variance_percent(dec!(1), dec!(3)), dec!(66.67));
        assert_eq!(variance_percent(dec!(10.001), dec!(10)), dec!(0.01));
    }

    fn unpaid(status: MatchStatus) -> MatchState {
        MatchState {
            status,
            payment: PaymentStatus::Unpaid,
            overridden: false,
        }
    }

    #[test]
    fn test_rematch_allowed_from_disputed() {
        let lines = [line(dec!(10), dec!(100), dec!(100), dec!(11))];
        let relaxed = MatchingService::run(unpaid(MatchStatus::Disputed), &lines, dec!(15)).unwrap();
        assert_eq!(relaxed.status, MatchStatus::Matched);
    }

    #[rstest]
    #[case(PaymentStatus::PartiallyPaid)]
    #[case(PaymentStatus::Paid)]
    fn test_rematch_rejected_once_payment_started(#[case] payment: PaymentStatus) {
        let lines = [line(dec!(10), dec!(100), dec!(100), dec!(10.30))];
        let first = MatchingService::run(unpaid(MatchStatus::MatchPending), &lines, dec!(5)).unwrap();
        assert_eq!(first.status, MatchStatus::Matched);

        let state = MatchState {
            status: first.status,
            payment,
            overridden: false,
        };
        let err = MatchingService::run(state, &lines, dec!(0)).unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "INVOICE_PAYMENT_STARTED");
    }

    #[test]
    fn test_rematch_rejected_after_override() {
        let lines = [line(dec!(10), dec!(100), dec!(100), dec!(11))];
        let disputed = MatchingService::run(unpaid(MatchStatus::MatchPending), &lines, dec!(5)).unwrap();
        assert_eq!(disputed.status, MatchStatus::Disputed);
        let accepted = MatchingService::override_dispute(disputed.status).unwrap();

        let state = MatchState {
            status: accepted,
            payment: PaymentStatus::Unpaid,
            overridden: true,
        };
        let err = MatchingService::run(state, &lines, dec!(5)).unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "INVOICE_OVERRIDDEN");
    }

    #[test]
    fn test_lines_sharing_an_order_line_are_summed() {
        let po_line_id = Uuid::new_v4();
        let billed = |qty: Decimal| MatchLine {
            po_line_id,
            po_unit_price: dec!(10.00),
            received_quantity: dec!(100),
            invoice_quantity: qty,
            invoice_unit_price: dec!(10.00),
        };

        let doubled = MatchingService::evaluate(&[billed(dec!(100)), billed(dec!(100))], dec!(5));
        assert_eq!(doubled.quantity_variance, dec!(100));
        assert_eq!(doubled.status, MatchStatus::Disputed);
        assert_eq!(doubled.lines.len(), 2);

        let split = MatchingService::evaluate(&[billed(dec!(60)), billed(dec!(40))], dec!(5));
        assert_eq!(split.quantity_variance, dec!(0));
        assert_eq!(split.status, MatchStatus::Matched);
    }

    #[test]
    fn test_override_requires_dispute() {
        assert_eq!(MatchingService::override_dispute(MatchStatus::Disputed).unwrap(), MatchStatus::Matched);
        let err = MatchingService::override_dispute(MatchStatus::Matched).unwrap_err();
        assert_eq!(err.error_code(), "INVOICE_NOT_DISPUTED");
    }
}
