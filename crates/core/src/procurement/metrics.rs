//! Read-only procurement reporting, recomputed per request.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

const SECONDS_PER_DAY: i64 = 86_400;

/// Start and end of one completed order's cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSample {
    /// Requisition creation, or order creation when raised directly.
    pub started_at: DateTime<Utc>,
    /// Latest goods receipt with accepted quantity.
    pub completed_at: DateTime<Utc>,
}

impl CycleSample {
    /// Cycle length in days (fractional, never negative).
    #[must_use]
    pub fn days(&self) -> Decimal {
        let seconds = (self.completed_at - self.started_at).num_seconds().max(0);
        Decimal::from(seconds) / Decimal::from(SECONDS_PER_DAY)
    }
}

/// Counts gathered by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcurementMetricsInput {
    /// All purchase orders.
    pub total_orders: u64,
    /// Orders with an approval timestamp.
    pub approved_orders: u64,
    /// All vendor invoices.
    pub total_invoices: u64,
    /// Invoices whose match status is `MATCHED` (paid ones included).
    pub matched_invoices: u64,
    /// One sample per order that has completed receiving.
    pub cycles: Vec<CycleSample>,
}

/// Procurement KPIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementMetrics {
    /// Approved orders / all orders, in percent.
    pub compliance_rate: Decimal,
    /// Matched invoices / all invoices, in percent.
    pub invoice_match_rate: Decimal,
    /// Mean requisition-to-receipt time in days.
    pub average_cycle_time_days: Decimal,
    /// All purchase orders.
    pub total_purchase_orders: u64,
    /// Approved purchase orders.
    pub approved_purchase_orders: u64,
    /// All invoices.
    pub total_invoices: u64,
    /// Matched invoices.
    pub matched_invoices: u64,
    /// Orders included in the cycle time.
    pub completed_purchase_orders: u64,
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `numerator / denominator × 100` rounded to 2 dp; zero when the denominator is zero.
#[must_use]
pub fn percentage(numerator: u64, denominator: u64) -> Decimal {
    if denominator == 0 {
        return Decimal::ZERO;
    }
    round2(Decimal::from(numerator) * Decimal::ONE_HUNDRED / Decimal::from(denominator))
}

impl ProcurementMetrics {
    /// Computes the KPIs from raw counts.
    #[must_use]
    pub fn compute(input: &ProcurementMetricsInput) -> Self {
        let completed = input.cycles.len() as u64;
        let average_cycle_time_days = if input.cycles.is_empty() {
            Decimal::ZERO
        } else {
            let total: Decimal = input.cycles.iter().map(CycleSample::days).sum();
            round2(total / Decimal::from(completed))
        };

        Self {
            compliance_rate: percentage(input.approved_orders, input.total_orders),
            invoice_match_rate: percentage(input.matched_invoices, input.total_invoices),
            average_cycle_time_days,
            total_purchase_orders: input.total_orders,
            approved_purchase_orders: input.approved_orders,
            total_invoices: input.total_invoices,
            matched_invoices: input.matched_invoices,
            completed_purchase_orders: completed,
        }
    }
}
