//! Fleet calculations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{FleetCostType, FleetDocumentStatus};

/// Documents expiring within this many days are flagged.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// Cost totals per type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    /// Sum of every cost.
    pub total: Decimal,
    /// Sum per cost type; types with no costs are omitted.
    pub by_type: BTreeMap<FleetCostType, Decimal>,
    /// Number of cost records.
    pub entries: u64,
}

/// Stateless fleet rules.
pub struct FleetService;

impl FleetService {
    /// Derives a document's status from its expiry date.
    #[must_use]
    pub fn document_status(expires_on: NaiveDate, today: NaiveDate) -> FleetDocumentStatus {
        let days_left = (expires_on - today).num_days();
        if days_left < 0 {
            FleetDocumentStatus::Expired
        } else if days_left <= EXPIRY_WARNING_DAYS {
            FleetDocumentStatus::ExpiringSoon
        } else {
            FleetDocumentStatus::Valid
        }
    }

    /// Totals costs by type.
    pub fn summarize<I>(costs: I) -> CostSummary
    where
        I: IntoIterator<Item = (FleetCostType, Decimal)>,
    {
        let mut summary = CostSummary::default();
        for (kind, amount) in costs {
            summary.total += amount;
            *summary.by_type.entry(kind).or_default() += amount;
            summary.entries += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_document_status_windows() {
        let today = d("2026-03-01");
        assert_eq!(FleetService::document_status(d("2026-02-28"), today), FleetDocumentStatus::Expired);
        assert_eq!(FleetService::document_status(d("2026-03-01"), today), FleetDocumentStatus::ExpiringSoon);
        assert_eq!(FleetService::document_status(d("2026-03-31"), today), FleetDocumentStatus::ExpiringSoon);
        assert_eq!(FleetService::document_status(d("2026-04-01"), today), FleetDocumentStatus::Valid);
    }

    #[test]
    fn test_summarize_costs() {
        let summary = FleetService::summarize([
            (FleetCostType::Fuel, dec!(1200.50)),
            (FleetCostType::Tyres, dec!(8000)),
            (FleetCostType::Fuel, dec!(799.50)),
        ]);
        assert_eq!(summary.total, dec!(10000));
        assert_eq!(summary.by_type[&FleetCostType::Fuel], dec!(2000));
        assert_eq!(summary.entries, 3);
        assert!(!summary.by_type.contains_key(&FleetCostType::Repair));

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["byType"].get("FUEL").is_some());
    }
}
