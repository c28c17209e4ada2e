//! Expense payloads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::expense::ExpenseCategory;
use crate::validation::{FieldErrors, LooseValue, Validate, ValidationErrors};

/// Payload for `POST /finance/expenses`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitExpenseRequest {
    /// Category.
    pub category: Option<String>,
    /// Amount claimed.
    pub amount: Option<LooseValue>,
    /// Currency code.
    pub currency: Option<String>,
    /// What was bought.
    pub description: Option<String>,
    /// When it was incurred.
    pub incurred_on: Option<String>,
    /// Link to the receipt image.
    pub receipt_url: Option<String>,
}

/// A validated expense claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Category.
    pub category: ExpenseCategory,
    /// Amount.
    pub amount: Decimal,
    /// Currency.
    pub currency: String,
    /// Description.
    pub description: String,
    /// Date incurred.
    pub incurred_on: NaiveDate,
    /// Receipt link.
    pub receipt_url: Option<String>,
}

impl Validate for SubmitExpenseRequest {
    type Output = NewExpense;

    fn validate(self) -> Result<NewExpense, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let category = errs.enum_value::<ExpenseCategory>("category", self.category.as_deref());
        let amount = errs.positive_decimal("amount", self.amount.as_ref());
        let currency = errs.currency("currency", self.currency.as_deref());
        let description = errs.required_text("description", self.description.as_deref());
        let incurred_on = errs.date("incurredOn", self.incurred_on.as_deref());
        let receipt_url = errs.optional_url("receiptUrl", self.receipt_url.as_deref());

        match (category, amount, currency, description, incurred_on) {
            (Some(category), Some(amount), Some(currency), Some(description), Some(incurred_on))
                if errs.is_empty() =>
            {
                Ok(NewExpense {
                    category,
                    amount,
                    currency,
                    description,
                    incurred_on,
                    receipt_url,
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_expense() {
        let expense = SubmitExpenseRequest {
            category: Some("meals".into()),
            amount: Some(LooseValue::Number(serde_json::Number::from(45))),
            currency: Some("zar".into()),
            description: Some("Site visit lunch".into()),
            incurred_on: Some("2026-03-03".into()),
            receipt_url: None,
        }
        .validate()
        .unwrap();
        assert_eq!(expense.amount, dec!(45));
        assert_eq!(expense.currency, "ZAR");
    }

    #[test]
    fn test_amount_and_currency_rules() {
        let errs = SubmitExpenseRequest {
            category: Some("MEALS".into()),
            amount: Some("-5".into()),
            currency: Some("RA".into()),
            description: Some("Lunch".into()),
            incurred_on: Some("2026-03-03".into()),
            receipt_url: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("amount"), Some("positive"));
        assert_eq!(errs.code_for("currency"), Some("currency"));
    }
}
