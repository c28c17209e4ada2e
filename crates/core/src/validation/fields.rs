//! Field-level constraint helpers.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::{EnumValue, FieldError, Validate, ValidationErrors};

/// A JSON scalar accepted where a decimal, number or flag is expected.
///
/// Clients send decimals as strings, but bare JSON numbers are tolerated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    /// A JSON string.
    Text(String),
    /// A JSON number.
    Number(serde_json::Number),
    /// A JSON boolean.
    Bool(bool),
}

impl LooseValue {
    /// Returns the value rendered as text.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for LooseValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Accumulates field errors while a payload is being checked.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure.
    pub fn add(&mut self, field: impl Into<String>, code: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            code,
            message: message.into(),
        });
    }

    /// Returns true when nothing has failed so far.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts the accumulated failures into an error value.
    #[must_use]
    pub fn into_errors(self) -> ValidationErrors {
        ValidationErrors(self.errors)
    }

    /// Fails with the accumulated errors, if any.
    pub fn check(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.into_errors())
        }
    }

    /// Required, non-blank text. Returns the trimmed value.
    pub fn required_text(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v.to_string()),
            _ => {
                self.add(field, "required", format!("{field} is required"));
                None
            }
        }
    }

    /// Optional text; blank input is treated as absent.
    #[must_use]
    pub fn optional_text(value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    }

    /// Required text of at least `min` characters.
    pub fn min_length(&mut self, field: &str, value: Option<&str>, min: usize) -> Option<String> {
        let text = self.required_text(field, value)?;
        if text.chars().count() < min {
            self.add(
                field,
                "min_length",
                format!("{field} must be at least {min} characters"),
            );
            return None;
        }
        Some(text)
    }

    /// Optional text capped at `max` characters.
    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: usize) -> Option<String> {
        let text = Self::optional_text(value)?;
        if text.chars().count() > max {
            self.add(
                field,
                "max_length",
                format!("{field} must be at most {max} characters"),
            );
            return None;
        }
        Some(text)
    }

    /// Required decimal value.
    pub fn decimal(&mut self, field: &str, value: Option<&LooseValue>) -> Option<Decimal> {
        let Some(raw) = value else {
            self.add(field, "required", format!("{field} is required"));
            return None;
        };
        if let LooseValue::Bool(_) = raw {
            self.add(field, "decimal", format!("{field} must be a decimal number"));
            return None;
        }
        let text = raw.as_text();
        match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
            Ok(d) => Some(d.normalize()),
            Err(_) => {
                self.add(field, "decimal", format!("{field} must be a decimal number"));
                None
            }
        }
    }

    /// Required decimal strictly greater than zero.
    pub fn positive_decimal(&mut self, field: &str, value: Option<&LooseValue>) -> Option<Decimal> {
        let d = self.decimal(field, value)?;
        if d <= Decimal::ZERO {
            self.add(field, "positive", format!("{field} must be greater than 0"));
            return None;
        }
        Some(d)
    }

    /// Required decimal greater than or equal to zero.
    pub fn non_negative_decimal(
        &mut self,
        field: &str,
        value: Option<&LooseValue>,
    ) -> Option<Decimal> {
        let d = self.decimal(field, value)?;
        if d.is_sign_negative() && !d.is_zero() {
            self.add(field, "min", format!("{field} must not be negative"));
            return None;
        }
        Some(d)
    }

    /// Required decimal within `[min, max]`.
    pub fn decimal_in_range(
        &mut self,
        field: &str,
        value: Option<&LooseValue>,
        min: Decimal,
        max: Decimal,
    ) -> Option<Decimal> {
        let d = self.decimal(field, value)?;
        if d < min {
            self.add(field, "min", format!("{field} must be at least {min}"));
            return None;
        }
        if d > max {
            self.add(field, "max", format!("{field} must be at most {max}"));
            return None;
        }
        Some(d)
    }

    /// Optional unsigned integer coerced from a string, within `[min, max]`.
    pub fn integer_in_range(
        &mut self,
        field: &str,
        value: Option<&str>,
        min: u32,
        max: u32,
    ) -> Option<u32> {
        let raw = Self::optional_text(value)?;
        match raw.parse::<u32>() {
            Ok(n) if n < min => {
                self.add(field, "min", format!("{field} must be at least {min}"));
                None
            }
            Ok(n) if n > max => {
                self.add(field, "max", format!("{field} must be at most {max}"));
                None
            }
            Ok(n) => Some(n),
            Err(_) => {
                self.add(field, "integer", format!("{field} must be a whole number"));
                None
            }
        }
    }

    /// Required member of an enum allow-list.
    pub fn enum_value<E: EnumValue>(&mut self, field: &str, value: Option<&str>) -> Option<E> {
        let raw = self.required_text(field, value)?;
        self.parse_enum(field, &raw)
    }

    /// Optional member of an enum allow-list.
    pub fn optional_enum<E: EnumValue>(&mut self, field: &str, value: Option<&str>) -> Option<E> {
        let raw = Self::optional_text(value)?;
        self.parse_enum(field, &raw)
    }

    fn parse_enum<E: EnumValue>(&mut self, field: &str, raw: &str) -> Option<E> {
        let parsed = E::from_wire(raw);
        if parsed.is_none() {
            self.add(
                field,
                "enum",
                format!("{field} must be one of: {}", E::allowed_list()),
            );
        }
        parsed
    }

    /// Required ISO date (`YYYY-MM-DD`).
    pub fn date(&mut self, field: &str, value: Option<&str>) -> Option<NaiveDate> {
        let raw = self.required_text(field, value)?;
        self.parse_date(field, &raw)
    }

    /// Optional ISO date.
    pub fn optional_date(&mut self, field: &str, value: Option<&str>) -> Option<NaiveDate> {
        let raw = Self::optional_text(value)?;
        self.parse_date(field, &raw)
    }

    fn parse_date(&mut self, field: &str, raw: &str) -> Option<NaiveDate> {
        let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
        if parsed.is_none() {
            self.add(field, "date", format!("{field} must be a date (YYYY-MM-DD)"));
        }
        parsed
    }

    /// Required UUID.
    pub fn uuid(&mut self, field: &str, value: Option<&str>) -> Option<Uuid> {
        let raw = self.required_text(field, value)?;
        self.parse_uuid(field, &raw)
    }

    /// Optional UUID.
    pub fn optional_uuid(&mut self, field: &str, value: Option<&str>) -> Option<Uuid> {
        let raw = Self::optional_text(value)?;
        self.parse_uuid(field, &raw)
    }

    fn parse_uuid(&mut self, field: &str, raw: &str) -> Option<Uuid> {
        let parsed = Uuid::parse_str(raw).ok();
        if parsed.is_none() {
            self.add(field, "uuid", format!("{field} must be a UUID"));
        }
        parsed
    }

    /// Required ISO 4217 style currency code (three letters), upper-cased.
    pub fn currency(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let raw = self.required_text(field, value)?;
        if raw.len() != 3 || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
            self.add(field, "currency", format!("{field} must be a 3-letter currency code"));
            return None;
        }
        Some(raw.to_ascii_uppercase())
    }

    /// Optional absolute `http`/`https` URL.
    pub fn optional_url(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let raw = Self::optional_text(value)?;
        if !is_http_url(&raw) {
            self.add(field, "url", format!("{field} must be an http(s) URL"));
            return None;
        }
        Some(raw)
    }

    /// Required absolute `http`/`https` URL.
    pub fn url(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let raw = self.required_text(field, value)?;
        if !is_http_url(&raw) {
            self.add(field, "url", format!("{field} must be an http(s) URL"));
            return None;
        }
        Some(raw)
    }

    /// Required, non-empty list whose items are validated individually.
    ///
    /// Item failures are reported as `field[index].child`.
    pub fn nested_list<T: Validate>(
        &mut self,
        field: &str,
        items: Option<Vec<T>>,
    ) -> Option<Vec<T::Output>> {
        let items = match items {
            Some(items) if !items.is_empty() => items,
            _ => {
                self.add(field, "min_items", format!("{field} must contain at least one item"));
                return None;
            }
        };

        let mut out = Vec::with_capacity(items.len());
        let mut failed = false;
        for (index, item) in items.into_iter().enumerate() {
            match item.validate() {
                Ok(v) => out.push(v),
                Err(ValidationErrors(errors)) => {
                    failed = true;
                    for e in errors {
                        self.add(format!("{field}[{index}].{}", e.field), e.code, e.message);
                    }
                }
            }
        }
        (!failed).then_some(out)
    }
}

/// Returns true for `http://` or `https://` URLs with a non-empty host.
#[must_use]
pub fn is_http_url(raw: &str) -> bool {
    let rest = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !rest.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
