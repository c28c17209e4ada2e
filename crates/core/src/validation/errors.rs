//! Structured validation errors.

use serde::Serialize;
use thiserror::Error;

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field path, e.g. `lines[1].unitPrice`.
    pub field: String,
    /// Machine-readable constraint code, e.g. `required`, `min_length`.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// All constraint failures for one payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Builds an error list holding one failure.
    #[must_use]
    pub fn single(field: impl Into<String>, code: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field: field.into(),
            code,
            message: message.into(),
        }])
    }

    /// Returns the failures.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns true if the given field has at least one failure.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Returns the code of the first failure recorded for a field.
    #[must_use]
    pub fn code_for(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.code)
    }
}

