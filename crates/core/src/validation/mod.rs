//! Request validation.
//!
//! Every inbound payload shape implements [`Validate`], turning loosely typed
//! input into a normalized domain value or a list of per-field errors. No
//! mutation happens before validation succeeds.

mod errors;
mod fields;
mod query;

pub use errors::{FieldError, ValidationErrors};
pub use fields::{FieldErrors, LooseValue, is_http_url};
pub use query::{ListQuery, ListQueryParams, Unfiltered, parse_loose_bool};

/// Minimum length of free-text reasons (rejections, cancellations).
pub const MIN_REASON_LENGTH: usize = 10;

/// Minimum length of longer narrative fields (incident descriptions, override notes).
pub const MIN_NARRATIVE_LENGTH: usize = 20;

/// A request shape that can be checked and normalized.
pub trait Validate {
    /// The normalized value produced on success.
    type Output;

    /// Checks every constraint, collecting all field errors.
    fn validate(self) -> Result<Self::Output, ValidationErrors>;
}

/// Enum with a fixed set of string values accepted on the wire.
pub trait EnumValue: Sized + Copy + 'static {
    /// Every accepted value.
    fn allowed() -> &'static [Self];

    /// Wire name of this value.
    fn wire_name(&self) -> &'static str;

    /// Case-insensitive lookup by wire name.
    fn from_wire(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::allowed()
            .iter()
            .copied()
            .find(|v| v.wire_name().eq_ignore_ascii_case(raw))
    }

    /// Comma-separated list of accepted values, for error messages.
    fn allowed_list() -> String {
        Self::allowed()
            .iter()
            .map(EnumValue::wire_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
