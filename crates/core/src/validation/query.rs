//! List query parameters shared by every collection endpoint.

use std::marker::PhantomData;

use ridgeline_shared::types::PageRequest;
use serde::Deserialize;

use super::{EnumValue, FieldErrors, ValidationErrors};

const MAX_SEARCH_LENGTH: usize = 100;

/// Coerces the loose boolean encodings accepted in query strings.
///
/// `true/1/yes/y/on` map to `true`, `false/0/no/n/off` to `false`; anything
/// else is treated as absent so the filter is not applied.
#[must_use]
pub fn parse_loose_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Raw query string parameters as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryParams {
    /// Page number.
    pub page: Option<String>,
    /// Page size (1-50).
    pub page_size: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// Status filter.
    pub status: Option<String>,
    /// Type/category filter.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Restrict to the caller's own records.
    pub mine: Option<String>,
}

/// Marker for endpoints that take no `status` or `type` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unfiltered {}

impl EnumValue for Unfiltered {
    fn allowed() -> &'static [Self] {
        &[]
    }

    fn wire_name(&self) -> &'static str {
        match *self {}
    }
}

/// Validated list parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<S = Unfiltered, K = Unfiltered> {
    /// Requested page.
    pub page: PageRequest,
    /// Trimmed search text.
    pub search: Option<String>,
    /// Status filter.
    pub status: Option<S>,
    /// Type filter.
    pub kind: Option<K>,
    /// `Some(true)` to restrict to the caller's records.
    pub mine: Option<bool>,
    _marker: PhantomData<(S, K)>,
}

impl<S, K> Default for ListQuery<S, K> {
    fn default() -> Self {
        Self {
            page: PageRequest::default(),
            search: None,
            status: None,
            kind: None,
            mine: None,
            _marker: PhantomData,
        }
    }
}

impl<S, K> ListQuery<S, K> {
    /// Returns true when only the caller's own records should be listed.
    #[must_use]
    pub fn only_mine(&self) -> bool {
        self.mine == Some(true)
    }
}

impl ListQueryParams {
    /// Validates the parameters against the endpoint's status and type enums.
    ///
    /// Filters the endpoint does not support are ignored.
    pub fn validate_with<S: EnumValue, K: EnumValue>(
        self,
    ) -> Result<ListQuery<S, K>, ValidationErrors> {
        let mut errs = FieldErrors::new();

        let page = errs
            .integer_in_range("page", self.page.as_deref(), 1, u32::MAX)
            .unwrap_or(1);
        let page_size = errs
            .integer_in_range(
                "pageSize",
                self.page_size.as_deref(),
                PageRequest::MIN_PAGE_SIZE,
                PageRequest::MAX_PAGE_SIZE,
            )
            .unwrap_or(PageRequest::DEFAULT_PAGE_SIZE);
        let search = errs.max_length("search", self.search.as_deref(), MAX_SEARCH_LENGTH);

        let status = if S::allowed().is_empty() {
            None
        } else {
            errs.optional_enum::<S>("status", self.status.as_deref())
        };
        let kind = if K::allowed().is_empty() {
            None
        } else {
            errs.optional_enum::<K>("type", self.kind.as_deref())
        };
        let mine = self.mine.as_deref().and_then(parse_loose_bool);

        errs.check()?;

        let page = PageRequest::new(page, page_size).unwrap_or_default();
        Ok(ListQuery {
            page,
            search,
            status,
            kind,
            mine,
            _marker: PhantomData,
        })
    }

    /// Validates parameters for endpoints without status or type filters.
    pub fn validate_plain(self) -> Result<ListQuery, ValidationErrors> {
        self.validate_with::<Unfiltered, Unfiltered>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskStatus;

    fn params(mine: Option<&str>) -> ListQueryParams {
        ListQueryParams {
            mine: mine.map(String::from),
            ..ListQueryParams::default()
        }
    }

    #[test]
    fn test_loose_bool_truthy() {
        for raw in ["true", "1", "yes", "y", "TRUE", " Yes ", "on"] {
            assert_eq!(parse_loose_bool(raw), Some(true), "{raw}");
        }
    }

    #[test]
    fn test_loose_bool_falsy() {
        for raw in ["false", "0", "no", "n", "FALSE", "off"] {
            assert_eq!(parse_loose_bool(raw), Some(false), "{raw}");
        }
    }

    #[test]
    fn test_loose_bool_other_is_absent() {
        for raw in ["", "maybe", "2", "yess", "t"] {
            assert_eq!(parse_loose_bool(raw), None, "{raw}");
        }
    }

    #[test]
    fn test_mine_filter_applied_only_when_true() {
        let q = params(Some("yes")).validate_plain().unwrap();
        assert!(q.only_mine());
        let q = params(Some("0")).validate_plain().unwrap();
        assert_eq!(q.mine, Some(false));
        assert!(!q.only_mine());
        let q = params(Some("whatever")).validate_plain().unwrap();
        assert_eq!(q.mine, None);
    }

    #[test]
    fn test_defaults() {
        let q = ListQueryParams::default().validate_plain().unwrap();
        assert_eq!(q.page, PageRequest::default());
        assert!(q.search.is_none());
    }

    #[test]
    fn test_page_size_bounds() {
        let err = ListQueryParams {
            page_size: Some("51".into()),
            ..ListQueryParams::default()
        }
        .validate_plain()
        .unwrap_err();
        assert_eq!(err.code_for("pageSize"), Some("max"));

        let err = ListQueryParams {
            page: Some("0".into()),
            page_size: Some("0".into()),
            ..ListQueryParams::default()
        }
        .validate_plain()
        .unwrap_err();
        assert!(err.has_field("page"));
        assert!(err.has_field("pageSize"));

        let q = ListQueryParams {
            page: Some("3".into()),
            page_size: Some("50".into()),
            ..ListQueryParams::default()
        }
        .validate_plain()
        .unwrap();
        assert_eq!(q.page.page, 3);
        assert_eq!(q.page.page_size, 50);
    }

    #[test]
    fn test_status_filter_allow_list() {
        let q = ListQueryParams {
            status: Some("in_progress".into()),
            ..ListQueryParams::default()
        }
        .validate_with::<TaskStatus, Unfiltered>()
        .unwrap();
        assert_eq!(q.status, Some(TaskStatus::InProgress));

        let err = ListQueryParams {
            status: Some("SLEEPING".into()),
            ..ListQueryParams::default()
        }
        .validate_with::<TaskStatus, Unfiltered>()
        .unwrap_err();
        assert_eq!(err.code_for("status"), Some("enum"));
    }

    #[test]
    fn test_unsupported_filters_are_ignored() {
        let q = ListQueryParams {
            status: Some("anything".into()),
            kind: Some("else".into()),
            ..ListQueryParams::default()
        }
        .validate_plain()
        .unwrap();
        assert!(q.status.is_none());
        assert!(q.kind.is_none());
    }

    #[test]
    fn test_blank_search_is_absent() {
        let q = ListQueryParams {
            search: Some("   ".into()),
            ..ListQueryParams::default()
        }
        .validate_plain()
        .unwrap();
        assert!(q.search.is_none());
    }
}
