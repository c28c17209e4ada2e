//! Helpers shared by the repositories.

use chrono::{DateTime, Utc};
use ridgeline_core::validation::EnumValue;
use ridgeline_shared::types::{PageRequest, PageResponse};
use sea_orm::sea_query::{Condition, Expr, Func};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, Select};
use thiserror::Error;
use uuid::Uuid;

/// A status or type column held a value the domain enum does not know.
#[derive(Debug, Error)]
#[error("Unrecognized stored value '{value}' for {kind}")]
pub struct UnknownStoredValue {
    kind: &'static str,
    value: String,
}

/// Parses a stored status/type column into its domain enum.
pub fn decode<E: EnumValue>(raw: &str) -> Result<E, UnknownStoredValue> {
    E::from_wire(raw).ok_or_else(|| UnknownStoredValue {
        kind: std::any::type_name::<E>()
            .rsplit("::")
            .next()
            .unwrap_or_default(),
        value: raw.to_string(),
    })
}

/// Runs `select` for one page and returns it with the total count.
pub async fn fetch_page<'db, E, C>(
    conn: &'db C,
    select: Select<E>,
    page: PageRequest,
) -> Result<PageResponse<E::Model>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: Sync + 'db,
{
    let paginator = select.paginate(conn, page.limit());
    let total = paginator.num_items().await?;
    let data = paginator.fetch_page(page.index()).await?;
    Ok(PageResponse::new(data, page, total))
}

/// Case-insensitive substring match against any of `columns`.
pub fn search_condition<C: ColumnTrait>(columns: &[C], term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    columns.iter().fold(Condition::any(), |cond, col| {
        cond.add(Expr::expr(Func::lower(Expr::col(*col))).like(pattern.clone()))
    })
}

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Human-facing reference such as `PO-20260301-3F2A9C1D`.
pub fn reference_number(prefix: &str, id: Uuid, at: DateTime<Utc>) -> String {
    let simple = id.simple().to_string().to_ascii_uppercase();
    format!("{prefix}-{}-{}", at.format("%Y%m%d"), &simple[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ridgeline_core::procurement::PurchaseOrderStatus;

    #[test]
    fn test_decode_known_and_unknown() {
        let status: PurchaseOrderStatus = decode("MATCH_PENDING").unwrap();
        assert_eq!(status, PurchaseOrderStatus::MatchPending);

        let err = decode::<PurchaseOrderStatus>("SHIPPED").unwrap_err();
        assert!(err.to_string().contains("PurchaseOrderStatus"));
        assert!(err.to_string().contains("SHIPPED"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_reference_number_format() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let id = Uuid::parse_str("3f2a9c1d-0000-4000-8000-000000000000").unwrap();
        assert_eq!(reference_number("PO", id, at), "PO-20260301-3F2A9C1D");
    }
}
