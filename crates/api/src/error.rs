//! JSON error envelope.
//!
//! Every failure leaves the API as `{ "error", "message", "details"? }`.
//! Domain errors carry their own status and code; server-side failures are
//! logged and answered with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ridgeline_core::approvals::ApprovalError;
use ridgeline_core::documents::DocumentError;
use ridgeline_core::finance::FinanceError;
use ridgeline_core::fleet::FleetError;
use ridgeline_core::hr::HrError;
use ridgeline_core::inventory::InventoryError;
use ridgeline_core::procurement::ProcurementError;
use ridgeline_core::roles::Capability;
use ridgeline_core::safety::SafetyError;
use ridgeline_core::tasks::TaskError;
use ridgeline_core::validation::{FieldError, ValidationErrors};
use ridgeline_shared::AppError;
use serde::Serialize;
use tracing::error;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An error ready to be rendered as a response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<Vec<FieldError>>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [FieldError]>,
}

impl ApiError {
    /// Builds an error from a numeric status.
    #[must_use]
    pub fn new(status: u16, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code,
            message: message.into(),
            details: None,
        }
    }

    /// 403 for a role lacking `capability`.
    #[must_use]
    pub fn missing_capability(capability: Capability) -> Self {
        AppError::MissingCapability(capability.as_str()).into()
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            error!(code = self.code, error = %self.message, "Request failed");
            "An internal error occurred"
        } else {
            self.message.as_str()
        };
        let body = ErrorBody {
            error: self.code,
            message,
            details: self.details.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errs: ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: errs.to_string(),
            details: Some(errs.0),
        }
    }
}

/// Implements `From` for error enums exposing `status_code` and `error_code`.
macro_rules! domain_errors {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for ApiError {
                fn from(e: $ty) -> Self {
                    Self::new(e.status_code(), e.error_code(), e.to_string())
                }
            }
        )+
    };
}

domain_errors!(
    AppError,
    ApprovalError,
    DocumentError,
    FinanceError,
    FleetError,
    HrError,
    InventoryError,
    ProcurementError,
    SafetyError,
    TaskError,
);

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_errors_carry_details() {
        let errs = ValidationErrors::single("lines[2].unitPrice", "positive", "must be greater than 0");
        let (status, body) = body_json(errs.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["details"][0]["field"], "lines[2].unitPrice");
        assert_eq!(body["details"][0]["code"], "positive");
    }

    #[tokio::test]
    async fn test_domain_error_keeps_status_and_code() {
        let err = ProcurementError::Overpayment {
            remaining: dec!(500),
            attempted: dec!(600),
        };
        let expected_status = err.status_code();
        let expected_code = err.error_code();
        let (status, body) = body_json(err.into()).await;
        assert_eq!(status.as_u16(), expected_status);
        assert_eq!(body["error"], expected_code);
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_database_error_is_masked() {
        let err = InventoryError::Database("connection reset by peer".into());
        let (status, body) = body_json(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[test]
    fn test_missing_capability() {
        let err = ApiError::missing_capability(Capability::ProcessPayments);
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "MISSING_CAPABILITY");
    }
}
