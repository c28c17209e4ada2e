//! Request-level errors shared by every vertical.
//!
//! Failures that happen before a domain rule is consulted (credentials,
//! capabilities, unreadable input) are `AppError`s. Each vertical's own
//! error enum covers the rest. Both expose `status_code` and `error_code`.

use thiserror::Error;

use crate::jwt::JwtError;

/// Errors raised while admitting a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// No bearer token on a protected route.
    #[error("Authorization header with Bearer token is required")]
    MissingToken,

    /// Token past its expiry.
    #[error("Token has expired")]
    TokenExpired,

    /// Token present but unusable.
    #[error("{0}")]
    InvalidToken(&'static str),

    /// Handler reached without verified claims.
    #[error("Authentication required")]
    Unauthenticated,

    /// The caller's role lacks the named capability.
    #[error("This action requires the {0} capability")]
    MissingCapability(&'static str),

    /// Body is not valid JSON for the endpoint.
    #[error("{0}")]
    InvalidBody(String),

    /// Query string could not be decoded.
    #[error("{0}")]
    InvalidQuery(String),

    /// Unexpected server-side failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidBody(_) | Self::InvalidQuery(_) => 400,
            Self::MissingToken | Self::TokenExpired | Self::InvalidToken(_) | Self::Unauthenticated => {
                401
            }
            Self::MissingCapability(_) => 403,
            Self::Internal(_) => 500,
        }
    }

    /// Machine-readable code returned as `error`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::Unauthenticated => "UNAUTHORIZED",
            Self::MissingCapability(_) => "MISSING_CAPABILITY",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => Self::TokenExpired,
            JwtError::MissingRole => Self::InvalidToken("Token carries no role"),
            JwtError::Invalid(_) => Self::InvalidToken("Invalid or malformed token"),
            JwtError::Signing(detail) => Self::Internal(detail),
        }
    }
}
