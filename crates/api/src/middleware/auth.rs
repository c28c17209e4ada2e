//! Bearer token authentication for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ridgeline_core::roles::{self, Capability, RoleAccess};
use ridgeline_shared::{AppError, Claims};
use tracing::debug;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Validates the bearer token and stores its claims in request extensions.
///
/// Tokens are issued by the identity service; this layer only verifies
/// the HS256 signature and expiry.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return ApiError::from(AppError::MissingToken).into_response();
    };

    match state.jwt_service.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            debug!(error = %e, "Rejected bearer token");
            ApiError::from(AppError::from(e)).into_response()
        }
    }
}

/// The authenticated caller with their resolved role access.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> ApiResult<Json<Value>> {
///     auth.require(Capability::ManageInventory)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    claims: Claims,
    access: RoleAccess,
}

impl AuthUser {
    /// Builds the caller from verified claims.
    #[must_use]
    pub fn new(claims: Claims) -> Self {
        let access = roles::resolve(&claims.role);
        Self { claims, access }
    }

    /// Returns the user ID from the claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.claims.user_id()
    }

    /// Returns the role as carried in the token.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.claims.role
    }

    /// Returns the inner claims.
    #[must_use]
    pub const fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Returns the resolved modules and capabilities.
    #[must_use]
    pub const fn access(&self) -> &RoleAccess {
        &self.access
    }

    /// Returns true if the caller's role holds `capability`.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.access.can(capability)
    }

    /// Fails with 403 unless the caller's role holds `capability`.
    pub fn require(&self, capability: Capability) -> Result<(), ApiError> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(ApiError::missing_capability(capability))
        }
    }

    /// Fails with 403 unless the caller holds at least one of `capabilities`.
    pub fn require_any(&self, capabilities: &[Capability]) -> Result<(), ApiError> {
        match capabilities {
            [first, ..] if !capabilities.iter().any(|c| self.can(*c)) => {
                Err(ApiError::missing_capability(*first))
            }
            _ => Ok(()),
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(Self::new)
            .ok_or_else(|| AppError::Unauthenticated.into())
    }
}
