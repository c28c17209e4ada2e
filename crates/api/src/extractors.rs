//! Request extractors that validate before the handler runs.
//!
//! Handlers receive normalized values; malformed input never reaches a
//! repository.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use ridgeline_core::validation::{EnumValue, ListQuery, ListQueryParams, Unfiltered, Validate};
use ridgeline_shared::AppError;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body deserialized into `T` and validated into `T::Output`.
///
/// An empty body is treated as `T::default()`, so actions with only
/// optional fields can be posted without one.
#[derive(Debug)]
pub struct ValidJson<T: Validate>(pub T::Output);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: Validate + DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidBody(e.body_text()))?;

        let payload = if bytes.iter().all(u8::is_ascii_whitespace) {
            T::default()
        } else {
            serde_json::from_slice::<T>(&bytes)
                .map_err(|e| AppError::InvalidBody(e.to_string()))?
        };

        Ok(Self(payload.validate()?))
    }
}

/// Query string deserialized into `T` and validated into `T::Output`.
#[derive(Debug)]
pub struct ValidQuery<T: Validate>(pub T::Output);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: Validate + DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidQuery(e.body_text()))?;
        Ok(Self(params.validate()?))
    }
}

/// Shared list parameters, validated against the endpoint's status (`S`)
/// and type (`K`) filters.
#[derive(Debug)]
pub struct ListParams<S = Unfiltered, K = Unfiltered>(pub ListQuery<S, K>);

impl<S, K, St> FromRequestParts<St> for ListParams<S, K>
where
    S: EnumValue + Send,
    K: EnumValue + Send,
    St: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &St) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListQueryParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidQuery(e.body_text()))?;
        Ok(Self(params.validate_with::<S, K>()?))
    }
}
