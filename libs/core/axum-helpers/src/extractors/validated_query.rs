use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

/// Query string decoded into `T` and checked with `Validate`.
///
/// Pair with `#[serde(deny_unknown_fields)]` on `T` to reject unexpected
/// parameters.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidRequest {
                message: "Query string is invalid".to_string(),
                details: Some(json!({ "query": e.body_text() })),
            })?;

        data.validate()?;

        Ok(ValidatedQuery(data))
    }
}
