//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

/// JSON body that has been decoded and then checked with `Validate`.
///
/// Decoding failures (unknown fields, wrong types, malformed JSON) and
/// validation failures both come back as 400 `VALIDATION_ERROR`.
///
/// ```ignore
/// async fn create_event(ValidatedJson(input): ValidatedJson<CreateEvent>) -> ... {}
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        data.validate()?;

        Ok(ValidatedJson(data))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::InvalidRequest {
        message: "Request body is invalid".to_string(),
        details: Some(json!({ "body": rejection.body_text() })),
    }
}
