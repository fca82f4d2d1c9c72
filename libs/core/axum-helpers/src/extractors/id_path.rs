//! Positive integer `{id}` path parameter.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

/// Extractor for serial primary keys in the path.
///
/// Anything other than an integer `>= 1` is a validation failure on field
/// `id`, reported before the handler runs.
///
/// ```ignore
/// async fn get_event(IdPath(id): IdPath) -> String {
///     format!("Event {}", id)
/// }
///
/// let app = Router::new().route("/events/{id}", get(get_event));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl IdPath {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.parse::<i32>() {
            Ok(id) if id >= 1 => Ok(IdPath(id)),
            _ => Err(invalid_id(raw)),
        }
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidRequest {
                message: e.body_text(),
                details: None,
            })?;

        IdPath::parse(&raw)
    }
}

fn invalid_id(raw: &str) -> AppError {
    let mut error = ValidationError::new("positive_integer")
        .with_message(Cow::Borrowed("id must be a positive integer"));
    error.add_param(Cow::Borrowed("value"), &raw);

    let mut errors = ValidationErrors::new();
    errors.add("id", error);
    AppError::ValidationError(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_positive_integers() {
        assert_eq!(IdPath::parse("1").unwrap(), IdPath(1));
        assert_eq!(IdPath::parse("2147483647").unwrap(), IdPath(i32::MAX));
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        for raw in ["0", "-3", "abc", "1.5", "", "2147483648"] {
            match IdPath::parse(raw) {
                Err(AppError::ValidationError(errors)) => {
                    assert!(errors.field_errors().contains_key("id"), "input {raw:?}");
                }
                other => panic!("expected validation error for {raw:?}, got {other:?}"),
            }
        }
    }
}
