//! Event domain error types

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

/// Result type for event operations
pub type EventResult<T> = Result<T, EventError>;

#[derive(Debug, Error)]
pub enum EventError {
    /// Input failed the request schema
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// Well-formed input that cannot be applied
    #[error("{0}")]
    BadInput(String),

    #[error("Event with id {0} not found")]
    NotFound(i32),

    /// `authorId` points at no user
    #[error("Author with id {0} does not exist")]
    UnknownAuthor(i32),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation(errors) => AppError::ValidationError(errors),
            EventError::BadInput(msg) => AppError::BadRequest(msg),
            EventError::NotFound(id) => {
                AppError::NotFound(format!("Event with id {} not found", id))
            }
            EventError::UnknownAuthor(id) => {
                AppError::InvalidReference(format!("Author with id {} does not exist", id))
            }
            EventError::Conflict(msg) => AppError::Conflict(msg),
            EventError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_domain_errors_map_to_distinct_statuses() {
        let cases = [
            (EventError::BadInput("No fields to update".into()), StatusCode::BAD_REQUEST),
            (EventError::NotFound(7), StatusCode::NOT_FOUND),
            (EventError::UnknownAuthor(9), StatusCode::UNPROCESSABLE_ENTITY),
            (EventError::Conflict("duplicate".into()), StatusCode::CONFLICT),
            (EventError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (EventError::Validation(ValidationErrors::new()), StatusCode::BAD_REQUEST),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_not_found_message_names_the_id() {
        match AppError::from(EventError::NotFound(999999)) {
            AppError::NotFound(msg) => assert_eq!(msg, "Event with id 999999 not found"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
