//! # Axum Helpers
//!
//! Shared HTTP plumbing for the events service.
//!
//! - **[`errors`]**: the JSON error envelope, [`ErrorCode`] and [`AppError`]
//! - **[`extractors`]**: [`ValidatedJson`], [`ValidatedQuery`], [`IdPath`]
//! - **[`server`]**: router assembly, `/health`, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{IdPath, ValidatedJson, ValidatedQuery};
pub use server::{create_production_app, create_router, health_router};
