//! Events Domain
//!
//! Events are authored by users, start life as drafts and become visible in
//! the public listing once published.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP layer; ValidatedJson / ValidatedQuery / IdPath
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Draft/publish lifecycle, patch rules
//! └──────┬──────┘
//!        │  EventPredicate (filter.rs)
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + in-memory / Postgres implementations
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{handlers, InMemoryEventRepository, EventService, Author};
//!
//! let repo = InMemoryEventRepository::with_authors([Author { id: 1, name: Some("Alice".into()) }]);
//! let router = handlers::router(EventService::new(repo));
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod patch;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{EventError, EventResult};
pub use filter::{EventPredicate, build_predicate};
pub use handlers::ApiDoc;
pub use models::{
    Author, CreateEvent, Event, EventChanges, EventFilter, EventListQuery, NewEvent, PatchEvent,
};
pub use patch::Patch;
pub use postgres::PgEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;
