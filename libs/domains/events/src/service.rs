//! Event lifecycle service
//!
//! Every read and write of an event goes through [`EventService`]; handlers
//! never talk to the repository directly.

use std::sync::Arc;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::filter::build_predicate;
use crate::models::{CreateEvent, Event, EventFilter, EventListQuery, NewEvent, PatchEvent};
use crate::repository::EventRepository;

#[derive(Clone)]
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Published events matching the query, with authors
    #[tracing::instrument(skip(self))]
    pub async fn get_published(&self, query: EventListQuery) -> EventResult<Vec<Event>> {
        let filter = EventFilter::try_from(query)?;
        let predicate = build_predicate(&filter);
        self.repository.find_many(predicate, true).await
    }

    /// Any event by id, published or not
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> EventResult<Event> {
        self.repository
            .find_unique(id, true)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    #[tracing::instrument(skip(self, input), fields(author_id = input.author_id))]
    pub async fn create_draft(&self, input: CreateEvent) -> EventResult<Event> {
        input.validate()?;
        self.repository.create(NewEvent::draft(input)).await
    }

    /// Apply exactly the supplied fields
    #[tracing::instrument(skip(self, input))]
    pub async fn patch(&self, id: i32, input: PatchEvent) -> EventResult<Event> {
        input.validate()?;

        let changes = input.into_changes();
        if changes.is_empty() {
            return Err(EventError::BadInput("No fields to update".to_string()));
        }

        self.repository
            .update(id, changes)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// Remove the event and hand back what it looked like
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> EventResult<Event> {
        self.repository
            .delete(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// Same as patching `isPublished: true`; publishing twice is fine
    #[tracing::instrument(skip(self))]
    pub async fn publish(&self, id: i32) -> EventResult<Event> {
        self.patch(id, PatchEvent::publish()).await
    }
}
