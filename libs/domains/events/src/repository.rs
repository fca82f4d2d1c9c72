//! Event storage gateway

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{EventError, EventResult};
use crate::filter::EventPredicate;
use crate::models::{Author, Event, EventChanges, NewEvent};

/// Repository trait for event storage operations
///
/// Mutations always return the record with its author projection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events matching `predicate`, ordered by `start_at` then `id`
    async fn find_many(
        &self,
        predicate: EventPredicate,
        include_author: bool,
    ) -> EventResult<Vec<Event>>;

    async fn find_unique(&self, id: i32, include_author: bool) -> EventResult<Option<Event>>;

    /// Fails with `UnknownAuthor` when `author_id` references no user
    async fn create(&self, event: NewEvent) -> EventResult<Event>;

    /// `None` when no event has this id
    async fn update(&self, id: i32, changes: EventChanges) -> EventResult<Option<Event>>;

    /// Returns the removed record, or `None` when no event has this id
    async fn delete(&self, id: i32) -> EventResult<Option<Event>>;
}

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    events: HashMap<i32, Event>,
}

/// In-memory implementation of EventRepository (for development/testing)
///
/// Knows a fixed set of authors and rejects events pointing elsewhere, the
/// way the foreign key does in Postgres.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    authors: Arc<HashMap<i32, Author>>,
    store: Arc<RwLock<Store>>,
}

impl InMemoryEventRepository {
    pub fn with_authors(authors: impl IntoIterator<Item = Author>) -> Self {
        Self {
            authors: Arc::new(authors.into_iter().map(|a| (a.id, a)).collect()),
            store: Arc::default(),
        }
    }

    fn project(&self, mut event: Event, include_author: bool) -> Event {
        event.author = if include_author {
            self.authors.get(&event.author_id).cloned()
        } else {
            None
        };
        event
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn find_many(
        &self,
        predicate: EventPredicate,
        include_author: bool,
    ) -> EventResult<Vec<Event>> {
        let store = self.store.read().await;

        let mut events: Vec<Event> = store
            .events
            .values()
            .filter(|e| predicate.matches(e))
            .cloned()
            .map(|e| self.project(e, include_author))
            .collect();
        events.sort_by_key(|e| (e.start_at, e.id));

        Ok(events)
    }

    async fn find_unique(&self, id: i32, include_author: bool) -> EventResult<Option<Event>> {
        let store = self.store.read().await;
        Ok(store
            .events
            .get(&id)
            .cloned()
            .map(|e| self.project(e, include_author)))
    }

    async fn create(&self, event: NewEvent) -> EventResult<Event> {
        if !self.authors.contains_key(&event.author_id) {
            return Err(EventError::UnknownAuthor(event.author_id));
        }

        let mut store = self.store.write().await;
        store.last_id += 1;

        let created = Event {
            id: store.last_id,
            author_id: event.author_id,
            author: None,
            title: event.title,
            content: event.content,
            start_at: event.start_at,
            end_at: event.end_at,
            is_public: event.is_public,
            is_published: event.is_published,
            created_at: Utc::now(),
        };
        store.events.insert(created.id, created.clone());

        tracing::info!(event_id = created.id, author_id = created.author_id, "Created event");
        Ok(self.project(created, true))
    }

    async fn update(&self, id: i32, changes: EventChanges) -> EventResult<Option<Event>> {
        let mut store = self.store.write().await;

        let Some(event) = store.events.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(event);
        let updated = event.clone();

        tracing::info!(event_id = id, "Updated event");
        Ok(Some(self.project(updated, true)))
    }

    async fn delete(&self, id: i32) -> EventResult<Option<Event>> {
        let mut store = self.store.write().await;

        let removed = store.events.remove(&id);
        if removed.is_some() {
            tracing::info!(event_id = id, "Deleted event");
        }
        Ok(removed.map(|e| self.project(e, true)))
    }
}
