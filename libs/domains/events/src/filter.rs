//! Translation of a validated list filter into a storage-neutral predicate.
//!
//! Storage gateways decide how to run an [`EventPredicate`]: Postgres renders
//! it to SQL, the in-memory gateway calls [`EventPredicate::matches`].

use chrono::{DateTime, Utc};

use crate::models::{Event, EventFilter};

/// Composable condition over event columns
#[derive(Debug, Clone, PartialEq)]
pub enum EventPredicate {
    /// Every child holds (true when empty)
    All(Vec<EventPredicate>),
    /// At least one child holds (false when empty)
    Any(Vec<EventPredicate>),
    IsPublished(bool),
    AuthorId(i32),
    /// `start_at >= bound`
    StartAtGte(DateTime<Utc>),
    /// `start_at <= bound`
    StartAtLte(DateTime<Utc>),
    /// Case-sensitive substring of the title
    TitleContains(String),
    /// Case-sensitive substring of the content; never matches null content
    ContentContains(String),
}

impl EventPredicate {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            EventPredicate::All(children) => children.iter().all(|p| p.matches(event)),
            EventPredicate::Any(children) => children.iter().any(|p| p.matches(event)),
            EventPredicate::IsPublished(value) => event.is_published == *value,
            EventPredicate::AuthorId(id) => event.author_id == *id,
            EventPredicate::StartAtGte(bound) => event.start_at >= *bound,
            EventPredicate::StartAtLte(bound) => event.start_at <= *bound,
            EventPredicate::TitleContains(needle) => event.title.contains(needle.as_str()),
            EventPredicate::ContentContains(needle) => event
                .content
                .as_deref()
                .is_some_and(|content| content.contains(needle.as_str())),
        }
    }
}

/// Published events only, narrowed by whatever the filter supplies.
///
/// Conjunct order is fixed: published, search, author, lower bound, upper
/// bound. The search terms form a single OR group.
pub fn build_predicate(filter: &EventFilter) -> EventPredicate {
    let mut conjuncts = vec![EventPredicate::IsPublished(true)];

    if let Some(search) = &filter.search {
        conjuncts.push(EventPredicate::Any(vec![
            EventPredicate::TitleContains(search.clone()),
            EventPredicate::ContentContains(search.clone()),
        ]));
    }
    if let Some(author_id) = filter.author_id {
        conjuncts.push(EventPredicate::AuthorId(author_id));
    }
    if let Some(from) = filter.start_from {
        conjuncts.push(EventPredicate::StartAtGte(from));
    }
    if let Some(until) = filter.start_until {
        conjuncts.push(EventPredicate::StartAtLte(until));
    }

    EventPredicate::All(conjuncts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn event(title: &str, content: Option<&str>, published: bool) -> Event {
        Event {
            id: 1,
            author_id: 1,
            author: None,
            title: title.to_string(),
            content: content.map(str::to_string),
            start_at: at(2025, 1, 15, 12),
            end_at: at(2025, 1, 15, 18),
            is_public: true,
            is_published: published,
            created_at: at(2025, 1, 1, 0),
        }
    }

    #[test]
    fn test_empty_filter_is_published_only() {
        let predicate = build_predicate(&EventFilter::default());
        assert_eq!(
            predicate,
            EventPredicate::All(vec![EventPredicate::IsPublished(true)])
        );

        assert!(predicate.matches(&event("Launch", None, true)));
        assert!(!predicate.matches(&event("Launch", None, false)));
    }

    #[test]
    fn test_full_filter_conjunct_order() {
        let filter = EventFilter {
            search: Some("launch".into()),
            author_id: Some(2),
            start_from: Some(at(2025, 1, 1, 0)),
            start_until: Some(at(2025, 1, 31, 0)),
        };

        assert_eq!(
            build_predicate(&filter),
            EventPredicate::All(vec![
                EventPredicate::IsPublished(true),
                EventPredicate::Any(vec![
                    EventPredicate::TitleContains("launch".into()),
                    EventPredicate::ContentContains("launch".into()),
                ]),
                EventPredicate::AuthorId(2),
                EventPredicate::StartAtGte(at(2025, 1, 1, 0)),
                EventPredicate::StartAtLte(at(2025, 1, 31, 0)),
            ])
        );
    }

    #[test]
    fn test_search_matches_title_or_content_among_published() {
        let predicate = build_predicate(&EventFilter {
            search: Some("launch".into()),
            ..Default::default()
        });

        assert!(predicate.matches(&event("The launch party", None, true)));
        assert!(predicate.matches(&event("Party", Some("after the launch"), true)));
        assert!(!predicate.matches(&event("Party", None, true)));
        assert!(!predicate.matches(&event("The launch party", None, false)));
        // Case-sensitive, like SQL LIKE
        assert!(!predicate.matches(&event("Launch", None, true)));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let mut on_edge = event("Edge", None, true);
        on_edge.start_at = at(2025, 1, 1, 0);

        let predicate = build_predicate(&EventFilter {
            start_from: Some(at(2025, 1, 1, 0)),
            start_until: Some(at(2025, 1, 1, 0)),
            ..Default::default()
        });
        assert!(predicate.matches(&on_edge));

        on_edge.start_at = at(2025, 1, 1, 1);
        assert!(!predicate.matches(&on_edge));
    }

    #[test]
    fn test_empty_groups() {
        let e = event("Launch", None, true);
        assert!(EventPredicate::All(vec![]).matches(&e));
        assert!(!EventPredicate::Any(vec![]).matches(&e));
    }
}
