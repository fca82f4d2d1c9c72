//! Event domain models
//!
//! Request shapes are strict (`deny_unknown_fields`) and validated before
//! they reach the service; response shapes are a fixed camelCase projection.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::patch::Patch;

/// `YYYY-MM-DD`, nothing before or after
static DATE_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

fn parse_date_only(value: &str) -> Option<NaiveDate> {
    if !DATE_ONLY.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Custom validator for `startFrom` / `startUntil`
fn validate_date_only(value: &str) -> Result<(), ValidationError> {
    match parse_date_only(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("date_only")
            .with_message(Cow::Borrowed("must be a calendar date in YYYY-MM-DD format"))),
    }
}

/// Author projection embedded in event responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: Option<String>,
}

impl From<domain_users::entity::Model> for Author {
    fn from(user: domain_users::entity::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// Event as returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub author_id: i32,
    /// `null` when the author was not requested
    pub author: Option<Author>,
    #[schema(example = "Launch")]
    pub title: String,
    pub content: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub is_public: bool,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /events`
///
/// `isPublished` is not accepted: new events are always drafts.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "title must not be empty"))]
    #[schema(example = "Launch")]
    pub title: String,

    #[validate(range(min = 1, message = "authorId must be a positive integer"))]
    #[schema(example = 1)]
    pub author_id: i32,

    #[serde(default)]
    pub content: Option<String>,

    #[schema(example = "2025-01-01T00:00:00Z")]
    pub start_at: DateTime<Utc>,

    #[schema(example = "2025-01-02T00:00:00Z")]
    pub end_at: DateTime<Utc>,

    pub is_public: bool,
}

/// Payload for `PUT` / `PATCH /events/{id}`
///
/// Absent keys are left alone. `content: null` clears the content; `null` on
/// any other field is rejected.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchEvent {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>, nullable)]
    pub content: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub start_at: Patch<DateTime<Utc>>,

    #[serde(default)]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub end_at: Patch<DateTime<Utc>>,

    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub is_public: Patch<bool>,

    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub is_published: Patch<bool>,
}

fn not_null(field: &str) -> ValidationError {
    ValidationError::new("not_null").with_message(Cow::Owned(format!("{} cannot be null", field)))
}

impl Validate for PatchEvent {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.title.is_clear() {
            errors.add("title", not_null("title"));
        }
        if self.title.as_set().is_some_and(|t| t.is_empty()) {
            errors.add(
                "title",
                ValidationError::new("length")
                    .with_message(Cow::Borrowed("title must not be empty")),
            );
        }
        if self.start_at.is_clear() {
            errors.add("startAt", not_null("startAt"));
        }
        if self.end_at.is_clear() {
            errors.add("endAt", not_null("endAt"));
        }
        if self.is_public.is_clear() {
            errors.add("isPublic", not_null("isPublic"));
        }
        if self.is_published.is_clear() {
            errors.add("isPublished", not_null("isPublished"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl PatchEvent {
    /// Only `isPublished = true`
    pub fn publish() -> Self {
        Self {
            is_published: Patch::Set(true),
            ..Default::default()
        }
    }

    /// Keep only the fields that were actually supplied.
    pub fn into_changes(self) -> EventChanges {
        EventChanges {
            title: self.title.into_required(),
            content: self.content.into_nullable(),
            start_at: self.start_at.into_required(),
            end_at: self.end_at.into_required(),
            is_public: self.is_public.into_required(),
            is_published: self.is_published.into_required(),
        }
    }
}

/// The columns a patch writes; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventChanges {
    pub title: Option<String>,
    /// `Some(None)` clears the content
    pub content: Option<Option<String>>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub is_public: Option<bool>,
    pub is_published: Option<bool>,
}

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.start_at.is_none()
            && self.end_at.is_none()
            && self.is_public.is_none()
            && self.is_published.is_none()
    }

    /// Apply to an in-memory record
    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(content) = self.content {
            event.content = content;
        }
        if let Some(start_at) = self.start_at {
            event.start_at = start_at;
        }
        if let Some(end_at) = self.end_at {
            event.end_at = end_at;
        }
        if let Some(is_public) = self.is_public {
            event.is_public = is_public;
        }
        if let Some(is_published) = self.is_published {
            event.is_published = is_published;
        }
    }
}

/// Fields written when a new event row is inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub author_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub is_public: bool,
    pub is_published: bool,
}

impl NewEvent {
    /// New events are always unpublished
    pub fn draft(input: CreateEvent) -> Self {
        Self {
            author_id: input.author_id,
            title: input.title,
            content: input.content,
            start_at: input.start_at,
            end_at: input.end_at,
            is_public: input.is_public,
            is_published: false,
        }
    }
}

/// Query string for `GET /events`
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct EventListQuery {
    /// Substring of the title or content
    #[validate(length(min = 1, message = "search must not be empty"))]
    pub search: Option<String>,

    #[validate(range(min = 1, message = "authorId must be a positive integer"))]
    pub author_id: Option<i32>,

    /// Earliest start date (inclusive), `YYYY-MM-DD`
    #[validate(custom(function = "validate_date_only"))]
    #[param(example = "2025-01-01")]
    pub start_from: Option<String>,

    /// Latest start date (inclusive), `YYYY-MM-DD`
    #[validate(custom(function = "validate_date_only"))]
    #[param(example = "2025-01-31")]
    pub start_until: Option<String>,
}

/// Validated list filter with the date strings turned into UTC bounds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub search: Option<String>,
    pub author_id: Option<i32>,
    /// `startFrom` at 00:00:00.000 UTC
    pub start_from: Option<DateTime<Utc>>,
    /// `startUntil` at 23:59:59.999 UTC
    pub start_until: Option<DateTime<Utc>>,
}

impl TryFrom<EventListQuery> for EventFilter {
    type Error = ValidationErrors;

    fn try_from(query: EventListQuery) -> Result<Self, Self::Error> {
        query.validate()?;

        let mut errors = ValidationErrors::new();
        let start_from = match query.start_from.as_deref().map(parse_date_only) {
            Some(Some(date)) => Some(date.and_time(NaiveTime::MIN).and_utc()),
            Some(None) => {
                errors.add("startFrom", ValidationError::new("date_only"));
                None
            }
            None => None,
        };
        let start_until = match query.start_until.as_deref().map(parse_date_only) {
            Some(Some(date)) => match date.and_hms_milli_opt(23, 59, 59, 999) {
                Some(end) => Some(end.and_utc()),
                None => {
                    errors.add("startUntil", ValidationError::new("date_only"));
                    None
                }
            },
            Some(None) => {
                errors.add("startUntil", ValidationError::new("date_only"));
                None
            }
            None => None,
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            search: query.search,
            author_id: query.author_id,
            start_from,
            start_until,
        })
    }
}
