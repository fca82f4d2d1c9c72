use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, SqlErr, TransactionTrait,
};

use crate::{
    entity,
    error::{EventError, EventResult},
    filter::EventPredicate,
    models::{Event, EventChanges, NewEvent},
    repository::EventRepository,
};

use domain_users::entity as users;

#[derive(Clone)]
pub struct PgEventRepository {
    db: DatabaseConnection,
}

impl PgEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> EventError {
    EventError::Internal(format!("Database error: {}", e))
}

/// Map a constraint violation to its domain error; anything else stays internal.
fn violation_error(violation: Option<SqlErr>, author_id: i32) -> Option<EventError> {
    match violation? {
        SqlErr::ForeignKeyConstraintViolation(_) => Some(EventError::UnknownAuthor(author_id)),
        SqlErr::UniqueConstraintViolation(detail) => Some(EventError::Conflict(detail)),
        _ => None,
    }
}

/// Constraint violations on insert/update become domain errors.
fn write_error(e: DbErr, author_id: i32) -> EventError {
    violation_error(e.sql_err(), author_id).unwrap_or_else(|| internal(e))
}

fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
}

fn like_contains(s: &str) -> String {
    format!("%{}%", like_escape(s))
}

/// Render a predicate as a WHERE condition on `events`
pub(crate) fn to_condition(predicate: &EventPredicate) -> Condition {
    use entity::Column;

    match predicate {
        EventPredicate::All(children) => children
            .iter()
            .fold(Condition::all(), |cond, child| cond.add(to_condition(child))),
        EventPredicate::Any(children) => children
            .iter()
            .fold(Condition::any(), |cond, child| cond.add(to_condition(child))),
        EventPredicate::IsPublished(value) => Condition::all().add(Column::IsPublished.eq(*value)),
        EventPredicate::AuthorId(id) => Condition::all().add(Column::AuthorId.eq(*id)),
        EventPredicate::StartAtGte(bound) => Condition::all().add(Column::StartAt.gte(*bound)),
        EventPredicate::StartAtLte(bound) => Condition::all().add(Column::StartAt.lte(*bound)),
        EventPredicate::TitleContains(s) => {
            Condition::all().add(Column::Title.like(like_contains(s)))
        }
        EventPredicate::ContentContains(s) => {
            Condition::all().add(Column::Content.like(like_contains(s)))
        }
    }
}

fn listing(predicate: &EventPredicate) -> Select<entity::Entity> {
    entity::Entity::find()
        .filter(to_condition(predicate))
        .order_by_asc(entity::Column::StartAt)
        .order_by_asc(entity::Column::Id)
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn find_many(
        &self,
        predicate: EventPredicate,
        include_author: bool,
    ) -> EventResult<Vec<Event>> {
        let query = listing(&predicate);

        if include_author {
            let rows = query
                .find_also_related(users::Entity)
                .all(&self.db)
                .await
                .map_err(internal)?;
            Ok(rows
                .into_iter()
                .map(|(event, author)| event.into_event(author))
                .collect())
        } else {
            let rows = query.all(&self.db).await.map_err(internal)?;
            Ok(rows.into_iter().map(|event| event.into_event(None)).collect())
        }
    }

    async fn find_unique(&self, id: i32, include_author: bool) -> EventResult<Option<Event>> {
        let query = entity::Entity::find_by_id(id);

        if include_author {
            let row = query
                .find_also_related(users::Entity)
                .one(&self.db)
                .await
                .map_err(internal)?;
            Ok(row.map(|(event, author)| event.into_event(author)))
        } else {
            let row = query.one(&self.db).await.map_err(internal)?;
            Ok(row.map(|event| event.into_event(None)))
        }
    }

    async fn create(&self, event: NewEvent) -> EventResult<Event> {
        let author_id = event.author_id;
        let txn = self.db.begin().await.map_err(internal)?;

        let active_model = entity::ActiveModel {
            author_id: Set(event.author_id),
            title: Set(event.title),
            content: Set(event.content),
            start_at: Set(event.start_at.into()),
            end_at: Set(event.end_at.into()),
            is_public: Set(event.is_public),
            is_published: Set(event.is_published),
            ..Default::default()
        };

        let model = active_model
            .insert(&txn)
            .await
            .map_err(|e| write_error(e, author_id))?;
        let author = users::Entity::find_by_id(model.author_id)
            .one(&txn)
            .await
            .map_err(internal)?;

        txn.commit().await.map_err(internal)?;

        tracing::info!(event_id = model.id, author_id, "Created event");
        Ok(model.into_event(author))
    }

    async fn update(&self, id: i32, changes: EventChanges) -> EventResult<Option<Event>> {
        let txn = self.db.begin().await.map_err(internal)?;

        let Some(current) = entity::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(internal)?
        else {
            return Ok(None);
        };
        let author_id = current.author_id;

        let model = if changes.is_empty() {
            current
        } else {
            let mut active: entity::ActiveModel = current.into();
            if let Some(title) = changes.title {
                active.title = Set(title);
            }
            if let Some(content) = changes.content {
                active.content = Set(content);
            }
            if let Some(start_at) = changes.start_at {
                active.start_at = Set(start_at.into());
            }
            if let Some(end_at) = changes.end_at {
                active.end_at = Set(end_at.into());
            }
            if let Some(is_public) = changes.is_public {
                active.is_public = Set(is_public);
            }
            if let Some(is_published) = changes.is_published {
                active.is_published = Set(is_published);
            }
            active
                .update(&txn)
                .await
                .map_err(|e| write_error(e, author_id))?
        };

        let author = users::Entity::find_by_id(author_id)
            .one(&txn)
            .await
            .map_err(internal)?;

        txn.commit().await.map_err(internal)?;

        tracing::info!(event_id = id, "Updated event");
        Ok(Some(model.into_event(author)))
    }

    async fn delete(&self, id: i32) -> EventResult<Option<Event>> {
        let txn = self.db.begin().await.map_err(internal)?;

        let Some(current) = entity::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(internal)?
        else {
            return Ok(None);
        };

        let deleted = entity::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(internal)?;
        if deleted.rows_affected == 0 {
            return Ok(None);
        }

        let author = users::Entity::find_by_id(current.author_id)
            .one(&txn)
            .await
            .map_err(internal)?;

        txn.commit().await.map_err(internal)?;

        tracing::info!(event_id = id, "Deleted event");
        Ok(Some(current.into_event(author)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::build_predicate;
    use crate::models::EventFilter;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, QueryTrait, RuntimeErr};

    fn stored_row(id: i32) -> entity::Model {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        entity::Model {
            id,
            author_id: 1,
            title: "Launch".into(),
            content: None,
            start_at: at.into(),
            end_at: at.into(),
            is_public: true,
            is_published: true,
            created_at: at.into(),
        }
    }

    fn alice() -> users::Model {
        users::Model {
            id: 1,
            email: "alice@grit.com".into(),
            name: Some("Alice".into()),
            created_at: Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap().into(),
        }
    }

    fn sql(predicate: &EventPredicate) -> String {
        listing(predicate).build(DatabaseBackend::Postgres).to_string()
    }

    #[test]
    fn test_like_escaping() {
        assert_eq!(like_contains("launch"), "%launch%");
        assert_eq!(like_contains("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_default_listing_sql() {
        let sql = sql(&build_predicate(&EventFilter::default()));

        assert!(sql.contains(r#""events"."is_published" = TRUE"#), "{sql}");
        assert!(
            sql.ends_with(r#"ORDER BY "events"."start_at" ASC, "events"."id" ASC"#),
            "{sql}"
        );
    }

    #[test]
    fn test_search_is_one_or_group() {
        let filter = EventFilter {
            search: Some("launch".into()),
            author_id: Some(3),
            start_from: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            start_until: None,
        };
        let sql = sql(&build_predicate(&filter));

        assert!(sql.contains(r#""events"."title" LIKE '%launch%'"#), "{sql}");
        assert!(sql.contains(r#" OR "events"."content" LIKE '%launch%'"#), "{sql}");
        assert!(sql.contains(r#""events"."author_id" = 3"#), "{sql}");
        assert!(sql.contains(r#""events"."start_at" >= '2025-01-01"#), "{sql}");
        assert!(!sql.contains(r#""events"."start_at" <="#), "{sql}");
    }

    #[tokio::test]
    async fn test_find_unique_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let repo = PgEventRepository::new(db);
        assert!(repo.find_unique(999999, false).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_failure_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "connection reset".into(),
            ))])
            .into_connection();

        let repo = PgEventRepository::new(db);
        let result = repo
            .find_many(build_predicate(&EventFilter::default()), false)
            .await;

        assert!(matches!(result, Err(EventError::Internal(msg)) if msg.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_delete_returns_prior_state_with_author() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_row(5)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![alice()]])
            .into_connection();

        let repo = PgEventRepository::new(db);
        let deleted = repo.delete(5).await.unwrap().unwrap();

        assert_eq!(deleted.id, 5);
        assert_eq!(deleted.author.and_then(|a| a.name), Some("Alice".into()));
    }

    #[tokio::test]
    async fn test_delete_that_removes_nothing_is_missing() {
        // Row seen by the lookup but already gone when the DELETE runs
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_row(5)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PgEventRepository::new(db);
        assert!(repo.delete(5).await.unwrap().is_none());
    }

    #[test]
    fn test_delete_lookup_locks_the_row() {
        let sql = entity::Entity::find_by_id(5)
            .lock_exclusive()
            .build(DatabaseBackend::Postgres)
            .to_string();
        assert!(sql.ends_with("FOR UPDATE"), "{sql}");
    }

    #[test]
    fn test_constraint_violations_map_to_domain_errors() {
        let fk = SqlErr::ForeignKeyConstraintViolation(
            "insert or update on table \"events\" violates foreign key constraint".into(),
        );
        assert!(matches!(
            violation_error(Some(fk), 42),
            Some(EventError::UnknownAuthor(42))
        ));

        let unique = SqlErr::UniqueConstraintViolation("duplicate key value".into());
        assert!(matches!(
            violation_error(Some(unique), 42),
            Some(EventError::Conflict(detail)) if detail == "duplicate key value"
        ));

        assert!(violation_error(None, 42).is_none());
    }

    #[test]
    fn test_unclassified_write_error_is_internal() {
        let err = DbErr::Exec(RuntimeErr::Internal("disk full".into()));
        assert!(matches!(
            write_error(err, 1),
            EventError::Internal(msg) if msg.contains("disk full")
        ));
    }
}
