//! Integration tests for Users domain
//!
//! These use real PostgreSQL via testcontainers, with the workspace
//! migrations (and their seed users) applied.

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::assert_ascending};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_seeded_users_are_listed_in_id_order() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    let users = repo.list().await.unwrap();
    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();

    assert_ascending(&ids, "seeded users");
    let names: Vec<_> = users.iter().filter_map(|u| u.name.as_deref()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Cindy"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_constraint() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("users_duplicate_email");

    let input = CreateUser {
        email: builder.email("author"),
        name: Some(builder.name("user", "first")),
    };

    let created = repo.create(input.clone()).await.unwrap();
    assert_eq!(created.email, input.email);

    let result = repo.create(input).await;
    assert!(
        matches!(result, Err(UserError::DuplicateEmail(_))),
        "Expected DuplicateEmail error, got {:?}",
        result
    );
}
