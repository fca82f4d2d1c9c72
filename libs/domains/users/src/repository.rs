use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Insert a user; the email must be unused
    async fn create(&self, input: CreateUser) -> UserResult<User>;
}

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    users: BTreeMap<i32, User>,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        // Same rule as the unique index: exact, case-sensitive match
        if store.users.values().any(|u| u.email == input.email) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        store.last_id += 1;
        let user = User {
            id: store.last_id,
            email: input.email,
            name: input.name,
            created_at: Utc::now(),
        };
        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(email: &str, name: Option<&str>) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            name: name.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let alice = repo.create(input("alice@grit.com", Some("Alice"))).await.unwrap();
        let bob = repo.create(input("bob@google.com", None)).await.unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert_eq!(bob.name, None);

        let listed: Vec<i32> = repo.list().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(listed, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_duplicate_email_error() {
        let repo = InMemoryUserRepository::new();
        repo.create(input("alice@grit.com", None)).await.unwrap();

        let result = repo.create(input("alice@grit.com", Some("Other"))).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(email)) if email == "alice@grit.com"));

        // Different case is a different address
        assert!(repo.create(input("Alice@grit.com", None)).await.is_ok());
    }
}
