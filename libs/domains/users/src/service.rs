use std::sync::Arc;
use validator::Validate;

use crate::error::UserResult;
use crate::models::{CreateUser, User, UserSummary};
use crate::repository::UserRepository;

#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// `{id, name}` for every user, ordered by id
    #[tracing::instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserSummary>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input.validate()?;
        self.repository.create(input).await
    }
}
