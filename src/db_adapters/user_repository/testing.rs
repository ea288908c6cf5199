use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use common::{factory::HASHED_PASSWORD, password::verify_password};
use entities::{custom_methods::user::DEFAULT_ACCESS_LEVEL, user::Model};

use super::{RepositoryError, UserRepository};
use crate::CreateUserParams;

/// In-memory repository for tests. Starts with user 1, Jon Doe,
/// `test@gmail.com` whose password is `password`.
pub struct TestingUserRepository {
    users: Mutex<Vec<Model>>,
}

impl Default for TestingUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TestingUserRepository {
    pub fn new() -> Self {
        let now = Utc::now();
        Self::with_users(vec![Model {
            id: 1,
            first_name: "Jon".to_string(),
            last_name: "Doe".to_string(),
            email: "test@gmail.com".to_string(),
            password: HASHED_PASSWORD.to_string(),
            access_level: DEFAULT_ACCESS_LEVEL,
            created_at: now.into(),
            updated_at: now.into(),
        }])
    }

    pub fn with_users(users: Vec<Model>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    fn users(&self) -> MutexGuard<'_, Vec<Model>> {
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserRepository for TestingUserRepository {
    async fn all_users(&self) -> Result<Vec<Model>, RepositoryError> {
        Ok(self.users().clone())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<Model>, RepositoryError> {
        Ok(self.users().iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<Model>, RepositoryError> {
        Ok(self.users().iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, params: CreateUserParams) -> Result<i64, RepositoryError> {
        let mut users = self.users();
        if users.iter().any(|u| u.email == params.email) {
            return Err(RepositoryError::Duplicate);
        }
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        users.push(Model {
            id,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            password: params.password,
            access_level: params.access_level,
            created_at: now.into(),
            updated_at: now.into(),
        });
        Ok(id)
    }

    async fn update_user(&self, user: Model) -> Result<Model, RepositoryError> {
        let mut users = self.users();
        if users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(RepositoryError::Duplicate);
        }
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepositoryError::NotFound)?;
        stored.first_name = user.first_name;
        stored.last_name = user.last_name;
        stored.email = user.email;
        stored.access_level = user.access_level;
        stored.updated_at = Utc::now().into();
        Ok(stored.clone())
    }

    async fn update_password_for_user(
        &self,
        user: Model,
        password_hash: String,
    ) -> Result<(), RepositoryError> {
        let mut users = self.users();
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepositoryError::NotFound)?;
        stored.password = password_hash;
        stored.updated_at = Utc::now().into();
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, RepositoryError> {
        let user = self
            .get_user_by_email(email)
            .await?
            .ok_or(RepositoryError::InvalidCredentials)?;
        verify_password(&user.password, password.as_bytes())?;
        Ok(user.id)
    }
}
