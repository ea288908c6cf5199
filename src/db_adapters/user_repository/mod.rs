mod postgres;
mod testing;

use async_trait::async_trait;
use sea_orm::{DbErr, SqlErr};

use common::password::PasswordHashError;
use entities::user::Model;

use crate::CreateUserParams;

pub use postgres::PostgresUserRepository;
pub use testing::TestingUserRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("User not found")]
    NotFound,
    #[error("Duplicate")]
    Duplicate,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Query timed out")]
    Timeout,
    #[error("Database error: {0}")]
    Db(DbErr),
    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

impl From<DbErr> for RepositoryError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate,
            _ => Self::Db(e),
        }
    }
}

impl From<PasswordHashError> for RepositoryError {
    fn from(e: PasswordHashError) -> Self {
        match e {
            PasswordHashError::Password => Self::InvalidCredentials,
            e => Self::PasswordHash(e.to_string()),
        }
    }
}

/// Storage of user accounts as the web layer sees it. Hashing is done by
/// the caller; `authenticate` is the only method that sees a plain password.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn all_users(&self) -> Result<Vec<Model>, RepositoryError>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<Model>, RepositoryError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<Model>, RepositoryError>;
    async fn insert_user(&self, params: CreateUserParams) -> Result<i64, RepositoryError>;
    async fn update_user(&self, user: Model) -> Result<Model, RepositoryError>;
    async fn update_password_for_user(
        &self,
        user: Model,
        password_hash: String,
    ) -> Result<(), RepositoryError>;
    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, RepositoryError>;
}
