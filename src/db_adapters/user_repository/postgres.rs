use std::{future::Future, time::Duration};

use async_trait::async_trait;
use sea_orm::{DbConn, DbErr};

use common::password::verify_password;
use entities::user::Model;

use super::{RepositoryError, UserRepository};
use crate::{
    user_adapter::{UserAdapter, UserMutation, UserOrder, UserQuery},
    CreateUserParams, Order,
};

pub struct PostgresUserRepository {
    db: DbConn,
    timeout: Duration,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(res) => res.map_err(RepositoryError::from),
            Err(_) => {
                tracing::event!(target: "backend", tracing::Level::ERROR, "Query exceeded {:?}", self.timeout);
                Err(RepositoryError::Timeout)
            }
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn all_users(&self) -> Result<Vec<Model>, RepositoryError> {
        self.bounded(
            UserAdapter::init(&self.db)
                .order_by_last_name(Order::Asc)
                .get_all(),
        )
        .await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<Model>, RepositoryError> {
        self.bounded(UserAdapter::init(&self.db).get_by_id(id)).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<Model>, RepositoryError> {
        self.bounded(UserAdapter::init(&self.db).get_by_email(email.to_string()))
            .await
    }

    async fn insert_user(&self, params: CreateUserParams) -> Result<i64, RepositoryError> {
        let user = self
            .bounded(UserAdapter::init(&self.db).create(params))
            .await?;
        Ok(user.id)
    }

    async fn update_user(&self, user: Model) -> Result<Model, RepositoryError> {
        self.bounded(UserAdapter::init(&self.db).update(user)).await
    }

    async fn update_password_for_user(
        &self,
        user: Model,
        password_hash: String,
    ) -> Result<(), RepositoryError> {
        self.bounded(UserAdapter::init(&self.db).update_password(user, password_hash))
            .await?;
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
