use std::future::Future;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Select, Set, Unchanged,
};

use entities::user::{ActiveModel, Column, Entity, Model};

use crate::Order;

#[derive(Clone)]
pub struct UserAdapter<'a> {
    pub db: &'a DbConn,
    pub query: Select<Entity>,
}

impl<'a> UserAdapter<'a> {
    pub fn init(db: &'a DbConn) -> Self {
        Self {
            db,
            query: Entity::find(),
        }
    }
}

pub trait UserOrder {
    fn order_by_last_name(self, order: Order) -> Self;
}

impl UserOrder for UserAdapter<'_> {
    fn order_by_last_name(mut self, order: Order) -> Self {
        self.query = self
            .query
            .order_by(Column::LastName, order.clone())
            .order_by(Column::FirstName, order);
        self
    }
}

pub trait UserQuery {
    fn get_by_id(self, id: i64) -> impl Future<Output = Result<Option<Model>, DbErr>>;
    fn get_by_email(self, email: String) -> impl Future<Output = Result<Option<Model>, DbErr>>;
    fn get_all(self) -> impl Future<Output = Result<Vec<Model>, DbErr>>;
}

impl UserQuery for UserAdapter<'_> {
    async fn get_by_id(self, id: i64) -> Result<Option<Model>, DbErr> {
        self.query.filter(Column::Id.eq(id)).one(self.db).await
    }

    async fn get_by_email(self, email: String) -> Result<Option<Model>, DbErr> {
        self.query
            .filter(Column::Email.eq(email))
            .one(self.db)
            .await
    }

    async fn get_all(self) -> Result<Vec<Model>, DbErr> {
        self.query.all(self.db).await
    }
}

/// `password` is expected to be hashed already.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub access_level: i32,
}

pub trait UserMutation {
    fn create(self, params: CreateUserParams) -> impl Future<Output = Result<Model, DbErr>>;
    fn update(self, user: Model) -> impl Future<Output = Result<Model, DbErr>>;
    fn update_password(
        self,
        user: Model,
        password: String,
    ) -> impl Future<Output = Result<Model, DbErr>>;
}

impl UserMutation for UserAdapter<'_> {
    async fn create(self, params: CreateUserParams) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            id: NotSet,
            first_name: Set(params.first_name),
            last_name: Set(params.last_name),
            email: Set(params.email),
            password: Set(params.password),
            access_level: Set(params.access_level),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(self.db)
        .await
    }

    /// Writes names, email and access level. The password is left alone.
    async fn update(self, user: Model) -> Result<Model, DbErr> {
        ActiveModel {
            id: Unchanged(user.id),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            password: NotSet,
            access_level: Set(user.access_level),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        }
        .update(self.db)
        .await
    }

    async fn update_password(self, user: Model, password: String) -> Result<Model, DbErr> {
        let mut user = user.into_active_model();
        user.password = Set(password);
        user.updated_at = Set(Utc::now().into());
        user.update(self.db).await
    }
}
