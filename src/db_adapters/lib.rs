pub mod user_adapter;
pub mod user_repository;

pub use sea_orm::Order;
pub use user_adapter::CreateUserParams;
pub use user_repository::{
    PostgresUserRepository, RepositoryError, TestingUserRepository, UserRepository,
};
