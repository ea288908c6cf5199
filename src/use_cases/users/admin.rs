use db_adapters::UserRepository;

use crate::{users::types::UserVisible, UseCaseError};

pub async fn list_users(repository: &dyn UserRepository) -> Result<Vec<UserVisible>, UseCaseError> {
    Ok(repository
        .all_users()
        .await?
        .into_iter()
        .map(UserVisible::from)
        .collect())
}

pub async fn update_access_level(
    user_id: i64,
    access_level: i32,
    repository: &dyn UserRepository,
) -> Result<UserVisible, UseCaseError> {
    let mut user = repository
        .get_user_by_id(user_id)
        .await?
        .ok_or(UseCaseError::NotFound(
            "User with this id was not found".to_string(),
        ))?;
    user.access_level = access_level;
    repository
        .update_user(user)
        .await
        .map(UserVisible::from)
        .map_err(UseCaseError::from)
}
