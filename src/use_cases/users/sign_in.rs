use db_adapters::UserRepository;

use crate::{
    users::types::{SignInRequest, UserVisible},
    UseCaseError,
};

/// Bad email and bad password are both `Unauthorized`.
pub async fn sign_in(
    params: SignInRequest,
    repository: &dyn UserRepository,
) -> Result<UserVisible, UseCaseError> {
    let user_id = repository
        .authenticate(&params.email, &params.password)
        .await?;
    repository
        .get_user_by_id(user_id)
        .await?
        .map(UserVisible::from)
        .ok_or(UseCaseError::Unauthorized)
}
