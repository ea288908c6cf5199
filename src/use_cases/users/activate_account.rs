use common::password::hash;
use db_adapters::{CreateUserParams, UserRepository};
use entities::custom_methods::user::DEFAULT_ACCESS_LEVEL;

use crate::{
    error_500,
    users::{types::PendingActivation, AuthContext},
    UseCaseError,
};

pub fn pending_activation(
    context: &AuthContext,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<PendingActivation, UseCaseError> {
    Ok(PendingActivation {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        encrypted_email: context.seal_email(email)?,
    })
}

/// Creates the account with the default access level and returns its id.
#[tracing::instrument(name = "Activating account", skip(password, repository, context))]
pub async fn activate_account(
    pending: PendingActivation,
    password: &str,
    repository: &dyn UserRepository,
    context: &AuthContext,
) -> Result<i64, UseCaseError> {
    let email = context.open_email(&pending.encrypted_email)?;
    let password = hash(password.as_bytes()).map_err(error_500)?;
    let id = repository
        .insert_user(CreateUserParams {
            first_name: pending.first_name,
            last_name: pending.last_name,
            email,
            password,
            access_level: DEFAULT_ACCESS_LEVEL,
        })
        .await?;
    tracing::event!(target: "backend", tracing::Level::INFO, "Activated user {}", id);
    Ok(id)
}
