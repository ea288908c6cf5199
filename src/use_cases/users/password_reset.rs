use common::password::hash;
use db_adapters::UserRepository;

use crate::{
    error_500,
    users::{signed_links::build_signed_link, AuthContext},
    UseCaseError,
};

pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

#[tracing::instrument(name = "Sending password reset link", skip(repository, context))]
pub async fn request_password_reset(
    email: &str,
    repository: &dyn UserRepository,
    context: &AuthContext,
) -> Result<(), UseCaseError> {
    if repository.get_user_by_email(email).await?.is_none() {
        return Err(UseCaseError::NotFound(
            "No account found with that email address.".to_string(),
        ));
    }

    let link = build_signed_link(context, RESET_PASSWORD_PATH, &[("email", email)])?;
    context
        .queue_mail(
            email,
            "Password Reset Request",
            "password-reset",
            minijinja::context! {
                link => &link,
                expiration_minutes => context.link_expiration_minutes,
            },
        )
        .map_err(error_500)
}

/// `sealed_email` is the encrypted address stored when the reset link was
/// opened.
#[tracing::instrument(name = "Resetting password", skip_all)]
pub async fn reset_password(
    sealed_email: &str,
    new_password: &str,
    repository: &dyn UserRepository,
    context: &AuthContext,
) -> Result<(), UseCaseError> {
    let email = context.open_email(sealed_email)?;
    let user = repository
        .get_user_by_email(&email)
        .await?
        .ok_or(UseCaseError::NotFound("User not found".to_string()))?;
    let password = hash(new_password.as_bytes()).map_err(error_500)?;
    repository.update_password_for_user(user, password).await?;
    Ok(())
}
