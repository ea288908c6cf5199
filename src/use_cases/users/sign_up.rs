use db_adapters::UserRepository;

use crate::{
    error_500,
    users::{signed_links::build_signed_link, types::SignUpRequest, AuthContext},
    UseCaseError,
};

pub const ACTIVATION_PATH: &str = "/auth/activate-account";

/// Nothing is stored yet. The account is created once the emailed link is
/// opened and a password chosen.
#[tracing::instrument(name = "Sending activation link", skip(repository, context))]
pub async fn sign_up(
    params: SignUpRequest,
    repository: &dyn UserRepository,
    context: &AuthContext,
) -> Result<(), UseCaseError> {
    if repository.get_user_by_email(&params.email).await?.is_some() {
        return Err(UseCaseError::Conflict(
            "Email address already exists!".to_string(),
        ));
    }

    let link = build_signed_link(
        context,
        ACTIVATION_PATH,
        &[
            ("firstName", params.first_name.as_str()),
            ("lastName", params.last_name.as_str()),
            ("email", params.email.as_str()),
        ],
    )?;
    context
        .queue_mail(
            &params.email,
            "Activate Account",
            "activate-account",
            minijinja::context! {
                first_name => &params.first_name,
                link => &link,
                expiration_minutes => context.link_expiration_minutes,
            },
        )
        .map_err(error_500)
}
