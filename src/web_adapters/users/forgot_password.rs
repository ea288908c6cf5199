use std::collections::HashMap;

use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data},
    HttpResponse,
};
use db_adapters::UserRepository;
use use_cases::{
    users::{password_reset::request_password_reset, AuthContext},
    UseCaseError,
};

use crate::{
    users::{AUTH_PATH, FORGOT_PASSWORD_PATH},
    utils::{
        forms::Form,
        render::{render_template, TemplateData},
        response_from_use_case_error, see_other,
        session::{put_message, ERROR_KEY, FLASH_KEY},
    },
};

const FORGOT_PASSWORD_PAGE: &str = "auth-forgot-password.page.html";

#[tracing::instrument(name = "Showing forgot password page", skip(session))]
#[get("/forgot-password")]
pub async fn show_forgot_password_endpoint(session: Session) -> HttpResponse {
    render_template(
        &session,
        FORGOT_PASSWORD_PAGE,
        TemplateData::with_form(Form::empty()),
    )
}

#[tracing::instrument(name = "Requesting a password reset", skip_all)]
#[post("/forgot-password")]
pub async fn forgot_password_endpoint(
    repository: Data<dyn UserRepository>,
    context: Data<AuthContext>,
    form: Result<web::Form<HashMap<String, String>>, actix_web::Error>,
    session: Session,
) -> HttpResponse {
    let mut form = match form {
        Ok(form) => Form::new(form.into_inner()),
        Err(_) => {
            put_message(&session, ERROR_KEY, "Could not parse the form");
            return see_other(FORGOT_PASSWORD_PATH);
        }
    };

    form.required(&["email"]);
    form.is_email("email");
    if !form.valid() {
        return render_template(
            &session,
            FORGOT_PASSWORD_PAGE,
            TemplateData::with_form(form),
        );
    }

    let email = form.get("email");
    match request_password_reset(email, repository.get_ref(), &context).await {
        Ok(()) => {
            put_message(
                &session,
                FLASH_KEY,
                "We sent a password reset link to your email address.",
            );
            see_other(AUTH_PATH)
        }
        Err(UseCaseError::NotFound(_)) => {
            put_message(
                &session,
                ERROR_KEY,
                &format!("User with {} email does not exist", email),
            );
            see_other(FORGOT_PASSWORD_PATH)
        }
        Err(e) => response_from_use_case_error(e),
    }
}
