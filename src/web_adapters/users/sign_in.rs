use std::collections::HashMap;

use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data},
    HttpResponse,
};
use db_adapters::UserRepository;
use use_cases::{
    users::{sign_in::sign_in, types::SignInRequest},
    UseCaseError,
};

use crate::{
    users::AUTH_PATH,
    utils::{
        forms::Form,
        render::{render_template, TemplateData},
        response_500, response_from_use_case_error, see_other,
        session::{put_message, sign_in_session, ERROR_KEY, FLASH_KEY},
    },
};

const AUTH_PAGE: &str = "auth.page.html";

#[tracing::instrument(name = "Showing auth page", skip(session))]
#[get("")]
pub async fn auth_page_endpoint(session: Session) -> HttpResponse {
    render_template(&session, AUTH_PAGE, TemplateData::with_form(Form::empty()))
}

#[tracing::instrument(name = "Signing a user in", skip_all)]
#[post("/signin")]
pub async fn sign_in_endpoint(
    repository: Data<dyn UserRepository>,
    form: Result<web::Form<HashMap<String, String>>, actix_web::Error>,
    session: Session,
) -> HttpResponse {
    let mut form = match form {
        Ok(form) => Form::new(form.into_inner()),
        Err(_) => {
            put_message(&session, ERROR_KEY, "Could not parse the form");
            return see_other(AUTH_PATH);
        }
    };
    session.renew();

    form.required(&["email", "password"]);
    form.is_email("email");
    if !form.valid() {
        return render_template(&session, AUTH_PAGE, TemplateData::with_form(form));
    }

    let params = SignInRequest {
        email: form.get("email").to_string(),
        password: form.get("password").to_string(),
    };
    match sign_in(params, repository.get_ref()).await {
        Ok(user) => match sign_in_session(&session, user.id, user.access_level) {
            Ok(_) => {
                tracing::event!(target: "backend", tracing::Level::INFO, "User {} signed in.", user.id);
                put_message(&session, FLASH_KEY, "Logged in successfully");
                see_other("/")
            }
            Err(e) => response_500(e),
        },
        Err(UseCaseError::Unauthorized) => {
            put_message(&session, ERROR_KEY, "Invalid Login credentials");
            see_other(AUTH_PATH)
        }
        Err(e) => response_from_use_case_error(e),
    }
}
