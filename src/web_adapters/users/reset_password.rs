use std::collections::HashMap;

use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data},
    HttpRequest, HttpResponse,
};
use db_adapters::UserRepository;
use use_cases::{
    users::{password_reset::reset_password, signed_links::check_signed_link, AuthContext, LinkStatus},
    UseCaseError,
};

use crate::{
    users::{link_params, AUTH_PATH, FORGOT_PASSWORD_PATH},
    utils::{
        forms::Form,
        render::{render_template, TemplateData},
        response_500, response_from_use_case_error, see_other,
        session::{get_string, put_message, EMAIL_KEY, ERROR_KEY, FLASH_KEY},
    },
};

const RESET_PASSWORD_PAGE: &str = "auth-reset-password.page.html";

#[tracing::instrument(name = "Opening password reset link", skip_all)]
#[get("/reset-password")]
pub async fn show_reset_password_endpoint(
    req: HttpRequest,
    context: Data<AuthContext>,
    session: Session,
) -> HttpResponse {
    match check_signed_link(&context, &req.uri().to_string()) {
        LinkStatus::Valid => {}
        LinkStatus::Tampered => {
            put_message(&session, ERROR_KEY, "Invalid URL - tampering detected");
            return see_other(FORGOT_PASSWORD_PATH);
        }
        LinkStatus::Expired => {
            put_message(&session, ERROR_KEY, "Link has expired");
            return see_other(FORGOT_PASSWORD_PATH);
        }
    }

    let email = link_params(&req).remove("email").unwrap_or_default();
    let sealed = match context.seal_email(&email) {
        Ok(sealed) => sealed,
        Err(_) => {
            put_message(&session, ERROR_KEY, "Could not encrypt email");
            return see_other(FORGOT_PASSWORD_PATH);
        }
    };
    if let Err(e) = session.insert(EMAIL_KEY, sealed) {
        return response_500(e);
    }

    render_template(
        &session,
        RESET_PASSWORD_PAGE,
        TemplateData::with_form(Form::empty()),
    )
}

#[tracing::instrument(name = "Resetting a password", skip_all)]
#[post("/reset-password")]
pub async fn reset_password_endpoint(
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

    form.required(&["password", "verify-password"]);
    if form.valid() && form.get("password") != form.get("verify-password") {
        form.errors.add("verify-password", "Passwords do not match");
    }
    if !form.valid() {
        return render_template(&session, RESET_PASSWORD_PAGE, TemplateData::with_form(form));
    }

    let Some(sealed_email) = get_string(&session, EMAIL_KEY) else {
        put_message(
            &session,
            ERROR_KEY,
            "Your reset session has expired. Please request a new link.",
        );
        return see_other(FORGOT_PASSWORD_PATH);
    };

    match reset_password(
        &sealed_email,
        form.get("password"),
        repository.get_ref(),
        &context,
    )
    .await
    {
        Ok(()) => {
            session.remove(EMAIL_KEY);
            put_message(
                &session,
                FLASH_KEY,
                "Your password was reset. Please sign in.",
            );
            see_other(AUTH_PATH)
        }
        Err(UseCaseError::BadRequest(message)) | Err(UseCaseError::NotFound(message)) => {
            put_message(&session, ERROR_KEY, &message);
            see_other(FORGOT_PASSWORD_PATH)
        }
        Err(e) => response_from_use_case_error(e),
    }
}
