use std::collections::HashMap;

use actix_session::{Session, SessionInsertError};
use actix_web::{
    get, post,
    web::{self, Data},
    HttpRequest, HttpResponse,
};
use db_adapters::UserRepository;
use use_cases::{
    users::{
        activate_account::{activate_account, pending_activation},
        signed_links::check_signed_link,
        types::PendingActivation,
        AuthContext, LinkStatus,
    },
    UseCaseError,
};

use crate::{
    users::link_params,
    utils::{
        forms::Form,
        render::{render_template, TemplateData},
        response_500, response_from_use_case_error, see_other,
        session::{get_string, put_message, EMAIL_KEY, ERROR_KEY, FIRST_NAME_KEY, LAST_NAME_KEY},
        JsonResponse,
    },
};

const ACTIVATE_ACCOUNT_PAGE: &str = "auth-activate-account.page.html";

#[tracing::instrument(name = "Opening activation link", skip_all)]
#[get("/activate-account")]
pub async fn show_activate_account_endpoint(
    req: HttpRequest,
    context: Data<AuthContext>,
    session: Session,
) -> HttpResponse {
    match check_signed_link(&context, &req.uri().to_string()) {
        LinkStatus::Valid => {}
        LinkStatus::Tampered => {
            put_message(&session, ERROR_KEY, "Invalid URL - tampering detected");
            return see_other("/");
        }
        LinkStatus::Expired => {
            put_message(&session, ERROR_KEY, "Link has expired");
            return see_other("/");
        }
    }

    let params = link_params(&req);
    let pending = match pending_activation(
        &context,
        param(&params, "firstName"),
        param(&params, "lastName"),
        param(&params, "email"),
    ) {
        Ok(pending) => pending,
        Err(e) => return response_from_use_case_error(e),
    };
    if let Err(e) = store_pending_activation(&session, &pending) {
        return response_500(e);
    }

    render_template(
        &session,
        ACTIVATE_ACCOUNT_PAGE,
        TemplateData::with_form(Form::empty())
            .insert_string("first_name", &pending.first_name)
            .insert_string("last_name", &pending.last_name),
    )
}

#[tracing::instrument(name = "Activating an account", skip_all)]
#[post("/activate-account")]
pub async fn activate_account_endpoint(
    repository: Data<dyn UserRepository>,
    context: Data<AuthContext>,
    form: Result<web::Form<HashMap<String, String>>, actix_web::Error>,
    session: Session,
) -> HttpResponse {
    let mut form = match form {
        Ok(form) => Form::new(form.into_inner()),
        Err(_) => {
            return HttpResponse::BadRequest().json(JsonResponse::failed("Could not parse the form"))
        }
    };

    form.required(&["password"]);
    form.min_length("password", 3);
    if !form.valid() {
        return HttpResponse::BadRequest().json(JsonResponse::failed(
            "Make sure your password is at least 3 characters long!",
        ));
    }

    let Some(pending) = load_pending_activation(&session) else {
        return HttpResponse::BadRequest().json(JsonResponse::failed(
            "Your activation session has expired. Please use the link from your email again.",
        ));
    };

    match activate_account(pending, form.get("password"), repository.get_ref(), &context).await {
        Ok(_) => {
            clear_pending_activation(&session);
            HttpResponse::Ok().json(JsonResponse::ok("Successfully registered user!"))
        }
        Err(UseCaseError::Conflict(message)) | Err(UseCaseError::BadRequest(message)) => {
            HttpResponse::BadRequest().json(JsonResponse::failed(&message))
        }
        Err(e) => response_from_use_case_error(e),
    }
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or_default()
}

fn store_pending_activation(
    session: &Session,
    pending: &PendingActivation,
) -> Result<(), SessionInsertError> {
    session.insert(FIRST_NAME_KEY, &pending.first_name)?;
    session.insert(LAST_NAME_KEY, &pending.last_name)?;
    session.insert(EMAIL_KEY, &pending.encrypted_email)?;
    Ok(())
}

fn load_pending_activation(session: &Session) -> Option<PendingActivation> {
    Some(PendingActivation {
        first_name: get_string(session, FIRST_NAME_KEY)?,
        last_name: get_string(session, LAST_NAME_KEY)?,
        encrypted_email: get_string(session, EMAIL_KEY)?,
    })
}

fn clear_pending_activation(session: &Session) {
    session.remove(FIRST_NAME_KEY);
    session.remove(LAST_NAME_KEY);
    session.remove(EMAIL_KEY);
}
