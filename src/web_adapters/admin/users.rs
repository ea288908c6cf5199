use std::collections::HashMap;

use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data, Path},
    HttpResponse,
};
use db_adapters::UserRepository;
use use_cases::{
    users::admin::{list_users, update_access_level},
    UseCaseError,
};

use crate::{
    admin::ADMIN_USERS_PATH,
    utils::{
        forms::Form,
        render::{render_template, TemplateData},
        response_from_use_case_error, see_other,
        session::{put_message, ERROR_KEY, FLASH_KEY},
    },
};

#[tracing::instrument(name = "Listing users", skip_all)]
#[get("/users")]
pub async fn list_users_endpoint(
    repository: Data<dyn UserRepository>,
    session: Session,
) -> HttpResponse {
    match list_users(repository.get_ref()).await {
        Ok(users) => render_template(
            &session,
            "admin-users.page.html",
            TemplateData::default().insert_data("users", users),
        ),
        Err(e) => response_from_use_case_error(e),
    }
}

#[tracing::instrument(name = "Updating a user's access level", skip(repository, form, session))]
#[post("/users/{user_id}/access-level")]
pub async fn update_access_level_endpoint(
    repository: Data<dyn UserRepository>,
    path: Path<i64>,
    form: Result<web::Form<HashMap<String, String>>, actix_web::Error>,
    session: Session,
) -> HttpResponse {
    let mut form = match form {
        Ok(form) => Form::new(form.into_inner()),
        Err(_) => {
            put_message(&session, ERROR_KEY, "Could not parse the form");
            return see_other(ADMIN_USERS_PATH);
        }
    };

    form.required(&["access_level"]);
    if !form.valid() || !form.min_value_i64("access_level", 0) {
        put_message(
            &session,
            ERROR_KEY,
            "Access level must be a whole number no lower than 0.",
        );
        return see_other(ADMIN_USERS_PATH);
    }
    let Ok(access_level) = form.get("access_level").trim().parse::<i32>() else {
        put_message(&session, ERROR_KEY, "Access level is out of range.");
        return see_other(ADMIN_USERS_PATH);
    };

    match update_access_level(path.into_inner(), access_level, repository.get_ref()).await {
        Ok(user) => {
            put_message(
                &session,
                FLASH_KEY,
                &format!("Access level of {} set to {}.", user.email, user.access_level),
            );
            see_other(ADMIN_USERS_PATH)
        }
        Err(UseCaseError::NotFound(message)) => {
            put_message(&session, ERROR_KEY, &message);
            see_other(ADMIN_USERS_PATH)
        }
        Err(e) => response_from_use_case_error(e),
    }
}
