use std::collections::HashMap;

use actix_web::{
    post,
    web::{self, Data},
    HttpResponse,
};
use db_adapters::UserRepository;
use use_cases::{
    users::{sign_up::sign_up, types::SignUpRequest, AuthContext},
    UseCaseError,
};

use crate::utils::{forms::Form, response_from_use_case_error, JsonResponse};

#[tracing::instrument(name = "Signing a user up", skip_all)]
#[post("/signup")]
pub async fn sign_up_endpoint(
    repository: Data<dyn UserRepository>,
    context: Data<AuthContext>,
    form: Result<web::Form<HashMap<String, String>>, actix_web::Error>,
) -> HttpResponse {
    let mut form = match form {
        Ok(form) => Form::new(form.into_inner()),
        Err(_) => {
            return HttpResponse::BadRequest().json(JsonResponse::failed("Could not parse the form"))
        }
    };

    form.is_email("email");
    form.required(&["firstName", "lastName", "email"]);
    form.min_length("firstName", 3);
    form.min_length("lastName", 3);
    if !form.valid() {
        let message = if form.errors.get("email").is_some() {
            "Make sure email is properly formatted."
        } else {
            "Make sure each name is at least 3 characters long."
        };
        return HttpResponse::BadRequest().json(JsonResponse::failed(message));
    }

    let params = SignUpRequest {
        first_name: form.get("firstName").trim().to_string(),
        last_name: form.get("lastName").trim().to_string(),
        email: form.get("email").to_string(),
    };
    match sign_up(params, repository.get_ref(), &context).await {
        Ok(()) => HttpResponse::Ok().json(JsonResponse::ok("Success!")),
        Err(UseCaseError::Conflict(message)) => {
            HttpResponse::BadRequest().json(JsonResponse::failed(&message))
        }
        Err(e) => response_from_use_case_error(e),
    }
}
