use std::{backtrace::Backtrace, fmt::Debug};

use actix_web::{http::header, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{event, Level};
use use_cases::UseCaseError;

pub mod forms;
pub mod render;
pub mod session;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Envelope of the endpoints called from page scripts.
#[derive(Serialize, Deserialize, Debug)]
pub struct JsonResponse {
    pub ok: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            ok: true,
            message: message.to_string(),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            ok: false,
            message: message.to_string(),
        }
    }
}

/// 303 to `location`. Used after every form post.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

///Bad Request
pub fn response_400(error_message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error_message.to_string(),
    })
}

/// Unauthorized
pub fn response_401() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: "You are not logged in.".to_string(),
    })
}

/// NotFound
pub fn response_404(error_message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: error_message.to_string(),
    })
}

/// Internal Server Error: with logging
pub fn response_500<T: Debug>(e: T) -> HttpResponse {
    event!(target: "backend", Level::ERROR, "{:?}\n{}", e, Backtrace::force_capture());
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Some unexpected error happened. Please try again later.".to_string(),
    })
}

/// Fallback for use case errors a handler does not treat on its own.
pub fn response_from_use_case_error(e: UseCaseError) -> HttpResponse {
    match e {
        UseCaseError::BadRequest(message) => response_400(&message),
        UseCaseError::Unauthorized => response_401(),
        UseCaseError::NotFound(message) => response_404(&message),
        UseCaseError::Conflict(message) => HttpResponse::Conflict().json(ErrorResponse {
            error: message,
        }),
        UseCaseError::InternalServerError(e) => response_500(e),
    }
}
