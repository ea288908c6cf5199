use std::fmt::Debug;

use db_adapters::RepositoryError;

pub mod users;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    BadRequest(String),          // 400
    Unauthorized,                // 401
    NotFound(String),            // 404
    Conflict(String),            // 409
    InternalServerError(String), // 500
}

pub(crate) fn error_500(e: impl Debug) -> UseCaseError {
    UseCaseError::InternalServerError(format!("{:?}", e))
}

impl From<RepositoryError> for UseCaseError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => UseCaseError::NotFound("User not found".to_string()),
            RepositoryError::Duplicate => {
                UseCaseError::Conflict("Email address already exists!".to_string())
            }
            RepositoryError::InvalidCredentials => UseCaseError::Unauthorized,
            e => error_500(e),
        }
    }
}
