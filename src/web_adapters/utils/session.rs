use actix_session::{Session, SessionInsertError};
use common::crypto::random_token;

pub const USER_ID_KEY: &str = "user_id";
pub const ACCESS_LEVEL_KEY: &str = "access_level";
pub const FLASH_KEY: &str = "flash";
pub const WARNING_KEY: &str = "warning";
pub const ERROR_KEY: &str = "error";
pub const EMAIL_KEY: &str = "email";
pub const FIRST_NAME_KEY: &str = "firstName";
pub const LAST_NAME_KEY: &str = "lastName";
pub const CSRF_TOKEN_KEY: &str = "csrf_token";

const CSRF_TOKEN_BYTES: usize = 32;

/// Stores a message shown once by the next rendered page. `key` is one of
/// `FLASH_KEY`, `WARNING_KEY` or `ERROR_KEY`.
pub fn put_message(session: &Session, key: &str, message: &str) {
    if let Err(e) = session.insert(key, message) {
        tracing::event!(target: "backend", tracing::Level::WARN, "Could not store {} message in session: {}", key, e);
    }
}

/// Reads and removes a message.
pub fn pop_message(session: &Session, key: &str) -> String {
    match session.remove_as::<String>(key) {
        Some(Ok(message)) => message,
        _ => String::new(),
    }
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>(USER_ID_KEY).ok().flatten()
}

pub fn get_access_level(session: &Session) -> Option<i32> {
    session.get::<i32>(ACCESS_LEVEL_KEY).ok().flatten()
}

pub fn get_string(session: &Session, key: &str) -> Option<String> {
    session.get::<String>(key).ok().flatten()
}

pub fn sign_in_session(
    session: &Session,
    user_id: i64,
    access_level: i32,
) -> Result<(), SessionInsertError> {
    session.renew();
    session.insert(USER_ID_KEY, user_id)?;
    session.insert(ACCESS_LEVEL_KEY, access_level)?;
    Ok(())
}

/// Returns the session's CSRF token, creating one if the session has none.
pub fn ensure_csrf_token(session: &Session) -> Result<String, SessionInsertError> {
    if let Some(token) = get_string(session, CSRF_TOKEN_KEY) {
        return Ok(token);
    }
    let token = random_token(CSRF_TOKEN_BYTES);
    session.insert(CSRF_TOKEN_KEY, &token)?;
    Ok(token)
}
