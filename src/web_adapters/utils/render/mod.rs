use std::collections::HashMap;

use actix_session::Session;
use actix_web::HttpResponse;
use chrono::DateTime;
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::utils::{
    forms::Form,
    response_500,
    session::{
        ensure_csrf_token, get_access_level, get_user_id, pop_message, ERROR_KEY, FLASH_KEY,
        WARNING_KEY,
    },
};

static TEMPLATES: &[(&str, &str)] = &[
    (
        "base.layout.html",
        include_str!("../../templates/base.layout.html"),
    ),
    ("home.page.html", include_str!("../../templates/home.page.html")),
    ("auth.page.html", include_str!("../../templates/auth.page.html")),
    (
        "auth-activate-account.page.html",
        include_str!("../../templates/auth-activate-account.page.html"),
    ),
    (
        "auth-forgot-password.page.html",
        include_str!("../../templates/auth-forgot-password.page.html"),
    ),
    (
        "auth-reset-password.page.html",
        include_str!("../../templates/auth-reset-password.page.html"),
    ),
    (
        "unauthorized.page.html",
        include_str!("../../templates/unauthorized.page.html"),
    ),
    (
        "admin-users.page.html",
        include_str!("../../templates/admin-users.page.html"),
    ),
];

pub static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_loader(|name| {
        Ok(TEMPLATES
            .iter()
            .find(|(template_name, _)| *template_name == name)
            .map(|(_, source)| source.to_string()))
    });
    env.add_filter("human_date", human_date);
    env
});

/// `YYYY-MM-DD` for an RFC 3339 timestamp. Anything else is returned as is.
pub fn human_date(value: String) -> String {
    match DateTime::parse_from_rfc3339(&value) {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => value,
    }
}

/// Values handed to a page template. The message fields, `csrf_token` and
/// the authentication flags are filled from the session on render.
#[derive(Serialize, Default, Debug)]
pub struct TemplateData {
    pub string_map: HashMap<String, String>,
    pub data: HashMap<String, serde_json::Value>,
    pub form: Form,
    pub flash: String,
    pub warning: String,
    pub error: String,
    pub csrf_token: String,
    pub is_authenticated: bool,
    pub access_level: i32,
}

impl TemplateData {
    pub fn with_form(form: Form) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn insert_data(mut self, key: &str, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.data.insert(key.to_string(), value);
            }
            Err(e) => {
                tracing::event!(target: "backend", tracing::Level::ERROR, "Could not serialize template data {}: {}", key, e)
            }
        }
        self
    }

    pub fn insert_string(mut self, key: &str, value: &str) -> Self {
        self.string_map.insert(key.to_string(), value.to_string());
        self
    }
}

/// Messages are removed from the session here, so each is shown once.
pub fn add_default_data(mut td: TemplateData, session: &Session) -> TemplateData {
    td.flash = pop_message(session, FLASH_KEY);
    td.warning = pop_message(session, WARNING_KEY);
    td.error = pop_message(session, ERROR_KEY);
    td.csrf_token = ensure_csrf_token(session).unwrap_or_default();
    td.is_authenticated = get_user_id(session).is_some();
    td.access_level = get_access_level(session).unwrap_or_default();
    td
}

pub fn render_template(session: &Session, template_name: &str, td: TemplateData) -> HttpResponse {
    let td = add_default_data(td, session);
    match ENV
        .get_template(template_name)
        .and_then(|template| template.render(&td))
    {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => response_500(e),
    }
}
