use std::collections::HashMap;

use actix_web::{
    web::{scope, ServiceConfig},
    HttpRequest,
};

mod activate_account;
mod forgot_password;
mod reset_password;
mod sign_in;
mod sign_out;
mod sign_up;

pub const AUTH_PATH: &str = "/auth";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";

pub fn auth_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        scope(AUTH_PATH)
            .service(sign_in::auth_page_endpoint)
            .service(sign_in::sign_in_endpoint)
            .service(sign_up::sign_up_endpoint)
            .service(sign_out::sign_out_endpoint)
            .service(activate_account::show_activate_account_endpoint)
            .service(activate_account::activate_account_endpoint)
            .service(forgot_password::show_forgot_password_endpoint)
            .service(forgot_password::forgot_password_endpoint)
            .service(reset_password::show_reset_password_endpoint)
            .service(reset_password::reset_password_endpoint),
    );
}

/// Query parameters of an emailed link, read the same way the link was
/// verified.
fn link_params(req: &HttpRequest) -> HashMap<String, String> {
    let query = req.query_string().replace("amp;", "");
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
