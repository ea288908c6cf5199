use actix_session::Session;
use actix_web::{get, web::ServiceConfig, HttpResponse};

use crate::utils::render::{render_template, TemplateData};

pub fn home_routes(cfg: &mut ServiceConfig) {
    cfg.service(home_endpoint)
        .service(unauthorized_access_endpoint);
}

#[tracing::instrument(name = "Showing home page", skip(session))]
#[get("/")]
pub async fn home_endpoint(session: Session) -> HttpResponse {
    render_template(&session, "home.page.html", TemplateData::default())
}

#[tracing::instrument(name = "Showing unauthorized page", skip(session))]
#[get("/unauthorized_access")]
pub async fn unauthorized_access_endpoint(session: Session) -> HttpResponse {
    render_template(&session, "unauthorized.page.html", TemplateData::default())
}
