use actix_session::Session;
use actix_web::{get, HttpResponse};

use crate::utils::see_other;

#[tracing::instrument(name = "Signing a user out", skip(session))]
#[get("/signout")]
pub async fn sign_out_endpoint(session: Session) -> HttpResponse {
    session.purge();
    see_other("/")
}
