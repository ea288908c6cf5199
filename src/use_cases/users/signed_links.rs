use url::Url;

use crate::{error_500, users::AuthContext, UseCaseError};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LinkStatus {
    Valid,
    Tampered,
    Expired,
}

/// `path` is appended to the frontend URL, `params` become its query string.
pub(crate) fn build_signed_link(
    context: &AuthContext,
    path: &str,
    params: &[(&str, &str)],
) -> Result<String, UseCaseError> {
    let link = Url::parse_with_params(&context.frontend_link(path), params).map_err(error_500)?;
    Ok(context.signer.sign(link.as_str()))
}

/// `request_uri` is the path and query the browser sent. HTML mail clients
/// sometimes leave `&amp;` escaped in the query, so `amp;` is dropped before
/// checking.
pub fn check_signed_link(context: &AuthContext, request_uri: &str) -> LinkStatus {
    let signed = context.frontend_link(request_uri).replace("amp;", "");
    if !context.signer.verify(&signed) {
        tracing::event!(target: "backend", tracing::Level::INFO, "Rejected tampered link");
        return LinkStatus::Tampered;
    }
    if context
        .signer
        .is_expired(&signed, context.link_expiration_minutes)
    {
        return LinkStatus::Expired;
    }
    LinkStatus::Valid
}
