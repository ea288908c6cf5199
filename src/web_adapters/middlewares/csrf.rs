use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_session::SessionExt;
use actix_web::{
    body::EitherBody,
    dev::{self, forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::CONTENT_TYPE, Method},
    web::Bytes,
    Error,
};
use futures::future::LocalBoxFuture;
use subtle::ConstantTimeEq;

use crate::utils::{response_400, response_500, session::ensure_csrf_token};

pub const CSRF_HEADER: &str = "X-CSRF-Token";
pub const CSRF_FIELD: &str = "csrf_token";

/// Gives every session a CSRF token and rejects state changing requests
/// that do not echo it back, either in the `X-CSRF-Token` header or in a
/// urlencoded `csrf_token` field.
pub struct CsrfProtection;

impl<S: 'static, B> Transform<S, ServiceRequest> for CsrfProtection
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CsrfProtectionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CsrfProtectionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct CsrfProtectionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for CsrfProtectionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        Box::pin(async move {
            let session = req.get_session();
            let expected = match ensure_csrf_token(&session) {
                Ok(token) => token,
                Err(e) => {
                    let res = response_500(e);
                    return Ok(req.into_response(res).map_into_right_body());
                }
            };

            if !is_state_changing(req.method()) {
                return svc.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let supplied = match header_token(&req) {
                Some(token) => Some(token),
                None if is_urlencoded(&req) => {
                    let body = req.extract::<Bytes>().await?;
                    let token = form_token(&body);
                    req.set_payload(bytes_to_payload(body));
                    token
                }
                None => None,
            };

            match supplied {
                Some(token) if token_matches(&token, &expected) => {
                    svc.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                _ => {
                    tracing::event!(target: "backend", tracing::Level::WARN, "Rejected {} {} with a missing or wrong CSRF token", req.method(), req.path());
                    let res = response_400("Invalid CSRF token");
                    Ok(req.into_response(res).map_into_right_body())
                }
            }
        })
    }
}

fn is_state_changing(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn token_matches(supplied: &str, expected: &str) -> bool {
    supplied.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn header_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn is_urlencoded(req: &ServiceRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

fn form_token(body: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(body)
        .find(|(key, _)| key == CSRF_FIELD)
        .map(|(_, value)| value.into_owned())
}

/// Puts an already read body back so the handler can extract it again.
fn bytes_to_payload(buf: Bytes) -> dev::Payload {
    let (_, mut payload) = actix_http::h1::Payload::create(true);
    payload.unread_data(buf);
    dev::Payload::from(payload)
}
