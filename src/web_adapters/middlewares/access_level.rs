use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_session::SessionExt;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::LocalBoxFuture;

use crate::utils::{
    see_other,
    session::{get_access_level, put_message, ERROR_KEY},
};

pub const UNAUTHORIZED_PATH: &str = "/unauthorized_access";

/// Lets a request through only when the session's access level equals the
/// wrapped value. Everyone else is sent to the unauthorized page.
pub struct RequireAccessLevel(pub i32);

impl<S: 'static, B> Transform<S, ServiceRequest> for RequireAccessLevel
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAccessLevelMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAccessLevelMiddleware {
            service: Rc::new(service),
            access_level: self.0,
        }))
    }
}

pub struct RequireAccessLevelMiddleware<S> {
    service: Rc<S>,
    access_level: i32,
}

impl<S, B> Service<ServiceRequest> for RequireAccessLevelMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let required = self.access_level;
        Box::pin(async move {
            let session = req.get_session();
            if get_access_level(&session) == Some(required) {
                return svc.call(req).await.map(ServiceResponse::map_into_left_body);
            }
            put_message(&session, ERROR_KEY, "Requires authorized access!");
            Ok(req
                .into_response(see_other(UNAUTHORIZED_PATH))
                .map_into_right_body())
        })
    }
}
