use actix_cors::Cors;
use actix_files::Files;
use actix_session::{
    config::{PersistentSession, TtlExtensionPolicy},
    storage::{RedisSessionStore, SessionStore},
    SessionMiddleware,
};
use actix_web::{
    body::MessageBody,
    cookie::{self, SameSite},
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header::{self, HeaderName},
    middleware::Compress,
    web::Data,
    App,
};
use common::settings::types::Settings;
use db_adapters::UserRepository;
use use_cases::users::AuthContext;
use web_adapters::{admin_routes, auth_routes, home_routes, CsrfProtection};

pub const SESSION_COOKIE_NAME: &str = "sessionId";
pub const ASSETS_PATH: &str = "/assets";

/// Cookie signing key from `secret.hmac_secret`, which must be at least 64
/// bytes long.
pub fn session_key(settings: &Settings) -> Result<cookie::Key, String> {
    cookie::Key::try_from(settings.secret.hmac_secret.as_bytes())
        .map_err(|e| format!("Invalid APP_SECRET__HMAC_SECRET: {}", e))
}

pub async fn redis_session_store(settings: &Settings) -> Result<RedisSessionStore, String> {
    RedisSessionStore::new(settings.redis.url.clone())
        .await
        .map_err(|e| format!("Error on getting RedisSessionStore: {}", e))
}

pub fn session_middleware<S: SessionStore>(
    store: S,
    key: cookie::Key,
    settings: &Settings,
) -> SessionMiddleware<S> {
    SessionMiddleware::builder(store, key)
        .cookie_name(SESSION_COOKIE_NAME.to_string())
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .cookie_secure(!settings.debug)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(cookie::time::Duration::hours(24))
                .session_ttl_extension_policy(TtlExtensionPolicy::OnEveryRequest),
        )
        .build()
}

pub fn cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|origin, _| {
            let origin = origin.as_bytes();
            origin.starts_with(b"http://") || origin.starts_with(b"https://")
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
            header::CACHE_CONTROL,
            header::PRAGMA,
            header::EXPIRES,
        ])
        .max_age(300)
}

/// The whole application. Production and the request tests both go through
/// here so they share routes and middleware order.
pub fn build_app<S: SessionStore + 'static>(
    settings: &Settings,
    repository: Data<dyn UserRepository>,
    context: Data<AuthContext>,
    session_store: S,
    session_key: cookie::Key,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    App::new()
        .wrap(CsrfProtection)
        .wrap(session_middleware(session_store, session_key, settings))
        .wrap(cors())
        .wrap(Compress::default())
        .app_data(repository)
        .app_data(context)
        .service(Files::new(ASSETS_PATH, &settings.application.assets_dir))
        .configure(home_routes)
        .configure(auth_routes)
        .configure(admin_routes)
}
