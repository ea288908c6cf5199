use std::sync::Arc;

use actix_http::Request;
use actix_session::storage::CookieSessionStore;
use actix_web::{
    body::MessageBody,
    cookie::Cookie,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test::{self, TestRequest},
    web::Data,
};
use common::{
    factory::{self, UserFactory},
    mail::{MailData, MailQueue, MailReceiver},
    settings::{get_test_settings, types::Settings},
};
use db_adapters::{TestingUserRepository, UserRepository};
use entities::custom_methods::user::ADMIN_ACCESS_LEVEL;
use sea_orm::TryIntoModel;
use server::{build_app, session_key, SESSION_COOKIE_NAME};
use use_cases::users::AuthContext;

pub const ADMIN_EMAIL: &str = "admin@gmail.com";

pub struct Connections<S> {
    pub app: S,
    pub repository: Arc<TestingUserRepository>,
    pub mail: MailReceiver,
    pub settings: Settings,
}

pub async fn init_app() -> Connections<
    impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
> {
    init_app_with(TestingUserRepository::new()).await
}

pub async fn init_app_with(
    repository: TestingUserRepository,
) -> Connections<
    impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
> {
    let settings = get_test_settings();
    let repository = Arc::new(repository);
    let shared: Arc<dyn UserRepository> = repository.clone();
    let (queue, mail) = MailQueue::channel();
    let context = AuthContext::from_settings(&settings, queue).unwrap();
    let key = session_key(&settings).unwrap();

    // Same wiring as the server, only the session store differs.
    let app = test::init_service(build_app(
        &settings,
        Data::from(shared),
        Data::new(context),
        CookieSessionStore::default(),
        key,
    ))
    .await;
    Connections {
        app,
        repository,
        mail,
        settings,
    }
}

/// User 1 is `test@gmail.com`, user 2 is the administrator. Both use
/// `password`.
pub fn repository_with_admin() -> TestingUserRepository {
    let user = factory::user(1).email("test@gmail.com");
    let admin = factory::user(2)
        .email(ADMIN_EMAIL)
        .access_level(ADMIN_ACCESS_LEVEL);
    TestingUserRepository::with_users(vec![
        user.try_into_model().unwrap(),
        admin.try_into_model().unwrap(),
    ])
}

/// Carries the session cookie and CSRF token from one request to the next.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
    pub csrf_token: String,
}

impl Browser {
    /// Opens the home page so the session exists and has a CSRF token.
    pub async fn open<S, B>(app: &S) -> Self
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let mut browser = Self::default();
        let (status, _) = browser.page(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!browser.csrf_token.is_empty());
        browser
    }

    pub async fn send<S, B>(&mut self, app: &S, req: TestRequest) -> ServiceResponse<B>
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    {
        let req = match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        };
        let res = test::call_service(app, req.to_request()).await;
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE_NAME)
        {
            self.cookie = if cookie.value().is_empty() {
                None
            } else {
                Some(cookie.into_owned())
            };
        }
        res
    }

    pub async fn get<S, B>(&mut self, app: &S, uri: &str) -> ServiceResponse<B>
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    {
        self.send(app, TestRequest::get().uri(uri)).await
    }

    /// GETs `uri` and returns the body. Picks up the page's CSRF token.
    pub async fn page<S, B>(&mut self, app: &S, uri: &str) -> (StatusCode, String)
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let res = self.get(app, uri).await;
        let status = res.status();
        let body = body_text(res).await;
        if let Some(token) = scrape_csrf_token(&body) {
            self.csrf_token = token;
        }
        (status, body)
    }

    /// Posts `fields` urlencoded with the session's CSRF token added.
    pub async fn post_form<S, B>(
        &mut self,
        app: &S,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> ServiceResponse<B>
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    {
        let token = self.csrf_token.clone();
        let mut fields = fields.to_vec();
        fields.push(("csrf_token", &token));
        self.send(app, TestRequest::post().uri(uri).set_form(&fields))
            .await
    }

    pub async fn sign_in<S, B>(&mut self, app: &S, email: &str, password: &str) -> ServiceResponse<B>
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    {
        self.post_form(
            app,
            "/auth/signin",
            &[("email", email), ("password", password)],
        )
        .await
    }
}

pub async fn body_text<B: MessageBody>(res: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).unwrap()
}

pub fn location<B>(res: &ServiceResponse<B>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn scrape_csrf_token(body: &str) -> Option<String> {
    body.split("name=\"csrf-token\" content=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Path and query of the link inside a queued mail, ready to be requested.
pub fn link_path(mail: &MailData, settings: &Settings) -> String {
    let link = mail.data.get_attr("link").unwrap().to_string();
    link.trim_start_matches(settings.application.frontend_url.as_str())
        .to_string()
}
