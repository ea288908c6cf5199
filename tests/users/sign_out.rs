use actix_web::http::StatusCode;

use crate::utils::{init_app, location, Browser, Connections};

#[actix_web::test]
async fn sign_out_ends_the_session() {
    let Connections { app, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;
    browser.sign_in(&app, "test@gmail.com", "password").await;
    let (_, body) = browser.page(&app, "/").await;
    assert!(body.contains("You are signed in."));

    let res = browser.get(&app, "/auth/signout").await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let (status, body) = browser.page(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("You are signed in."));
    assert!(body.contains("Sign in"));
}

#[actix_web::test]
async fn sign_out_without_session_redirects_home() {
    let Connections { app, .. } = init_app().await;
    let mut browser = Browser::default();

    let res = browser.get(&app, "/auth/signout").await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
}
