use actix_web::http::StatusCode;

use crate::utils::{init_app, location, Browser, Connections};

#[actix_web::test]
async fn happy_path() {
    let Connections { app, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser.sign_in(&app, "test@gmail.com", "password").await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let (status, body) = browser.page(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Logged in successfully"));
    assert!(body.contains("You are signed in."));
}

#[actix_web::test]
async fn flash_message_is_shown_once() {
    let Connections { app, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;
    browser.sign_in(&app, "test@gmail.com", "password").await;

    let (_, first) = browser.page(&app, "/").await;
    let (_, second) = browser.page(&app, "/").await;

    assert!(first.contains("Logged in successfully"));
    assert!(!second.contains("Logged in successfully"));
    assert!(second.contains("You are signed in."));
}

#[actix_web::test]
async fn wrong_password_goes_back_to_sign_in_page() {
    let Connections { app, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser.sign_in(&app, "test@gmail.com", "passworda").await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/auth");

    let (_, body) = browser.page(&app, "/auth").await;
    assert!(body.contains("Invalid Login credentials"));

    let (_, body) = browser.page(&app, "/").await;
    assert!(!body.contains("You are signed in."));
}

#[actix_web::test]
async fn unknown_email_goes_back_to_sign_in_page() {
    let Connections { app, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser.sign_in(&app, "nobody@gmail.com", "password").await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/auth");
}

#[actix_web::test]
async fn invalid_form_is_rendered_again() {
    let Connections { app, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser.sign_in(&app, "not-an-email", "").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = crate::utils::body_text(res).await;
    assert!(body.contains("Invalid email address"));
    assert!(body.contains("This field cannot be blank"));
    assert!(body.contains("value=\"not-an-email\""));
}
