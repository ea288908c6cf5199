use actix_web::http::StatusCode;

use crate::utils::{body_text, init_app, link_path, location, Browser, Connections};

const FORGOT_PATH: &str = "/auth/forgot-password";
const RESET_PATH: &str = "/auth/reset-password";

#[actix_web::test]
async fn forgot_password_to_reset_to_sign_in() {
    let Connections {
        app,
        mut mail,
        settings,
        ..
    } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(&app, FORGOT_PATH, &[("email", "test@gmail.com")])
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/auth");

    let sent = mail.try_recv().unwrap();
    assert_eq!(sent.to, "test@gmail.com");
    assert_eq!(sent.subject, "Password Reset Request");
    assert_eq!(sent.template_name, "password-reset");
    let link = link_path(&sent, &settings);
    assert!(link.starts_with("/auth/reset-password?email=test%40gmail.com&hash="));

    let (status, _) = browser.page(&app, &link).await;
    assert_eq!(status, StatusCode::OK);

    let res = browser
        .post_form(
            &app,
            RESET_PATH,
            &[("password", "newpass"), ("verify-password", "newpass")],
        )
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/auth");
    let (_, body) = browser.page(&app, "/auth").await;
    assert!(body.contains("Your password was reset. Please sign in."));

    let res = browser.sign_in(&app, "test@gmail.com", "password").await;
    assert_eq!(location(&res), "/auth");

    let res = browser.sign_in(&app, "test@gmail.com", "newpass").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
}

#[actix_web::test]
async fn unknown_email_is_reported() {
    let Connections { app, mut mail, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(&app, FORGOT_PATH, &[("email", "nobody@gmail.com")])
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), FORGOT_PATH);
    let (_, body) = browser.page(&app, FORGOT_PATH).await;
    assert!(body.contains("User with nobody@gmail.com email does not exist"));
    assert!(mail.try_recv().is_err());
}

#[actix_web::test]
async fn malformed_email_is_rendered_again() {
    let Connections { app, mut mail, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(&app, FORGOT_PATH, &[("email", "test.gmail.com")])
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("Invalid email address"));
    assert!(mail.try_recv().is_err());
}

#[actix_web::test]
async fn tampered_link_is_rejected() {
    let Connections {
        app,
        mut mail,
        settings,
        ..
    } = init_app().await;
    let mut browser = Browser::open(&app).await;
    browser
        .post_form(&app, FORGOT_PATH, &[("email", "test@gmail.com")])
        .await;
    let link = link_path(&mail.try_recv().unwrap(), &settings).replace("test%40", "admin%40");

    let res = browser.get(&app, &link).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), FORGOT_PATH);
    let (_, body) = browser.page(&app, FORGOT_PATH).await;
    assert!(body.contains("Invalid URL - tampering detected"));
}

#[actix_web::test]
async fn mismatched_passwords_are_rendered_again() {
    let Connections { app, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(
            &app,
            RESET_PATH,
            &[("password", "newpass"), ("verify-password", "otherpass")],
        )
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("Passwords do not match"));
}

#[actix_web::test]
async fn reset_without_opened_link_is_rejected() {
    let Connections { app, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(
            &app,
            RESET_PATH,
            &[("password", "newpass"), ("verify-password", "newpass")],
        )
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), FORGOT_PATH);
    let (_, body) = browser.page(&app, FORGOT_PATH).await;
    assert!(body.contains("Your reset session has expired. Please request a new link."));
}
