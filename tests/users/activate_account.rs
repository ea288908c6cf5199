use actix_web::{http::StatusCode, test};
use chrono::{TimeDelta, Utc};
use common::crypto::UrlSigner;
use db_adapters::UserRepository;
use web_adapters::utils::JsonResponse;

use crate::utils::{init_app, link_path, location, Browser, Connections};

const ACTIVATE_PATH: &str = "/auth/activate-account";

#[actix_web::test]
async fn sign_up_to_activation_to_sign_in() {
    let Connections {
        app,
        repository,
        mut mail,
        settings,
    } = init_app().await;
    let mut browser = Browser::open(&app).await;
    let res = browser
        .post_form(
            &app,
            "/auth/signup",
            &[
                ("firstName", "Jane"),
                ("lastName", "Roe"),
                ("email", "jane@gmail.com"),
            ],
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let link = link_path(&mail.try_recv().unwrap(), &settings);

    let (status, body) = browser.page(&app, &link).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Hello Jane Roe"));

    let res = browser
        .post_form(&app, ACTIVATE_PATH, &[("password", "secret")])
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let res: JsonResponse = test::read_body_json(res).await;
    assert!(res.ok);
    assert_eq!(res.message, "Successfully registered user!");

    let user = repository
        .get_user_by_email("jane@gmail.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.first_name, "Jane");
    assert_eq!(user.last_name, "Roe");
    assert_eq!(user.access_level, 1);
    assert_ne!(user.password, "secret");

    let res = browser.sign_in(&app, "jane@gmail.com", "secret").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
}

#[actix_web::test]
async fn link_cannot_be_used_twice() {
    let Connections {
        app,
        mut mail,
        settings,
        ..
    } = init_app().await;
    let mut browser = Browser::open(&app).await;
    browser
        .post_form(
            &app,
            "/auth/signup",
            &[
                ("firstName", "Jane"),
                ("lastName", "Roe"),
                ("email", "jane@gmail.com"),
            ],
        )
        .await;
    let link = link_path(&mail.try_recv().unwrap(), &settings);
    browser.page(&app, &link).await;
    let res = browser
        .post_form(&app, ACTIVATE_PATH, &[("password", "secret")])
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    browser.page(&app, &link).await;
    let res = browser
        .post_form(&app, ACTIVATE_PATH, &[("password", "secret")])
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let res: JsonResponse = test::read_body_json(res).await;
    assert!(!res.ok);
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
        .post_form(
            &app,
            "/auth/signup",
            &[
                ("firstName", "Jane"),
                ("lastName", "Roe"),
                ("email", "jane@gmail.com"),
            ],
        )
        .await;
    let link = link_path(&mail.try_recv().unwrap(), &settings).replace("jane%40", "mallory%40");

    let res = browser.get(&app, &link).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
    let (_, body) = browser.page(&app, "/").await;
    assert!(body.contains("Invalid URL - tampering detected"));
}

#[actix_web::test]
async fn expired_link_is_rejected() {
    let Connections { app, settings, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;
    let signer = UrlSigner::new(settings.secret.secret_key.as_bytes());
    let signed = signer.sign_at(
        "http://localhost:8080/auth/activate-account?firstName=Jane&lastName=Roe&email=jane%40gmail.com",
        Utc::now() - TimeDelta::minutes(settings.secret.link_expiration_minutes + 1),
    );
    let link = signed.trim_start_matches("http://localhost:8080");

    let res = browser.get(&app, link).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
    let (_, body) = browser.page(&app, "/").await;
    assert!(body.contains("Link has expired"));
}

#[actix_web::test]
async fn activation_without_opened_link_is_rejected() {
    let Connections { app, repository, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(&app, ACTIVATE_PATH, &[("password", "secret")])
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let res: JsonResponse = test::read_body_json(res).await;
    assert!(!res.ok);
    assert_eq!(repository.all_users().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn short_password_is_rejected() {
    let Connections {
        app,
        repository,
        mut mail,
        settings,
    } = init_app().await;
    let mut browser = Browser::open(&app).await;
    browser
        .post_form(
            &app,
            "/auth/signup",
            &[
                ("firstName", "Jane"),
                ("lastName", "Roe"),
                ("email", "jane@gmail.com"),
            ],
        )
        .await;
    let link = link_path(&mail.try_recv().unwrap(), &settings);
    browser.page(&app, &link).await;

    let res = browser
        .post_form(&app, ACTIVATE_PATH, &[("password", "ab")])
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let res: JsonResponse = test::read_body_json(res).await;
    assert_eq!(
        res.message,
        "Make sure your password is at least 3 characters long!"
    );
    assert!(repository
        .get_user_by_email("jane@gmail.com")
        .await
        .unwrap()
        .is_none());
}
