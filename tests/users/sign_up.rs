use actix_web::{http::StatusCode, test};
use db_adapters::UserRepository;
use web_adapters::utils::JsonResponse;

use crate::utils::{init_app, Browser, Connections};

const SIGN_UP_PATH: &str = "/auth/signup";

#[actix_web::test]
async fn happy_path() {
    let Connections {
        app,
        repository,
        mut mail,
        ..
    } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(
            &app,
            SIGN_UP_PATH,
            &[
                ("firstName", "Jane"),
                ("lastName", "Roe"),
                ("email", "jane@gmail.com"),
            ],
        )
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let res: JsonResponse = test::read_body_json(res).await;
    assert!(res.ok);
    assert_eq!(res.message, "Success!");

    let sent = mail.try_recv().unwrap();
    assert_eq!(sent.to, "jane@gmail.com");
    assert_eq!(sent.from, "admin@localhost.test");
    assert_eq!(sent.subject, "Activate Account");
    assert_eq!(sent.template_name, "activate-account");

    // Nothing is stored until the link is opened.
    assert!(repository
        .get_user_by_email("jane@gmail.com")
        .await
        .unwrap()
        .is_none());
}

#[actix_web::test]
async fn existing_email_is_rejected() {
    let Connections { app, mut mail, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(
            &app,
            SIGN_UP_PATH,
            &[
                ("firstName", "Jon"),
                ("lastName", "Doe"),
                ("email", "test@gmail.com"),
            ],
        )
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let res: JsonResponse = test::read_body_json(res).await;
    assert!(!res.ok);
    assert_eq!(res.message, "Email address already exists!");
    assert!(mail.try_recv().is_err());
}

#[actix_web::test]
async fn malformed_email_is_rejected() {
    let Connections { app, mut mail, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(
            &app,
            SIGN_UP_PATH,
            &[
                ("firstName", "Jane"),
                ("lastName", "Roe"),
                ("email", "jane.gmail.com"),
            ],
        )
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let res: JsonResponse = test::read_body_json(res).await;
    assert_eq!(res.message, "Make sure email is properly formatted.");
    assert!(mail.try_recv().is_err());
}

#[actix_web::test]
async fn short_names_are_rejected() {
    let Connections { app, mut mail, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(
            &app,
            SIGN_UP_PATH,
            &[
                ("firstName", "Jo"),
                ("lastName", "Roe"),
                ("email", "jo@gmail.com"),
            ],
        )
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let res: JsonResponse = test::read_body_json(res).await;
    assert_eq!(
        res.message,
        "Make sure each name is at least 3 characters long."
    );
    assert!(mail.try_recv().is_err());
}

#[actix_web::test]
async fn padded_short_name_is_rejected() {
    let Connections { app, mut mail, .. } = init_app().await;
    let mut browser = Browser::open(&app).await;

    let res = browser
        .post_form(
            &app,
            SIGN_UP_PATH,
            &[
                ("firstName", "  Al"),
                ("lastName", "Roe"),
                ("email", "al@gmail.com"),
            ],
        )
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let res: JsonResponse = test::read_body_json(res).await;
    assert_eq!(
        res.message,
        "Make sure each name is at least 3 characters long."
    );
    assert!(mail.try_recv().is_err());
}
