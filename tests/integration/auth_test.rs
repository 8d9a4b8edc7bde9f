//! Integration tests for the session and password reset flow.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use shophub_database::UserRepository;

const SIGNIN: &str = "mutation($email: String!, $password: String!) {
    signin(email: $email, password: $password) { id email }
}";

const RESET_PASSWORD: &str =
    "mutation($token: String!, $password: String!, $confirm: String!) {
        resetPassword(resetToken: $token, password: $password, confirmPassword: $confirm) { id }
    }";

/// Pull the 40-character token out of a reset e-mail body.
fn token_from_mail(body: &str) -> String {
    let start = body.find("resetToken=").expect("reset link in body") + "resetToken=".len();
    body[start..start + 40].to_string()
}

#[tokio::test]
async fn test_signup_sets_session_cookie() {
    let app = helpers::TestApp::new();

    let res = app
        .graphql(
            "mutation { signup(email: \"Wes@Example.com\", password: \"dogs\", name: \"Wes\") {
                email permissions
            } }",
            json!({}),
            None,
        )
        .await;

    assert!(res.is_ok(), "{}", res.body);
    assert_eq!(res.data()["signup"]["email"], "wes@example.com");
    assert_eq!(res.data()["signup"]["permissions"], json!(["USER"]));

    let raw = res.set_cookie.as_deref().expect("Set-Cookie header");
    assert!(raw.starts_with("token="));
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("Max-Age=31536000"));

    let me = app.me(res.cookie().as_deref()).await;
    assert_eq!(me["email"], "wes@example.com");
}

#[tokio::test]
async fn test_signup_then_signin_issue_equivalent_sessions() {
    let app = helpers::TestApp::new();
    let signup_cookie = app.signup("wes@example.com", "dogs", "Wes").await;

    let res = app
        .graphql(
            SIGNIN,
            json!({ "email": "WES@example.com", "password": "dogs" }),
            None,
        )
        .await;
    assert!(res.is_ok(), "{}", res.body);
    let signin_cookie = res.cookie().expect("signin sets a cookie");

    let from_signup = app.me(Some(&signup_cookie)).await;
    let from_signin = app.me(Some(&signin_cookie)).await;
    assert_eq!(from_signup["id"], from_signin["id"]);
    assert_eq!(res.data()["signin"]["id"], from_signup["id"]);
}

#[tokio::test]
async fn test_duplicate_signup_is_validation_error() {
    let app = helpers::TestApp::new();
    app.signup("wes@example.com", "dogs", "Wes").await;

    let res = app
        .graphql(
            "mutation { signup(email: \"wes@example.com\", password: \"cats\", name: \"Other\") { id } }",
            json!({}),
            None,
        )
        .await;

    assert_eq!(res.error_code(), Some("VALIDATION_ERROR"));
    assert!(res.set_cookie.is_none());
}

#[tokio::test]
async fn test_signin_wrong_password_is_auth_error() {
    let app = helpers::TestApp::new();
    app.signup("wes@example.com", "dogs", "Wes").await;

    let res = app
        .graphql(
            SIGNIN,
            json!({ "email": "wes@example.com", "password": "cats" }),
            None,
        )
        .await;

    assert_eq!(res.error_code(), Some("AUTH_ERROR"));
    assert_eq!(res.error_message(), Some("Invalid password"));
    assert!(res.set_cookie.is_none());
}

#[tokio::test]
async fn test_signin_unknown_email_is_not_found() {
    let app = helpers::TestApp::new();

    let res = app
        .graphql(
            SIGNIN,
            json!({ "email": "nobody@example.com", "password": "dogs" }),
            None,
        )
        .await;

    assert_eq!(res.error_code(), Some("NOT_FOUND"));
    assert_eq!(
        res.error_message(),
        Some("No such user found for email nobody@example.com")
    );
}

#[tokio::test]
async fn test_signout_clears_cookie() {
    let app = helpers::TestApp::new();
    let cookie = app.signup("wes@example.com", "dogs", "Wes").await;

    let res = app
        .graphql("mutation { signout { message } }", json!({}), Some(&cookie))
        .await;

    assert_eq!(res.data()["signout"]["message"], "Goodbye!");
    let raw = res.set_cookie.as_deref().expect("Set-Cookie header");
    assert!(raw.starts_with("token=;"));
    assert!(raw.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_garbage_cookie_is_anonymous() {
    let app = helpers::TestApp::new();

    let me = app.me(Some("token=not-a-jwt")).await;
    assert!(me.is_null());
    assert!(app.me(None).await.is_null());
}

#[tokio::test]
async fn test_password_reset_round_trip() {
    let app = helpers::TestApp::new();
    app.signup("wes@example.com", "dogs", "Wes").await;

    let res = app
        .graphql(
            "mutation { requestReset(email: \"wes@example.com\") { message } }",
            json!({}),
            None,
        )
        .await;
    assert_eq!(res.data()["requestReset"]["message"], "Thanks!");

    let mail = app
        .mailer
        .last_to("wes@example.com")
        .await
        .expect("reset mail sent");
    assert!(mail.html_body.contains("http://shop.test/reset?resetToken="));
    let token = token_from_mail(&mail.text_body);

    let mismatch = app
        .graphql(
            RESET_PASSWORD,
            json!({ "token": token, "password": "cats", "confirm": "cows" }),
            None,
        )
        .await;
    assert_eq!(mismatch.error_code(), Some("VALIDATION_ERROR"));
    assert_eq!(mismatch.error_message(), Some("Passwords don't match"));

    let reset = app
        .graphql(
            RESET_PASSWORD,
            json!({ "token": token, "password": "cats", "confirm": "cats" }),
            None,
        )
        .await;
    assert!(reset.is_ok(), "{}", reset.body);
    assert!(reset.cookie().is_some());

    let old = app
        .graphql(
            SIGNIN,
            json!({ "email": "wes@example.com", "password": "dogs" }),
            None,
        )
        .await;
    assert_eq!(old.error_code(), Some("AUTH_ERROR"));

    let new = app
        .graphql(
            SIGNIN,
            json!({ "email": "wes@example.com", "password": "cats" }),
            None,
        )
        .await;
    assert!(new.is_ok(), "{}", new.body);

    let reused = app
        .graphql(
            RESET_PASSWORD,
            json!({ "token": token, "password": "birds", "confirm": "birds" }),
            None,
        )
        .await;
    assert_eq!(reused.error_code(), Some("AUTH_ERROR"));
}

#[tokio::test]
async fn test_expired_reset_token_is_rejected() {
    let app = helpers::TestApp::new();
    app.signup("wes@example.com", "dogs", "Wes").await;

    let user = UserRepository::find_by_email(&app.store, "wes@example.com")
        .await
        .expect("lookup")
        .expect("user exists");
    let token = "ab".repeat(20);
    UserRepository::set_reset_token(
        &app.store,
        user.id,
        &token,
        Utc::now() - Duration::minutes(1),
    )
    .await
    .expect("store token");

    let res = app
        .graphql(
            RESET_PASSWORD,
            json!({ "token": token, "password": "cats", "confirm": "cats" }),
            None,
        )
        .await;

    assert_eq!(res.error_code(), Some("AUTH_ERROR"));
    assert_eq!(
        res.error_message(),
        Some("This token is either invalid or expired")
    );
}

#[tokio::test]
async fn test_request_reset_for_unknown_email() {
    let app = helpers::TestApp::new();

    let res = app
        .graphql(
            "mutation { requestReset(email: \"ghost@example.com\") { message } }",
            json!({}),
            None,
        )
        .await;

    assert_eq!(res.error_code(), Some("NOT_FOUND"));
    assert!(app.mailer.sent().await.is_empty());
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = helpers::TestApp::new();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "memory");
}
