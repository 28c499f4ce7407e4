mod common;

use axum::http::StatusCode;
use common::{json_body, session_cookie, test_app};
use serde_json::json;

#[tokio::test]
async fn register_rejects_duplicate_usernames() {
    let app = test_app().await;
    let creds = json!({ "username": "ada", "password": "pw" });

    let resp = app.send("POST", "/auth/register", None, Some(creds.clone())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.send("POST", "/auth/register", None, Some(creds)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "USERNAME_TAKEN");
}

#[tokio::test]
async fn login_requires_the_right_password() {
    let app = test_app().await;
    app.send(
        "POST",
        "/auth/register",
        None,
        Some(json!({ "username": "ada", "password": "pw" })),
    )
    .await;

    let resp = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": "ada", "password": "wrong" })),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&resp).is_none());

    let resp = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": "nobody", "password": "pw" })),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_body_uses_error_envelope() {
    let app = test_app().await;
    let resp = app
        .send("POST", "/auth/register", None, Some(json!({ "username": "ada" })))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn session_cookie_gates_routes_until_logout() {
    let app = test_app().await;

    let resp = app.send("GET", "/progress", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookie = app.login("ada").await;
    let resp = app.send("GET", "/progress", Some(&cookie), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["completed_topics"], json!([]));

    let resp = app.send("POST", "/auth/logout", Some(&cookie), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app.send("GET", "/progress", Some(&cookie), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forged_cookie_is_rejected() {
    let app = test_app().await;
    app.login("ada").await;
    let forged = format!("tutor_session={}", uuid::Uuid::new_v4());
    let resp = app.send("GET", "/analytics", Some(&forged), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
