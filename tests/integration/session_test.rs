//! Integration tests for session lookup, logout and health endpoints.

mod helpers;

use http::{StatusCode, header};

use helpers::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_session_returns_username_from_cookie() {
    let app = TestApp::new().await;
    let cookie = format!("token={}", app.token("dana"));

    let response = app.request("GET", "/app/chat/api/session", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "username": "dana" }));
    assert!(
        response.headers[header::CACHE_CONTROL]
            .to_str()
            .expect("ascii header")
            .contains("no-store")
    );
}

#[tokio::test]
async fn test_session_with_expired_cookie_is_unauthorized() {
    let app = TestApp::new().await;
    let cookie = format!("token={}", app.expired_token("dana"));

    let response = app.request("GET", "/app/chat/api/session", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Token has expired");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/app/chat/api/logout", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let set_cookie = response.headers[header::SET_COOKIE]
        .to_str()
        .expect("ascii header");
    assert!(set_cookie.contains("Path=/app/chat/"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_requires_post() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/app/chat/api/logout", None).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
