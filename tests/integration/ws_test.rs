//! Integration tests for the WebSocket upgrade, fan-out, presence and heartbeat.

mod helpers;

use std::time::Duration;

use http::StatusCode;
use tokio_tungstenite::tungstenite;

use helpers::{TestApp, test_config};

fn rejected_status(result: Result<helpers::WsClient, tungstenite::Error>) -> StatusCode {
    match result {
        Err(tungstenite::Error::Http(response)) => response.status(),
        Err(other) => panic!("Expected an HTTP rejection, got {other:?}"),
        Ok(_) => panic!("Upgrade unexpectedly succeeded"),
    }
}

#[tokio::test]
async fn test_presence_grows_and_chat_fans_out() {
    let app = TestApp::new().await;

    let mut a = app.connect(&app.token("A")).await;
    a.expect_users(&["A"]).await;

    let mut b = app.connect(&app.token("B")).await;
    a.expect_users(&["A", "B"]).await;
    b.expect_users(&["A", "B"]).await;

    let mut c = app.connect(&app.token("C")).await;
    a.expect_users(&["A", "B", "C"]).await;
    b.expect_users(&["A", "B", "C"]).await;
    c.expect_users(&["A", "B", "C"]).await;

    a.send_text("hello").await;
    a.expect_chat("A", "hello").await;
    b.expect_chat("A", "hello").await;
    c.expect_chat("A", "hello").await;

    c.close().await;
    a.expect_users(&["A", "B"]).await;
    b.expect_users(&["A", "B"]).await;
}

#[tokio::test]
async fn test_chat_content_relayed_verbatim() {
    let app = TestApp::new().await;
    let mut a = app.connect(&app.token("A")).await;
    a.expect_users(&["A"]).await;

    let raw = r#"{"type":"chat","content":"not unwrapped"}"#;
    a.send_ping().await;
    a.send_text(raw).await;

    // The heartbeat is never relayed; the next message is the chat line.
    a.expect_chat("A", raw).await;
}

#[tokio::test]
async fn test_upgrade_rejected_without_token() {
    let app = TestApp::new().await;

    let status = rejected_status(app.try_connect(None, None).await);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected_and_not_registered() {
    let app = TestApp::new().await;

    let status = rejected_status(app.try_connect(Some(&app.expired_token("late")), None).await);
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let members = app.state.realtime.members().await.expect("hub running");
    assert!(members.is_empty());
}

#[tokio::test]
async fn test_forged_token_rejected() {
    let app = TestApp::new().await;
    let mut other = test_config();
    other.auth.jwt_secret = "some-other-secret".to_string();
    let forged = chathub_auth::JwtEncoder::new(&other.auth)
        .issue("x", "mallory")
        .expect("issue")
        .token;

    let status = rejected_status(app.try_connect(Some(&forged), None).await);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cookie_token_used_when_query_invalid() {
    let app = TestApp::new().await;

    let mut client = app
        .try_connect(Some("not-a-token"), Some(&app.token("cookie-user")))
        .await
        .expect("Cookie token should be accepted");

    client.expect_users(&["cookie-user"]).await;
}

#[tokio::test]
async fn test_silent_client_evicted_by_heartbeat() {
    let mut config = test_config();
    config.realtime.ping_interval_seconds = 1;
    config.realtime.read_timeout_seconds = 2;
    let app = TestApp::with_config(config).await;

    let mut live = app.connect(&app.token("live")).await;
    live.expect_users(&["live"]).await;

    // Never read from or written to after the upgrade.
    let _silent = app.connect(&app.token("silent")).await;
    live.expect_users(&["live", "silent"]).await;

    let mut keepalive = tokio::time::interval(Duration::from_millis(500));
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        assert!(tokio::time::Instant::now() < deadline, "silent client was never evicted");
        tokio::select! {
            _ = keepalive.tick() => live.send_ping().await,
            message = live.next_json() => {
                if message == serde_json::json!({ "type": "users", "users": ["live"] }) {
                    break;
                }
            }
        }
    }

    let members = app.state.realtime.members().await.expect("hub running");
    assert_eq!(members.users, vec!["live".to_string()]);
}

#[tokio::test]
async fn test_shutdown_closes_connections() {
    let mut app = TestApp::new().await;
    let mut a = app.connect(&app.token("A")).await;
    a.expect_users(&["A"]).await;

    app.shutdown().await;

    a.expect_closed().await;
    assert!(app.state.realtime.members().await.is_err());
}

#[tokio::test]
async fn test_detailed_health_counts_members() {
    let app = TestApp::new().await;
    let mut a = app.connect(&app.token("A")).await;
    a.expect_users(&["A"]).await;

    let response = app.request("GET", "/api/health/detailed", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["members"], 1);
    assert_eq!(response.body["users"], serde_json::json!(["A"]));
    assert_eq!(response.body["metrics"]["connections_total"], 1);
}
