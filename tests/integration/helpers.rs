//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use futures::{SinkExt, StreamExt};
use http::{Request, StatusCode, header};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tower::ServiceExt;

use chathub_api::AppState;
use chathub_auth::JwtEncoder;
use chathub_core::config::AppConfig;

/// How long a test waits for any single frame.
pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration used by every integration test.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.server.shutdown_grace_seconds = 1;
    config
}

/// Test application context: the real app served on an ephemeral port.
pub struct TestApp {
    /// The Axum router for in-process requests
    pub router: Router,
    /// Shared state behind the running server
    pub state: AppState,
    /// Application config
    pub config: AppConfig,
    /// Address the server listens on
    pub addr: SocketAddr,
    encoder: JwtEncoder,
    shutdown: Option<oneshot::Sender<()>>,
    server: Option<tokio::task::JoinHandle<()>>,
}

impl TestApp {
    /// Create a new test application with the default test config
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a new test application with a custom config
    pub async fn with_config(config: AppConfig) -> Self {
        config.validate().expect("Invalid test config");

        let state = AppState::with_jwt(config.clone());
        let router = chathub_api::build_app(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        let served = state.clone();
        let server = tokio::spawn(async move {
            let signal = async move {
                let _ = shutdown_rx.await;
            };
            chathub_api::app::serve(listener, served, signal, grace)
                .await
                .expect("Server failed");
        });

        Self {
            router,
            state,
            encoder: JwtEncoder::new(&config.auth),
            config,
            addr,
            shutdown: Some(shutdown_tx),
            server: Some(server),
        }
    }

    /// Mint a valid credential token
    pub fn token(&self, username: &str) -> String {
        self.encoder
            .issue(&format!("id-{username}"), username)
            .expect("Failed to issue token")
            .token
    }

    /// Mint a token that expired a minute ago
    pub fn expired_token(&self, username: &str) -> String {
        self.encoder
            .issue_with_ttl(&format!("id-{username}"), username, chrono::Duration::minutes(-1))
            .expect("Failed to issue token")
            .token
    }

    /// WebSocket URL of the upgrade endpoint
    pub fn ws_url(&self) -> String {
        format!("ws://{}/app/chat/ws", self.addr)
    }

    /// Connect with a query-string token and expect success
    pub async fn connect(&self, token: &str) -> WsClient {
        self.try_connect(Some(token), None)
            .await
            .expect("WebSocket upgrade failed")
    }

    /// Attempt an upgrade with optional query and cookie tokens
    pub async fn try_connect(
        &self,
        query_token: Option<&str>,
        cookie_token: Option<&str>,
    ) -> Result<WsClient, tungstenite::Error> {
        let url = match query_token {
            Some(token) => format!("{}?token={}", self.ws_url(), token),
            None => self.ws_url(),
        };
        let mut request = url.into_client_request()?;
        if let Some(token) = cookie_token {
            request.headers_mut().insert(
                header::COOKIE,
                format!("token={token}").parse().expect("Invalid cookie header"),
            );
        }

        let (stream, _) = tokio_tungstenite::connect_async(request).await?;
        Ok(WsClient { stream })
    }

    /// Send an in-process request through the router
    pub async fn request(&self, method: &str, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Trigger graceful shutdown and wait for the server to stop
    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(server) = self.server.take() {
            server.await.expect("Server task panicked");
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

/// A WebSocket client connected to the test server.
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Send a text frame
    pub async fn send_text(&mut self, text: &str) {
        self.stream
            .send(Message::text(text))
            .await
            .expect("Failed to send text");
    }

    /// Send the application-level heartbeat
    pub async fn send_ping(&mut self) {
        self.send_text(r#"{"type":"ping"}"#).await;
    }

    /// Next frame of any kind, or `None` when the stream ends
    pub async fn next_frame(&mut self) -> Option<Message> {
        match tokio::time::timeout(RECV_TIMEOUT, self.stream.next()).await {
            Ok(Some(Ok(message))) => Some(message),
            Ok(Some(Err(_))) | Ok(None) => None,
            Err(_) => panic!("Timed out waiting for a frame"),
        }
    }

    /// Next JSON text message, skipping transport pings and pongs
    pub async fn next_json(&mut self) -> Value {
        loop {
            match self.next_frame().await {
                Some(Message::Text(text)) => {
                    return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
                }
                Some(Message::Ping(_)) | Some(Message::Pong(_)) => continue,
                other => panic!("Expected a text frame, got {other:?}"),
            }
        }
    }

    /// Assert the next message is a presence snapshot listing `users`
    pub async fn expect_users(&mut self, users: &[&str]) {
        let message = self.next_json().await;
        assert_eq!(
            message,
            serde_json::json!({ "type": "users", "users": users }),
            "unexpected presence snapshot"
        );
    }

    /// Assert the next message is a chat line
    pub async fn expect_chat(&mut self, username: &str, content: &str) {
        let message = self.next_json().await;
        assert_eq!(
            message,
            serde_json::json!({ "type": "chat", "username": username, "content": content }),
            "unexpected chat message"
        );
    }

    /// Wait until the server closes the connection
    pub async fn expect_closed(&mut self) {
        loop {
            match self.next_frame().await {
                None | Some(Message::Close(_)) => return,
                Some(Message::Ping(_)) | Some(Message::Pong(_)) => continue,
                Some(Message::Text(_)) => continue,
                other => panic!("Expected close, got {other:?}"),
            }
        }
    }

    /// Close the connection from the client side
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
