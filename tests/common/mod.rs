use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode as AxumStatus};
use axum::routing::post;
use axum::Router;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use formrelay::config::Config;
use formrelay::credentials::Credentials;
use formrelay::state::SharedState;

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_SECRET: &str = "test-secret";

/// A request captured by the mock upstream.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub raw: Bytes,
    pub body: Value,
}

/// In-process stand-in for the evaluation API.
#[derive(Clone)]
pub struct MockUpstream {
    status: u16,
    body: String,
    received: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockUpstream {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn received(&self) -> Vec<CapturedRequest> {
        self.received.lock().unwrap().clone()
    }

    /// Serve on a random port, return the evaluations URL.
    pub async fn serve(self) -> String {
        let app = Router::new()
            .route("/v1/evaluations", post(mock_evaluations))
            .with_state(self);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock upstream failed");
        });

        format!("http://{addr}/v1/evaluations")
    }
}

async fn mock_evaluations(
    State(mock): State<MockUpstream>,
    headers: HeaderMap,
    raw: Bytes,
) -> (AxumStatus, [(&'static str, &'static str); 1], String) {
    let body = serde_json::from_slice(&raw).unwrap_or(Value::Null);
    mock.received
        .lock()
        .unwrap()
        .push(CapturedRequest { headers, raw, body });

    (
        AxumStatus::from_u16(mock.status).unwrap(),
        [("content-type", "application/json")],
        mock.body.clone(),
    )
}

/// A running relay instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON submission, return (body, status).
    pub async fn submit(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit"))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST raw JSON text as a submission, return (body, status).
    pub async fn submit_text(&self, text: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit"))
            .header("content-type", "application/json")
            .body(text.to_string())
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// GET the submission log.
    pub async fn submissions(&self) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url("/"))
            .send()
            .await
            .expect("log request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config(upstream_url: String) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        upstream_url,
        credentials: Credentials::new(TEST_TOKEN, TEST_SECRET),
        upstream_timeout: Some(std::time::Duration::from_secs(5)),
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
    }
}

/// Spawn the relay in front of a mock upstream.
pub async fn spawn_app(upstream: &MockUpstream) -> TestApp {
    let url = upstream.clone().serve().await;
    spawn_with_config(test_config(url)).await
}

/// Spawn the relay pointed at a port nothing listens on.
pub async fn spawn_app_unreachable() -> TestApp {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    spawn_with_config(test_config(format!("http://{addr}/v1/evaluations"))).await
}

pub async fn spawn_with_config(config: Config) -> TestApp {
    let (app, state) = formrelay::build_app(config).expect("Failed to build app");

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        state,
    }
}
