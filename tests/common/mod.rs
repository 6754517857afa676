//! Shared utilities for integration tests: a mock Firebase (token endpoint +
//! Realtime Database REST) and a bridge bound to an ephemeral port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use firebase_bridge::{BridgeConfig, HttpServer, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const TEST_TOKEN: &str = "test-access-token";
pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/service_account_key.pem");

#[derive(Clone)]
struct MockState {
    tree: Arc<Value>,
    token_requests: Arc<AtomicUsize>,
    data_requests: Arc<AtomicUsize>,
}

/// Handle on a running mock Firebase.
pub struct MockFirebase {
    pub addr: SocketAddr,
    token_requests: Arc<AtomicUsize>,
    data_requests: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockFirebase {
    pub fn db_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn token_uri(&self) -> String {
        format!("http://{}/token", self.addr)
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    pub fn data_requests(&self) -> usize {
        self.data_requests.load(Ordering::SeqCst)
    }

    /// Service account JSON pointing at this mock's token endpoint.
    pub fn service_account_json(&self) -> String {
        json!({
            "type": "service_account",
            "project_id": "bridge-test",
            "client_email": "bridge@bridge-test.iam.gserviceaccount.com",
            "private_key": TEST_PRIVATE_KEY,
            "token_uri": self.token_uri(),
        })
        .to_string()
    }

    /// Bridge configuration wired to this mock.
    pub fn bridge_config(&self) -> BridgeConfig {
        let mut config = BridgeConfig::default();
        config.firebase.db_url = Some(self.db_url());
        config.firebase.service_account_json = Some(self.service_account_json());
        config.firebase.request_timeout_secs = 5;
        config
    }
}

async fn token(
    State(state): State<MockState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.token_requests.fetch_add(1, Ordering::SeqCst);

    let grant_ok = form.get("grant_type").map(String::as_str)
        == Some("urn:ietf:params:oauth:grant-type:jwt-bearer");
    let assertion_ok = form
        .get("assertion")
        .map(|a| a.split('.').count() == 3)
        .unwrap_or(false);

    if !(grant_ok && assertion_ok) {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_grant"}))).into_response();
    }

    Json(json!({
        "access_token": TEST_TOKEN,
        "expires_in": 3599,
        "token_type": "Bearer"
    }))
    .into_response()
}

async fn data(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(path): Path<String>,
) -> Response {
    state.data_requests.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TEST_TOKEN))
        .unwrap_or(false);
    if !authorized || path.starts_with("Forbidden") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Permission denied"})),
        )
            .into_response();
    }

    let Some(node) = path.strip_suffix(".json") else {
        return (StatusCode::BAD_REQUEST, "expected .json").into_response();
    };
    let pointer = format!("/{}", node);
    let value = state.tree.pointer(&pointer).cloned().unwrap_or(Value::Null);
    Json(value).into_response()
}

/// Start a mock Firebase serving `tree` on an ephemeral port.
pub async fn start_mock_firebase(tree: Value) -> MockFirebase {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = MockState {
        tree: Arc::new(tree),
        token_requests: Arc::new(AtomicUsize::new(0)),
        data_requests: Arc::new(AtomicUsize::new(0)),
    };
    let mock = MockFirebase {
        addr,
        token_requests: state.token_requests.clone(),
        data_requests: state.data_requests.clone(),
    };

    let app = Router::new()
        .route("/token", post(token))
        .route("/{*path}", get(data))
        .with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    mock
}

/// Start the bridge with `config` on an ephemeral port.
pub async fn start_bridge(config: BridgeConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
