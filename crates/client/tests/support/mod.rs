#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use client::ApiClient;
use configs::ApiConfig;
use models::auth::AuthTokens;
use serde_json::{json, Value};
use service::SessionStore;

pub const TENANT_ID: &str = "3fae1c2a-7b4d-4c1e-9a2f-0123456789ab";

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    json: bool,
}

/// In-process stand-in for the admin API: canned answers per
/// `(method, path)` plus a log of every request received.
#[derive(Clone, Default)]
pub struct StubBackend {
    routes: Arc<Mutex<HashMap<(Method, String), Canned>>>,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn put(&self, method: Method, path: &str, canned: Canned) -> &Self {
        self.routes.lock().unwrap().insert((method, path.to_string()), canned);
        self
    }

    pub fn json(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.put(method, path, Canned { status, body: body.to_string(), json: true })
    }

    pub fn text(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.put(method, path, Canned { status, body: body.to_string(), json: false })
    }

    pub fn no_content(&self, method: Method, path: &str) -> &Self {
        self.put(method, path, Canned { status: StatusCode::NO_CONTENT, body: String::new(), json: false })
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }

    /// Bind `127.0.0.1:0`, serve in the background, return the base URL.
    pub async fn serve(&self) -> anyhow::Result<String> {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(format!("http://{addr}"))
    }
}

async fn handle(State(stub): State<StubBackend>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, 1 << 20).await.unwrap_or_default();
    stub.seen.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers.clone(),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    let canned = stub.routes.lock().unwrap().get(&(parts.method, parts.uri.path().to_string())).cloned();
    match canned {
        Some(c) if c.json => (c.status, [(header::CONTENT_TYPE, "application/json")], c.body).into_response(),
        Some(c) => (c.status, c.body).into_response(),
        None => (StatusCode::NOT_FOUND, "no stub for route").into_response(),
    }
}

pub fn client(base_url: &str, session: Arc<dyn SessionStore>) -> ApiClient {
    ApiClient::new(&ApiConfig::with_base_url(base_url), session).unwrap()
}

pub fn tokens() -> AuthTokens {
    AuthTokens { access_token: "access-123".into(), refresh_token: "refresh-456".into() }
}

pub fn tokens_json() -> Value {
    json!({"access_token": "access-123", "refresh_token": "refresh-456"})
}

pub fn tenant_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "slug": name.to_lowercase(),
        "isolation_level": "schema",
        "status": "active",
        "created_at": "2026-03-01T10:00:00Z",
        "updated_at": "2026-03-02T10:00:00Z",
        "storage_used_bytes": 4096,
        "last_activity": "2026-03-03T10:00:00Z"
    })
}

pub fn series_json(label: &str) -> Value {
    json!({
        "label": label,
        "data": [
            {"timestamp": "2026-03-01T10:00:00Z", "value": 12.5},
            {"timestamp": "2026-03-01T11:00:00Z", "value": 14.0}
        ]
    })
}

pub fn metrics_json() -> Value {
    json!({
        "query_latency_p50": series_json("p50"),
        "query_latency_p95": series_json("p95"),
        "query_latency_p99": series_json("p99"),
        "error_rate": series_json("errors"),
        "throughput": series_json("qps")
    })
}
