//! Shared utilities for integration tests.
//!
//! A mock management backend records every RPC call and answers from a
//! programmable responder; the console under test is started on an
//! ephemeral port pointing at it.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use edge_admin::config::{AdminConfig, AdminCredential};
use edge_admin::lifecycle::Shutdown;
use edge_admin::AdminServer;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const API_KEY: &str = "test-api-key";
pub const ADMIN_ID: i64 = 7;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub service: String,
    pub method: String,
    pub body: Value,
    pub admin_id: Option<String>,
    pub node_id: Option<String>,
    pub request_id: Option<String>,
    pub authorization: Option<String>,
}

impl RecordedCall {
    pub fn is(&self, service: &str, method: &str) -> bool {
        self.service == service && self.method == method
    }
}

type Responder = dyn Fn(&str, &str, &Value) -> Option<(u16, Value)> + Send + Sync;

#[derive(Clone)]
struct BackendState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Arc<Responder>,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockBackend {
    /// Start a backend answering every call with `default_response`.
    pub async fn start() -> Self {
        Self::start_with(|_, _, _| None).await
    }

    /// Start a backend where `responder` may override the default answer.
    pub async fn start_with<F>(responder: F) -> Self
    where
        F: Fn(&str, &str, &Value) -> Option<(u16, Value)> + Send + Sync + 'static,
    {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            calls: calls.clone(),
            responder: Arc::new(responder),
        };

        let app = Router::new()
            .route("/{service}/{method}", post(handle_call))
            .with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, calls }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than operation log writes.
    pub fn business_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.service != "LogService")
            .collect()
    }

    pub fn calls_to(&self, service: &str, method: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.is(service, method))
            .collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.business_calls()
            .iter()
            .map(|c| format!("{}.{}", c.service, c.method))
            .collect()
    }

    /// Wait until the operation log write lands; it follows the response
    /// only by a few instructions.
    pub async fn oplog_entries(&self) -> Vec<RecordedCall> {
        for _ in 0..50 {
            let logs = self.calls_to("LogService", "createLog");
            if !logs.is_empty() {
                return logs;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        Vec::new()
    }
}

async fn handle_call(
    State(state): State<BackendState>,
    Path((service, method)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.calls.lock().unwrap().push(RecordedCall {
        service: service.clone(),
        method: method.clone(),
        body: body.clone(),
        admin_id: header("x-admin-id"),
        node_id: header("x-node-id"),
        request_id: header("x-request-id"),
        authorization: header("authorization"),
    });

    let (status, value) = (state.responder)(&service, &method, &body)
        .unwrap_or_else(|| (200, default_response(&service, &method, &body)));
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(value),
    )
}

/// Plausible answers for the calls the console makes.
pub fn default_response(service: &str, method: &str, body: &Value) -> Value {
    match (service, method) {
        ("ServerService", "findEnabledServer") => json!({
            "server": {"id": body["serverId"], "name": "example.com", "isOn": true}
        }),
        ("ServerService", "findAndInitServerWebConfig") => json!({
            "webJSON": {"id": 100, "isOn": true}
        }),
        ("HTTPLocationService", "findAndInitHTTPLocationWebConfig") => json!({
            "webJSON": {"id": 200, "isOn": true}
        }),
        ("HTTPGzipService", "createHTTPGzip") => json!({"gzipId": 77}),
        ("HTTPWebsocketService", "createHTTPWebsocket") => json!({"websocketId": 88}),
        ("NodeClusterService", "findEnabledNodeCluster") => json!({
            "nodeCluster": {"id": body["nodeClusterId"], "name": "default", "isOn": true}
        }),
        ("NodeService", "countAllEnabledNodesMatch") => json!({"count": 0}),
        ("NodeService", "createNode") => json!({"nodeId": 500}),
        ("NodeService", "findEnabledNode") => json!({
            "node": {
                "id": body["nodeId"],
                "name": "edge-1",
                "isOn": true,
                "ipAddresses": [{"id": 1, "ip": "10.0.0.1", "canAccess": true}]
            }
        }),
        ("NodeIPAddressService", "createNodeIPAddress") => json!({"nodeIPAddressId": 900}),
        _ => json!({}),
    }
}

pub fn test_config(backend: &MockBackend) -> AdminConfig {
    let mut config = AdminConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.rpc.endpoints = vec![backend.endpoint()];
    config.rpc.node_id = "test-node".to_string();
    config.rpc.secret = "test-secret".to_string();
    config.rpc.timeout_secs = 5;
    config.auth.admins = vec![AdminCredential {
        id: ADMIN_ID,
        username: "admin".to_string(),
        api_key: API_KEY.to_string(),
    }];
    config
}

pub struct TestConsole {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    _shutdown: Shutdown,
}

impl TestConsole {
    pub async fn start(backend: &MockBackend) -> Self {
        Self::start_with_config(test_config(backend)).await
    }

    pub async fn start_with_config(config: AdminConfig) -> Self {
        let server = AdminServer::new(config).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, rx).await;
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            addr,
            client,
            _shutdown: shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(API_KEY)
            .send()
            .await
            .unwrap()
    }

    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(API_KEY)
            .form(form)
            .send()
            .await
            .unwrap()
    }

    /// POST the way the console's own scripts do, asking for JSON errors.
    pub async fn post_xhr(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(API_KEY)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(form)
            .send()
            .await
            .unwrap()
    }

    /// POST expecting the JSON envelope.
    pub async fn post_json(&self, path: &str, form: &[(&str, &str)]) -> Value {
        let res = self.post(path, form).await;
        assert_eq!(res.status(), 200, "unexpected status for {}", path);
        res.json().await.unwrap()
    }
}

/// JSON carried by the hidden form input `name` of a rendered page.
pub fn hidden_json(html: &str, name: &str) -> Value {
    let marker = format!("name=\"{}\" value='", name);
    let start = html
        .find(&marker)
        .unwrap_or_else(|| panic!("no hidden input {}", name))
        + marker.len();
    let len = html[start..].find('\'').unwrap();
    serde_json::from_str(&html[start..start + len]).unwrap()
}
