//! Per-request action state.

use axum::http::{HeaderMap, Method};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::actions::error::{ActionResponse, ActionResult};
use crate::actions::oplog::{LogLevel, OpLogEntry};
use crate::actions::params::RawParams;
use crate::config::AdminConfig;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::routing::RouteInfo;
use crate::rpc::{CallContext, RpcClient};

/// The authenticated administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminContext {
    pub id: i64,
    pub username: String,
}

/// Menu selection rendered by the layout.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nav {
    pub menu: String,
    pub tab: String,
    pub first_menu: String,
    pub second_menu: String,
    pub tiny_menu: String,
}

pub struct ActionContext {
    state: AppState,
    route: Arc<RouteInfo>,
    method: Method,
    headers: HeaderMap,
    client_ip: String,
    params: RawParams,
    admin: Option<AdminContext>,
    data: Map<String, Value>,
    nav: Nav,
    pending_log: Option<(LogLevel, String)>,
}

impl ActionContext {
    pub fn new(
        state: AppState,
        route: Arc<RouteInfo>,
        method: Method,
        headers: HeaderMap,
        client_ip: String,
        params: RawParams,
    ) -> Self {
        Self {
            state,
            route,
            method,
            headers,
            client_ip,
            params,
            admin: None,
            data: Map::new(),
            nav: Nav::default(),
            pending_log: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &AdminConfig {
        &self.state.config
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.state.rpc
    }

    pub fn route(&self) -> &RouteInfo {
        &self.route
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET || self.method == Method::HEAD
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn client_ip(&self) -> &str {
        &self.client_ip
    }

    pub fn params(&self) -> &RawParams {
        &self.params
    }

    pub fn param_i64(&self, name: &str) -> i64 {
        self.params.get_i64(name)
    }

    pub fn set_admin(&mut self, admin: AdminContext) {
        self.admin = Some(admin);
    }

    /// Metadata for backend calls made on behalf of the current admin.
    pub fn admin_context(&self) -> CallContext {
        CallContext {
            admin_id: self.admin.as_ref().map(|a| a.id).unwrap_or(0),
            request_id: request_id(&self.headers),
        }
    }

    /// Select the top menu, tab and first-level menu.
    pub fn nav(&mut self, menu: &str, tab: &str, first_menu: &str) {
        self.nav.menu = menu.to_string();
        self.nav.tab = tab.to_string();
        self.nav.first_menu = first_menu.to_string();
    }

    pub fn second_menu(&mut self, item: &str) {
        self.nav.second_menu = item.to_string();
    }

    pub fn tiny_menu(&mut self, item: &str) {
        self.nav.tiny_menu = item.to_string();
    }

    /// Expose a value to the template or the JSON response.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize view data");
                Value::Null
            }
        };
        self.data.insert(key.to_string(), value);
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Record an operation log entry, written after the action finishes.
    pub fn create_log(&mut self, level: LogLevel, description: impl Into<String>) {
        self.pending_log = Some((level, description.into()));
    }

    pub fn show(&self) -> ActionResult {
        Ok(ActionResponse::Show)
    }

    pub fn success(&self) -> ActionResult {
        Ok(ActionResponse::Success)
    }

    /// Write the pending operation log entry, if any. Failures only warn.
    pub async fn flush_log(&mut self) {
        let Some((level, description)) = self.pending_log.take() else {
            return;
        };
        let entry = OpLogEntry {
            level,
            description,
            action: self.route.path.clone(),
            ip: self.client_ip.clone(),
        };
        let call = self.admin_context();
        if let Err(e) = self.state.oplog.write(&call, &entry).await {
            tracing::warn!(error = %e, action = %entry.action, "Failed to write operation log");
        }
    }

    /// Template context: the collected data plus layout values.
    pub fn view_data(&self) -> Value {
        let mut view = self.data.clone();
        view.insert(
            "nav".to_string(),
            serde_json::to_value(&self.nav).unwrap_or(Value::Null),
        );
        view.insert(
            "productName".to_string(),
            Value::String(self.config().ui.product_name.clone()),
        );
        view.insert(
            "admin".to_string(),
            serde_json::to_value(&self.admin).unwrap_or(Value::Null),
        );
        Value::Object(view)
    }
}
