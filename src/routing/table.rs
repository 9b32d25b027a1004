//! Route table.
//!
//! Feature areas register their pages in groups sharing a URL prefix and
//! an ordered helper chain:
//!
//! ```ignore
//! table
//!     .group("/clusters/cluster")
//!     .helper(UserMustAuth)
//!     .helper(ClusterHelper)
//!     .get("", IndexAction)
//!     .get_post("/delete", DeleteAction)
//!     .end()?;
//! ```
//!
//! The table is built once at startup and frozen into an axum router.

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use std::any::{type_name, TypeId};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::actions::{Action, ActionContext, ActionError, ActionResult, LogLevel, RawParams};
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::helpers::Helper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMethod {
    Get,
    Post,
}

impl RouteMethod {
    fn filter(self) -> MethodFilter {
        match self {
            RouteMethod::Get => MethodFilter::GET,
            RouteMethod::Post => MethodFilter::POST,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("{method} {path} is already bound to {existing}, cannot bind {new}")]
    Conflict {
        method: RouteMethod,
        path: String,
        existing: &'static str,
        new: &'static str,
    },

    #[error("route group '{0}' registered twice")]
    DuplicatePrefix(String),

    #[error("route group '{0}' must start with an authentication helper")]
    MissingAuthHelper(String),

    #[error("invalid route path '{0}'")]
    InvalidPath(String),
}

/// What an action knows about the route it was reached through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Full URL path.
    pub path: String,
    /// Template rendered on `Show`.
    pub template: String,
}

type HandlerFactory =
    Arc<dyn Fn(Arc<RouteInfo>, Arc<[Arc<dyn Helper>]>) -> MethodRouter<AppState> + Send + Sync>;

struct RouteEntry {
    method: RouteMethod,
    info: Arc<RouteInfo>,
    helpers: Arc<[Arc<dyn Helper>]>,
    action_type: TypeId,
    action_name: &'static str,
    factory: HandlerFactory,
}

struct PendingRoute {
    method: RouteMethod,
    path: String,
    action_type: TypeId,
    action_name: &'static str,
    factory: HandlerFactory,
}

#[derive(Default)]
pub struct RouteTable {
    prefixes: Vec<String>,
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a group of routes under `prefix`.
    pub fn group(&mut self, prefix: &str) -> GroupBuilder<'_> {
        GroupBuilder {
            table: self,
            prefix: prefix.trim_end_matches('/').to_string(),
            public: false,
            helpers: Vec::new(),
            routes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered (method, path) pairs in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (RouteMethod, &str)> {
        self.entries.iter().map(|e| (e.method, e.info.path.as_str()))
    }

    pub fn contains(&self, method: RouteMethod, path: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.method == method && e.info.path == path)
    }

    /// Template the route renders, if registered.
    pub fn template(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.info.path == path)
            .map(|e| e.info.template.as_str())
    }

    /// Freeze the table into an axum router.
    pub fn into_router(self, state: AppState) -> Router {
        let mut paths: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !paths.contains(&entry.info.path) {
                paths.push(entry.info.path.clone());
            }
        }

        let mut router = Router::new();
        for path in paths {
            let method_router = self
                .entries
                .iter()
                .filter(|e| e.info.path == path)
                .fold(MethodRouter::new(), |acc, e| {
                    acc.merge((e.factory)(e.info.clone(), e.helpers.clone()))
                });
            router = router.route(&path, method_router);
        }

        tracing::debug!(routes = self.entries.len(), "Route table frozen");
        router.with_state(state)
    }

    fn commit(
        &mut self,
        prefix: String,
        public: bool,
        helpers: Vec<Arc<dyn Helper>>,
        routes: Vec<PendingRoute>,
    ) -> Result<(), RouteError> {
        if self.prefixes.contains(&prefix) {
            return Err(RouteError::DuplicatePrefix(prefix));
        }
        if !public && !helpers.first().map(|h| h.is_auth()).unwrap_or(false) {
            return Err(RouteError::MissingAuthHelper(prefix));
        }

        let helpers: Arc<[Arc<dyn Helper>]> = helpers.into();
        let mut accepted: Vec<RouteEntry> = Vec::with_capacity(routes.len());
        for route in routes {
            let path = format!("{}{}", prefix, route.path);
            if !path.starts_with('/') || path.contains(['{', '}', '*', ':']) {
                return Err(RouteError::InvalidPath(path));
            }

            let existing = self
                .entries
                .iter()
                .chain(accepted.iter())
                .find(|e| e.method == route.method && e.info.path == path);
            if let Some(existing) = existing {
                if existing.action_type == route.action_type {
                    continue;
                }
                return Err(RouteError::Conflict {
                    method: route.method,
                    path,
                    existing: existing.action_name,
                    new: route.action_name,
                });
            }

            let template = template_name(&prefix, &route.path);
            accepted.push(RouteEntry {
                method: route.method,
                info: Arc::new(RouteInfo { path, template }),
                helpers: helpers.clone(),
                action_type: route.action_type,
                action_name: route.action_name,
                factory: route.factory,
            });
        }

        self.prefixes.push(prefix);
        self.entries.extend(accepted);
        Ok(())
    }
}

/// Builder for one route group; nothing is registered until `end`.
pub struct GroupBuilder<'a> {
    table: &'a mut RouteTable,
    prefix: String,
    public: bool,
    helpers: Vec<Arc<dyn Helper>>,
    routes: Vec<PendingRoute>,
}

impl<'a> GroupBuilder<'a> {
    /// Allow the group without an authentication helper.
    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }

    /// Append a helper; helpers run in the order added.
    pub fn helper<H: Helper>(mut self, helper: H) -> Self {
        self.helpers.push(Arc::new(helper));
        self
    }

    pub fn get<A: Action>(self, path: &str, action: A) -> Self {
        self.bind(&[RouteMethod::Get], path, Arc::new(action))
    }

    pub fn post<A: Action>(self, path: &str, action: A) -> Self {
        self.bind(&[RouteMethod::Post], path, Arc::new(action))
    }

    pub fn get_post<A: Action>(self, path: &str, action: A) -> Self {
        self.bind(&[RouteMethod::Get, RouteMethod::Post], path, Arc::new(action))
    }

    /// Register the group.
    pub fn end(self) -> Result<(), RouteError> {
        let GroupBuilder {
            table,
            prefix,
            public,
            helpers,
            routes,
        } = self;
        table.commit(prefix, public, helpers, routes)
    }

    fn bind<A: Action>(mut self, methods: &[RouteMethod], path: &str, action: Arc<A>) -> Self {
        for &method in methods {
            let action = action.clone();
            let factory: HandlerFactory = Arc::new(move |info, helpers| {
                let action = action.clone();
                let handler = move |State(state): State<AppState>, request: Request<Body>| {
                    let action = action.clone();
                    let info = info.clone();
                    let helpers = helpers.clone();
                    async move { dispatch(action, info, helpers, state, request).await }
                };
                on(method.filter(), handler)
            });
            self.routes.push(PendingRoute {
                method,
                path: path.to_string(),
                action_type: TypeId::of::<A>(),
                action_name: type_name::<A>(),
                factory,
            });
        }
        self
    }
}

/// `prefix + path + ".html"`; the empty path maps to `index`.
pub fn template_name(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_start_matches('/');
    if path.is_empty() {
        format!("{}/index.html", prefix)
    } else {
        format!("{}{}.html", prefix, path)
    }
}

async fn dispatch<A: Action>(
    action: Arc<A>,
    info: Arc<RouteInfo>,
    helpers: Arc<[Arc<dyn Helper>]>,
    state: AppState,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();

    let client_ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default();

    let is_form = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false);

    let body = match axum::body::to_bytes(body, state.config.security.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let err = ActionError::Body(e.to_string());
            metrics::record_action(&info.path, method.as_str(), err.outcome(), start);
            return response::error_response(&state, &parts.headers, &err);
        }
    };

    let form_body = if method == Method::POST && is_form {
        Some(body.as_ref())
    } else {
        None
    };
    let params = match RawParams::parse(parts.uri.query(), form_body) {
        Ok(params) => params,
        Err(err) => {
            metrics::record_action(&info.path, method.as_str(), err.outcome(), start);
            return response::error_response(&state, &parts.headers, &err);
        }
    };

    let mut ctx = ActionContext::new(
        state,
        info.clone(),
        method.clone(),
        parts.headers,
        client_ip,
        params,
    );
    let result = run_action(action.as_ref(), &helpers, &mut ctx).await;
    ctx.flush_log().await;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    let response = response::render(&ctx, result);
    metrics::record_action(&info.path, method.as_str(), outcome, start);
    response
}

async fn run_action<A: Action>(
    action: &A,
    helpers: &[Arc<dyn Helper>],
    ctx: &mut ActionContext,
) -> ActionResult {
    for helper in helpers {
        helper.before_action(ctx).await?;
    }

    action.init(ctx);

    if ctx.is_get() {
        let params = ctx.params().decode::<A::GetParams>()?;
        action.run_get(ctx, params).await
    } else if *ctx.method() == Method::POST {
        let params = match ctx.params().decode::<A::PostParams>() {
            Ok(params) => params,
            Err(err) => {
                // writes are audited even when their input is rejected
                let description = format!("rejected parameters of {}", ctx.route().path);
                ctx.create_log(LogLevel::Warn, description);
                return Err(err);
            }
        };
        action.run_post(ctx, params).await
    } else {
        Err(ActionError::MethodNotAllowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::NoParams;
    use async_trait::async_trait;

    struct Auth;

    #[async_trait]
    impl Helper for Auth {
        fn name(&self) -> &'static str {
            "auth"
        }

        fn is_auth(&self) -> bool {
            true
        }

        async fn before_action(&self, _ctx: &mut ActionContext) -> Result<(), ActionError> {
            Ok(())
        }
    }

    struct Loader;

    #[async_trait]
    impl Helper for Loader {
        fn name(&self) -> &'static str {
            "loader"
        }

        async fn before_action(&self, _ctx: &mut ActionContext) -> Result<(), ActionError> {
            Ok(())
        }
    }

    struct PageA;
    struct PageB;

    impl Action for PageA {
        type GetParams = NoParams;
        type PostParams = NoParams;
    }

    impl Action for PageB {
        type GetParams = NoParams;
        type PostParams = NoParams;
    }

    #[test]
    fn test_group_registration() {
        let mut table = RouteTable::new();
        table
            .group("/clusters/cluster")
            .helper(Auth)
            .helper(Loader)
            .get("", PageA)
            .get_post("/delete", PageB)
            .end()
            .unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.contains(RouteMethod::Get, "/clusters/cluster"));
        assert!(table.contains(RouteMethod::Post, "/clusters/cluster/delete"));
        assert!(!table.contains(RouteMethod::Post, "/clusters/cluster"));
        assert_eq!(
            table.template("/clusters/cluster"),
            Some("clusters/cluster/index.html")
        );
        assert_eq!(
            table.template("/clusters/cluster/delete"),
            Some("clusters/cluster/delete.html")
        );
    }

    #[test]
    fn test_same_action_twice_is_idempotent() {
        let mut table = RouteTable::new();
        table
            .group("/servers")
            .helper(Auth)
            .get("/server", PageA)
            .end()
            .unwrap();
        table
            .group("/servers/server")
            .helper(Auth)
            .get("", PageA)
            .end()
            .unwrap();

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_different_action_conflicts() {
        let mut table = RouteTable::new();
        table.group("/a").helper(Auth).get("/b", PageA).end().unwrap();

        let err = table.group("/a/b").helper(Auth).get("", PageB).end().unwrap_err();
        match err {
            RouteError::Conflict { method, path, .. } => {
                assert_eq!(method, RouteMethod::Get);
                assert_eq!(path, "/a/b");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_conflict_inside_group() {
        let mut table = RouteTable::new();
        let err = table
            .group("/a")
            .helper(Auth)
            .get("/x", PageA)
            .get("/x", PageB)
            .end()
            .unwrap_err();
        assert!(matches!(err, RouteError::Conflict { .. }));
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_prefix() {
        let mut table = RouteTable::new();
        table.group("/a").helper(Auth).get("", PageA).end().unwrap();
        let err = table.group("/a/").helper(Auth).get("/x", PageB).end().unwrap_err();
        assert_eq!(err, RouteError::DuplicatePrefix("/a".to_string()));
    }

    #[test]
    fn test_auth_helper_must_come_first() {
        let mut table = RouteTable::new();
        let err = table.group("/a").get("", PageA).end().unwrap_err();
        assert_eq!(err, RouteError::MissingAuthHelper("/a".to_string()));

        let err = table
            .group("/b")
            .helper(Loader)
            .helper(Auth)
            .get("", PageA)
            .end()
            .unwrap_err();
        assert_eq!(err, RouteError::MissingAuthHelper("/b".to_string()));

        table.group("/health").public().get("", PageA).end().unwrap();
        assert!(table.contains(RouteMethod::Get, "/health"));
    }

    #[test]
    fn test_template_name() {
        assert_eq!(
            template_name("/servers/server/settings/gzip", ""),
            "servers/server/settings/gzip/index.html"
        );
        assert_eq!(
            template_name("/clusters/cluster", "/node/logs"),
            "clusters/cluster/node/logs.html"
        );
    }
}
