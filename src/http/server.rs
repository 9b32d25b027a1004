//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the shared application state (RPC client, templates, op log)
//! - Freeze the route table into an axum Router
//! - Wire up middleware (request id, tracing, timeout, body limit, headers)
//! - Serve over plain TCP or TLS until shutdown

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::actions::{OpLogWriter, RpcOpLogWriter};
use crate::admin;
use crate::config::AdminConfig;
use crate::http::request::{MakeUuidRequestId, X_REQUEST_ID};
use crate::routing::{RouteError, RouteTable};
use crate::rpc::{RpcClient, TransportBuildError};
use crate::templates::{MiniJinjaEngine, TemplateEngine};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AdminConfig>,
    pub rpc: RpcClient,
    pub templates: Arc<dyn TemplateEngine>,
    pub oplog: Arc<dyn OpLogWriter>,
}

impl AppState {
    pub fn new(config: AdminConfig, rpc: RpcClient) -> Self {
        Self {
            config: Arc::new(config),
            oplog: Arc::new(RpcOpLogWriter::new(rpc.clone())),
            rpc,
            templates: Arc::new(MiniJinjaEngine::new()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("RPC client: {0}")]
    Rpc(#[from] TransportBuildError),

    #[error("route table: {0}")]
    Routes(#[from] RouteError),
}

/// HTTP server for the admin console.
pub struct AdminServer {
    router: Router,
    config: Arc<AdminConfig>,
}

impl AdminServer {
    /// Create a server talking to the configured backend.
    pub fn new(config: AdminConfig) -> Result<Self, ServerError> {
        let rpc = RpcClient::from_config(&config.rpc)?;
        Ok(Self::with_state(AppState::new(config, rpc), admin::routes()?))
    }

    /// Create a server from prepared state and routes.
    pub fn with_state(state: AppState, routes: RouteTable) -> Self {
        let config = state.config.clone();
        let router = Self::build_router(&config, routes, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AdminConfig, routes: RouteTable, state: AppState) -> Router {
        let mut router = routes
            .into_router(state)
            .fallback(not_found)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        if config.security.enable_headers {
            router = router
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("SAMEORIGIN"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("same-origin"),
                ));
        }

        router
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeUuidRequestId))
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Serve plain HTTP on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Admin console listening");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Admin console stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        let grace = Duration::from_secs(self.config.timeouts.request_secs);
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            drain.graceful_shutdown(Some(grace));
        });

        tracing::info!(address = %addr, "Admin console listening (TLS)");
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service_with_connect_info::<SocketAddr>())
            .await?;

        tracing::info!("Admin console stopped");
        Ok(())
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
