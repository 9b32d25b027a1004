//! Client side of the management backend RPC.
//!
//! # Data Flow
//! ```text
//! action
//!     → RpcClient::<service>_rpc().<method>(ctx, &request)
//!     → invoke (encode request, record metrics)
//!     → RpcTransport::call (one round trip, endpoint chosen round-robin)
//!     → decode response
//! ```
//!
//! # Design Decisions
//! - One blocking round trip per call; no retry, no rollback
//! - Transport is a trait so tests and alternative carriers can plug in
//! - The HTTP client pool is the only shared resource

pub mod endpoints;
pub mod error;
pub mod pb;
pub mod services;
pub mod transport;

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::config::RpcConfig;
use crate::observability::metrics;

pub use error::{RpcError, TransportBuildError};
pub use services::*;
pub use transport::{CallContext, HttpTransport, RpcTransport};

/// Cheap to clone handle on the backend.
#[derive(Clone)]
pub struct RpcClient {
    transport: Arc<dyn RpcTransport>,
}

impl RpcClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// Build a client speaking JSON over HTTP to the configured endpoints.
    pub fn from_config(config: &RpcConfig) -> Result<Self, TransportBuildError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    pub(crate) async fn invoke<Req, Resp>(
        &self,
        ctx: &CallContext,
        service: &'static str,
        method: &'static str,
        request: &Req,
    ) -> Result<Resp, RpcError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_value(request).map_err(|source| RpcError::Encode {
            service,
            method,
            source,
        })?;

        let start = Instant::now();
        tracing::debug!(service, method, admin_id = ctx.admin_id, "RPC call");
        let result = self.transport.call(ctx, service, method, body).await;
        metrics::record_rpc_call(service, method, result.is_ok(), start);

        serde_json::from_value(result?).map_err(|source| RpcError::Decode {
            service,
            method,
            source,
        })
    }
}
