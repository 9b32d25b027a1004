//! RPC transport.
//!
//! Every call is one `POST {endpoint}/{Service}/{method}` with a JSON body.
//! The node id and secret identify this console to the backend; the admin
//! id travels with each call so the backend can authorize and audit it.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::RpcConfig;
use crate::rpc::endpoints::EndpointSelector;
use crate::rpc::error::{RpcError, TransportBuildError};

/// Per-call metadata.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    pub admin_id: i64,
    pub request_id: Option<String>,
}

/// Carries one encoded request to the backend and returns its decoded body.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(
        &self,
        ctx: &CallContext,
        service: &'static str,
        method: &'static str,
        body: Value,
    ) -> Result<Value, RpcError>;
}

#[derive(Deserialize)]
struct BackendErrorBody {
    message: String,
}

/// JSON-over-HTTP transport backed by a pooled reqwest client.
pub struct HttpTransport {
    client: Client,
    endpoints: EndpointSelector,
    node_id: String,
    secret: String,
}

impl HttpTransport {
    pub fn new(config: &RpcConfig) -> Result<Self, TransportBuildError> {
        let endpoints = EndpointSelector::new(&config.endpoints)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .no_proxy()
            .build()?;

        tracing::info!(
            endpoints = ?endpoints.all().iter().map(|u| u.as_str()).collect::<Vec<_>>(),
            node_id = %config.node_id,
            "RPC transport ready"
        );

        Ok(Self {
            client,
            endpoints,
            node_id: config.node_id.clone(),
            secret: config.secret.clone(),
        })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(
        &self,
        ctx: &CallContext,
        service: &'static str,
        method: &'static str,
        body: Value,
    ) -> Result<Value, RpcError> {
        let url = format!("{}{}/{}", self.endpoints.next(), service, method);

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.secret)
            .header("x-node-id", &self.node_id)
            .header("x-admin-id", ctx.admin_id.to_string())
            .json(&body);
        if let Some(request_id) = &ctx.request_id {
            request = request.header("x-request-id", request_id);
        }

        let response = request
            .send()
            .await
            .map_err(|source| RpcError::Transport {
                service,
                method,
                source,
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| RpcError::Transport {
                service,
                method,
                source,
            })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<BackendErrorBody>(&bytes)
                .map(|b| b.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            tracing::warn!(
                service,
                method,
                status = %status,
                message = %message,
                "RPC call rejected by backend"
            );
            return Err(RpcError::Status {
                service,
                method,
                status: status.as_u16(),
                message,
            });
        }

        if bytes.is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_slice(&bytes).map_err(|source| RpcError::Decode {
            service,
            method,
            source,
        })
    }
}
