//! Operation log.
//!
//! Mutating actions announce what they are about to do with
//! `ActionContext::create_log`. The entry is written once the action has
//! finished, whatever its outcome, so attempted changes are audited too.

use async_trait::async_trait;
use serde::Serialize;

use crate::rpc::pb::CreateLogRequest;
use crate::rpc::{CallContext, RpcClient, RpcError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// A pending operation log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpLogEntry {
    pub level: LogLevel,
    pub description: String,
    /// Route path that produced the entry.
    pub action: String,
    pub ip: String,
}

/// Sink for operation log entries.
#[async_trait]
pub trait OpLogWriter: Send + Sync {
    async fn write(&self, ctx: &CallContext, entry: &OpLogEntry) -> Result<(), RpcError>;
}

/// Stores entries through `LogService.createLog`.
pub struct RpcOpLogWriter {
    rpc: RpcClient,
}

impl RpcOpLogWriter {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl OpLogWriter for RpcOpLogWriter {
    async fn write(&self, ctx: &CallContext, entry: &OpLogEntry) -> Result<(), RpcError> {
        tracing::info!(
            target: "edge_admin::oplog",
            admin_id = ctx.admin_id,
            level = entry.level.as_str(),
            action = %entry.action,
            ip = %entry.ip,
            "{}",
            entry.description
        );

        let request = CreateLogRequest {
            level: entry.level.as_str().to_string(),
            description: entry.description.clone(),
            action: entry.action.clone(),
            ip: entry.ip.clone(),
        };
        self.rpc.log_rpc().create_log(ctx, &request).await?;
        Ok(())
    }
}
