//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, endpoints and value ranges
//! - Detect duplicate admin credentials
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AdminConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::AdminConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("listener.tls paths must not be empty")]
    TlsPaths,

    #[error("rpc.endpoints must not be empty")]
    NoEndpoints,

    #[error("rpc endpoint '{0}' must be an http(s) url")]
    Endpoint(String),

    #[error("rpc.node_id must not be empty")]
    NodeId,

    #[error("rpc.secret must not be empty")]
    Secret,

    #[error("rpc.timeout_secs must be greater than zero")]
    RpcTimeout,

    #[error("auth.admins must contain at least one admin")]
    NoAdmins,

    #[error("admin #{0} must have a positive id and a non-empty api_key")]
    AdminCredential(usize),

    #[error("admin api_key of #{0} is already used by another admin")]
    DuplicateApiKey(usize),

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),

    #[error("security.max_body_size must be greater than zero")]
    MaxBodySize,
}

pub fn validate_config(config: &AdminConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.trim().is_empty() || tls.key_path.trim().is_empty() {
            errors.push(ValidationError::TlsPaths);
        }
    }

    if config.rpc.endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }
    for endpoint in &config.rpc.endpoints {
        let valid = Url::parse(endpoint)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::Endpoint(endpoint.clone()));
        }
    }
    if config.rpc.node_id.trim().is_empty() {
        errors.push(ValidationError::NodeId);
    }
    if config.rpc.secret.trim().is_empty() {
        errors.push(ValidationError::Secret);
    }
    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::RpcTimeout);
    }

    if config.auth.admins.is_empty() {
        errors.push(ValidationError::NoAdmins);
    }
    let mut keys = HashSet::new();
    for (i, admin) in config.auth.admins.iter().enumerate() {
        if admin.id <= 0 || admin.api_key.trim().is_empty() {
            errors.push(ValidationError::AdminCredential(i));
            continue;
        }
        if !keys.insert(admin.api_key.as_str()) {
            errors.push(ValidationError::DuplicateApiKey(i));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::MaxBodySize);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
