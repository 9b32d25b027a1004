//! RPC error types.

use thiserror::Error;

/// Failure of a single RPC round trip.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("{service}.{method}: failed to encode request: {source}")]
    Encode {
        service: &'static str,
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service}.{method}: transport error: {source}")]
    Transport {
        service: &'static str,
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service}.{method}: backend returned {status}: {message}")]
    Status {
        service: &'static str,
        method: &'static str,
        status: u16,
        message: String,
    },

    #[error("{service}.{method}: invalid response: {source}")]
    Decode {
        service: &'static str,
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to build the RPC transport from configuration.
#[derive(Debug, Error)]
pub enum TransportBuildError {
    #[error("no rpc endpoints configured")]
    NoEndpoints,

    #[error("invalid rpc endpoint '{endpoint}': {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
