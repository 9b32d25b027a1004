//! Round-robin selection over the configured backend endpoints.

use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

use crate::rpc::error::TransportBuildError;

/// Rotates through endpoints on every call.
#[derive(Debug)]
pub struct EndpointSelector {
    endpoints: Vec<Url>,
    counter: AtomicUsize,
}

impl EndpointSelector {
    /// Parses the endpoints; each one is normalized to end with `/` so
    /// service paths can be appended.
    pub fn new(endpoints: &[String]) -> Result<Self, TransportBuildError> {
        if endpoints.is_empty() {
            return Err(TransportBuildError::NoEndpoints);
        }

        let endpoints = endpoints
            .iter()
            .map(|raw| {
                let normalized = if raw.ends_with('/') {
                    raw.clone()
                } else {
                    format!("{}/", raw)
                };
                Url::parse(&normalized).map_err(|source| TransportBuildError::Endpoint {
                    endpoint: raw.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            endpoints,
            counter: AtomicUsize::new(0),
        })
    }

    pub fn next(&self) -> &Url {
        let index = self.counter.fetch_add(1, Ordering::Relaxed) % self.endpoints.len();
        &self.endpoints[index]
    }

    pub fn all(&self) -> &[Url] {
        &self.endpoints
    }
}
