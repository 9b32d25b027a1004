//! Websocket proxy settings of a web config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::shared::TimeDuration;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpWebsocketRef {
    pub is_prior: bool,
    pub is_on: bool,
    pub websocket_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpWebsocketConfig {
    pub id: i64,
    pub is_on: bool,
    pub allow_all_origins: bool,
    pub allowed_origins: Vec<String>,
    pub request_same_origin: bool,
    pub request_origin: String,
    pub handshake_timeout: Option<TimeDuration>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WebsocketConfigError {
    #[error("handshake timeout must not be negative")]
    NegativeHandshakeTimeout,
    #[error("origin '{0}' is not a valid host")]
    InvalidOrigin(String),
}

impl HttpWebsocketConfig {
    /// Validates the config and normalizes the allowed origins
    /// (trimmed, lowercased, empty entries and duplicates dropped).
    pub fn init(&mut self) -> Result<(), WebsocketConfigError> {
        if let Some(timeout) = &self.handshake_timeout {
            if timeout.to_duration().is_none() {
                return Err(WebsocketConfigError::NegativeHandshakeTimeout);
            }
        }

        let mut origins: Vec<String> = Vec::with_capacity(self.allowed_origins.len());
        for origin in &self.allowed_origins {
            let origin = origin.trim().to_lowercase();
            if origin.is_empty() {
                continue;
            }
            if origin.chars().any(|c| c.is_whitespace() || c == '/') {
                return Err(WebsocketConfigError::InvalidOrigin(origin));
            }
            if !origins.contains(&origin) {
                origins.push(origin);
            }
        }
        self.allowed_origins = origins;
        self.request_origin = self.request_origin.trim().to_string();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serverconfigs::shared::TimeUnit;

    #[test]
    fn test_init_normalizes_origins() {
        let mut config = HttpWebsocketConfig {
            allowed_origins: vec![
                " Example.com ".into(),
                "".into(),
                "example.com".into(),
                "cdn.example.com".into(),
            ],
            ..Default::default()
        };
        config.init().unwrap();
        assert_eq!(config.allowed_origins, vec!["example.com", "cdn.example.com"]);
    }

    #[test]
    fn test_init_rejects_bad_values() {
        let mut config = HttpWebsocketConfig {
            handshake_timeout: Some(TimeDuration::new(-5, TimeUnit::Second)),
            ..Default::default()
        };
        assert_eq!(config.init(), Err(WebsocketConfigError::NegativeHandshakeTimeout));

        let mut config = HttpWebsocketConfig {
            allowed_origins: vec!["https://example.com/".into()],
            ..Default::default()
        };
        assert!(matches!(config.init(), Err(WebsocketConfigError::InvalidOrigin(_))));
    }
}
