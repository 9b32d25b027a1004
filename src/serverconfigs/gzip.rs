//! Gzip compression settings of a web config.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shared::SizeCapacity;

pub const MIN_GZIP_LEVEL: i32 = 0;
pub const MAX_GZIP_LEVEL: i32 = 9;

/// Reference stored inline on the web config.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpGzipRef {
    pub is_prior: bool,
    pub is_on: bool,
    pub gzip_id: i64,
}

/// Full gzip configuration owned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpGzipConfig {
    pub id: i64,
    pub is_on: bool,
    pub level: i32,
    pub min_length: Option<SizeCapacity>,
    pub max_length: Option<SizeCapacity>,
    /// Request conditions, opaque to the console.
    pub conds: Option<Value>,
}

impl Default for HttpGzipConfig {
    fn default() -> Self {
        Self {
            id: 0,
            is_on: true,
            level: 0,
            min_length: None,
            max_length: None,
            conds: None,
        }
    }
}

pub fn is_valid_level(level: i32) -> bool {
    (MIN_GZIP_LEVEL..=MAX_GZIP_LEVEL).contains(&level)
}
