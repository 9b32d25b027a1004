//! Web config of a server or location.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::gzip::{HttpGzipConfig, HttpGzipRef};
use super::websocket::{HttpWebsocketConfig, HttpWebsocketRef};

/// Only the parts the console edits are typed; everything else the backend
/// sends is carried in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpWebConfig {
    pub id: i64,
    pub is_on: bool,
    pub gzip_ref: Option<HttpGzipRef>,
    pub gzip: Option<HttpGzipConfig>,
    pub websocket_ref: Option<HttpWebsocketRef>,
    pub websocket: Option<HttpWebsocketConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keeps_unknown_fields() {
        let web: HttpWebConfig = serde_json::from_str(
            r#"{"id": 12, "isOn": true, "gzipRef": {"isOn": true, "gzipId": 3}, "charset": {"isOn": false}}"#,
        )
        .unwrap();
        assert_eq!(web.id, 12);
        assert_eq!(web.gzip_ref.as_ref().map(|r| r.gzip_id), Some(3));
        assert!(web.websocket_ref.is_none());
        assert!(web.extra.contains_key("charset"));
    }
}
