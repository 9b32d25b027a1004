//! Request parameters.
//!
//! Query string and urlencoded body are merged (body wins on duplicate
//! names). Empty values are dropped before decoding so that `#[serde(default)]`
//! fields fall back to their defaults instead of failing to parse `""`.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

use crate::actions::error::ActionError;

/// Raw name/value pairs of one request.
#[derive(Debug, Clone, Default)]
pub struct RawParams {
    pairs: Vec<(String, String)>,
}

impl RawParams {
    pub fn parse(query: Option<&str>, form_body: Option<&[u8]>) -> Result<Self, ActionError> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        if let Some(query) = query {
            pairs.extend(serde_urlencoded::from_str::<Vec<(String, String)>>(query)?);
        }
        if let Some(body) = form_body {
            pairs.extend(serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)?);
        }
        Ok(Self { pairs })
    }

    /// Last value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Integer value of `name`, `0` when absent or not a number.
    pub fn get_i64(&self, name: &str) -> i64 {
        self.get(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Decode into the action's parameter struct.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ActionError> {
        let mut merged: Vec<(&str, &str)> = Vec::with_capacity(self.pairs.len());
        for (name, value) in &self.pairs {
            if value.is_empty() {
                continue;
            }
            match merged.iter_mut().find(|(k, _)| *k == name.as_str()) {
                Some(existing) => existing.1 = value.as_str(),
                None => merged.push((name.as_str(), value.as_str())),
            }
        }

        let encoded = serde_urlencoded::to_string(&merged)
            .map_err(|e| ActionError::Body(e.to_string()))?;
        Ok(serde_urlencoded::from_str(&encoded)?)
    }
}

/// Parameters of a verb the action does not read anything for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoParams {}

/// Accepts `1/0`, `true/false`, `on/off` and `yes/no`.
pub fn form_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "" | "0" | "false" | "off" | "no" => Ok(false),
        other => Err(de::Error::custom(format!("invalid boolean '{}'", other))),
    }
}

/// Integer form field; a value that does not parse counts as zero.
pub fn form_int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or_default())
}

/// Decode a required JSON form field.
pub fn decode_json_field<T: DeserializeOwned>(
    field: &'static str,
    raw: &str,
) -> Result<T, ActionError> {
    serde_json::from_str(raw).map_err(|source| ActionError::Json { field, source })
}

/// Decode an optional JSON form field; blank means absent.
pub fn decode_optional_json<T: DeserializeOwned>(
    field: &'static str,
    raw: &str,
) -> Result<Option<T>, ActionError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    decode_json_field(field, raw).map(Some)
}

/// Decode a JSON document embedded in an RPC response.
pub fn decode_json_value<T: DeserializeOwned>(
    field: &'static str,
    value: Value,
) -> Result<T, ActionError> {
    serde_json::from_value(value).map_err(|source| ActionError::Json { field, source })
}

/// Encode a value to embed it in an RPC request.
pub fn encode_json_value<T: serde::Serialize>(
    field: &'static str,
    value: &T,
) -> Result<Value, ActionError> {
    serde_json::to_value(value).map_err(|source| ActionError::Json { field, source })
}
