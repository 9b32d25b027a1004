//! Form field checks.
//!
//! ```ignore
//! must::field("name", &params.name)
//!     .require("please enter the node name")?
//!     .max_length(255, "node name is too long")?;
//! ```

use std::net::IpAddr;
use std::ops::RangeInclusive;

use crate::actions::error::ActionError;

/// A named string field under validation.
pub struct Field<'a> {
    name: &'static str,
    value: &'a str,
}

pub fn field<'a>(name: &'static str, value: &'a str) -> Field<'a> {
    Field { name, value }
}

impl<'a> Field<'a> {
    pub fn require(self, message: &str) -> Result<Self, ActionError> {
        if self.value.trim().is_empty() {
            return Err(ActionError::fail_field(self.name, message));
        }
        Ok(self)
    }

    pub fn max_length(self, max: usize, message: &str) -> Result<Self, ActionError> {
        if self.value.chars().count() > max {
            return Err(ActionError::fail_field(self.name, message));
        }
        Ok(self)
    }

    pub fn ip(self, message: &str) -> Result<IpAddr, ActionError> {
        self.value
            .trim()
            .parse()
            .map_err(|_| ActionError::fail_field(self.name, message))
    }

    pub fn value(&self) -> &'a str {
        self.value
    }
}

pub fn range(
    name: &'static str,
    value: i64,
    range: RangeInclusive<i64>,
    message: &str,
) -> Result<i64, ActionError> {
    if !range.contains(&value) {
        return Err(ActionError::fail_field(name, message));
    }
    Ok(value)
}

/// Port numbers for SSH and similar.
pub fn port(name: &'static str, value: i64, message: &str) -> Result<i32, ActionError> {
    // 1..=65535 always fits in i32
    range(name, value, 1..=65535, message).map(|p| p as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(field("name", "  ").require("required").is_err());
        assert_eq!(field("name", "edge-1").require("required").unwrap().value(), "edge-1");
    }

    #[test]
    fn test_ip() {
        assert!(field("ip", "10.0.0.1").ip("bad ip").is_ok());
        assert!(field("ip", "::1").ip("bad ip").is_ok());
        match field("ip", "10.0.0").ip("bad ip") {
            Err(ActionError::Fail { field, .. }) => assert_eq!(field, Some("ip")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_port() {
        assert_eq!(port("sshPort", 22, "bad port").unwrap(), 22);
        assert!(port("sshPort", 0, "bad port").is_err());
        assert!(port("sshPort", 65536, "bad port").is_err());
    }
}
