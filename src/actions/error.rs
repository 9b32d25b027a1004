//! Errors an action can end with.
//!
//! Two families matter to the user: validation failures, reported inline
//! next to the form, and everything else, which ends on the generic error
//! page. Backend detail is logged but never shown.

use axum::http::StatusCode;
use thiserror::Error;

use crate::rpc::RpcError;

#[derive(Debug, Error)]
pub enum ActionError {
    /// User-correctable input problem.
    #[error("{message}")]
    Fail {
        message: String,
        field: Option<&'static str>,
    },

    #[error("invalid parameters: {0}")]
    Params(#[from] serde_urlencoded::de::Error),

    #[error("invalid request body: {0}")]
    Body(String),

    #[error("login required")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("invalid {field}: {source}")]
    Json {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl ActionError {
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail {
            message: message.into(),
            field: None,
        }
    }

    pub fn fail_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Fail {
            message: message.into(),
            field: Some(field),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    /// Status of the error page for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Fail { .. } => StatusCode::OK,
            Self::Params(_) | Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Rpc(_) | Self::Json { .. } | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the user.
    pub fn public_message(&self) -> String {
        match self {
            Self::Fail { message, .. } => message.clone(),
            Self::Params(_) | Self::Body(_) => "Invalid request parameters".to_string(),
            Self::Unauthorized => "Please log in first".to_string(),
            Self::NotFound(what) => format!("{} not found", what),
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            Self::Rpc(_) | Self::Json { .. } | Self::Template(_) => {
                "Server error, please try again later".to_string()
            }
        }
    }

    /// Metrics label.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Fail { .. } => "fail",
            Self::Unauthorized => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Params(_) | Self::Body(_) | Self::MethodNotAllowed => "bad_request",
            _ => "error",
        }
    }
}

pub type ActionResult = Result<ActionResponse, ActionError>;

/// How a successful action wants to be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResponse {
    /// Render the route's template with the collected data.
    Show,
    /// JSON success envelope carrying the collected data.
    Success,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_detail_is_hidden() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ActionError::Json { field: "gzipRefJSON", source };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("gzipRefJSON"));
        assert!(err.to_string().contains("gzipRefJSON"));
    }

    #[test]
    fn test_validation_failure() {
        let err = ActionError::fail_field("level", "choose a valid compression level");
        assert!(err.is_validation());
        assert_eq!(err.public_message(), "choose a valid compression level");
        assert_eq!(err.outcome(), "fail");
    }
}
