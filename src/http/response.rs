//! Turning action results into HTTP responses.
//!
//! # Responsibilities
//! - `Show` renders the route template with the collected data
//! - `Success` and validation failures answer the JSON envelope
//!   `{"code", "message", "data"}` with HTTP 200
//! - Other errors render the error page, or the envelope with the real
//!   status when the caller asked for JSON
//!
//! # Design Decisions
//! - Backend and decoding errors are logged in full but shown generically

use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use minijinja::context;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::actions::{ActionContext, ActionError, ActionResponse, ActionResult};
use crate::http::request::{request_id, wants_json};
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonEnvelope<'a> {
    pub code: u16,
    pub message: &'a str,
    pub data: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error_fields: Vec<&'a str>,
}

pub fn render(ctx: &ActionContext, result: ActionResult) -> Response {
    match result {
        Ok(ActionResponse::Show) => show(ctx),
        Ok(ActionResponse::Success) => envelope(StatusCode::OK, 200, "", ctx.data(), Vec::new()),
        Err(err) => {
            tracing::debug!(route = %ctx.route().path, "Action ended with error");
            error_response(ctx.state(), ctx.headers(), &err)
        }
    }
}

fn show(ctx: &ActionContext) -> Response {
    let view = minijinja::Value::from_serialize(ctx.view_data());
    match ctx.state().templates.render(&ctx.route().template, view) {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response(ctx.state(), ctx.headers(), &ActionError::Template(e)),
    }
}

/// Response for an error raised before or during an action.
pub fn error_response(state: &AppState, headers: &HeaderMap, err: &ActionError) -> Response {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!(error = %err, "Action failed");
    } else if !err.is_validation() {
        tracing::warn!(error = %err, status = status.as_u16(), "Action rejected");
    }

    let message = err.public_message();
    let empty = Map::new();

    if let ActionError::Fail { field, .. } = err {
        let fields = field.iter().copied().collect();
        return envelope(StatusCode::OK, 400, &message, &empty, fields);
    }

    if wants_json(headers) {
        return envelope(status, status.as_u16(), &message, &empty, Vec::new());
    }

    let page = state.templates.render(
        "error.html",
        context! {
            productName => state.config.ui.product_name.as_str(),
            status => status.as_u16(),
            message => message.as_str(),
            requestId => request_id(headers),
        },
    );
    match page {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render error page");
            (status, message).into_response()
        }
    }
}

fn envelope(
    status: StatusCode,
    code: u16,
    message: &str,
    data: &Map<String, Value>,
    error_fields: Vec<&str>,
) -> Response {
    let body = JsonEnvelope {
        code,
        message,
        data,
        error_fields,
    };
    (status, Json(body)).into_response()
}
