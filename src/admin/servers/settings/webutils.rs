//! Looking up the web config a settings page edits.

use serde::Deserialize;

use crate::actions::params::decode_json_value;
use crate::actions::{ActionContext, ActionError};
use crate::rpc::pb::{FindAndInitHttpLocationWebConfigRequest, FindAndInitServerWebConfigRequest};
use crate::serverconfigs::HttpWebConfig;

/// Which web config a settings page edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebScope {
    Server,
    Location,
}

/// GET parameters shared by the settings pages of both scopes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeParams {
    pub server_id: i64,
    pub location_id: i64,
}

impl WebScope {
    pub fn is_location(self) -> bool {
        self == WebScope::Location
    }

    pub async fn find_web_config(
        self,
        ctx: &ActionContext,
        params: &ScopeParams,
    ) -> Result<HttpWebConfig, ActionError> {
        match self {
            WebScope::Server => find_web_config_with_server_id(ctx, params.server_id).await,
            WebScope::Location => find_web_config_with_location_id(ctx, params.location_id).await,
        }
    }
}

pub async fn find_web_config_with_server_id(
    ctx: &ActionContext,
    server_id: i64,
) -> Result<HttpWebConfig, ActionError> {
    let call = ctx.admin_context();
    let resp = ctx
        .rpc()
        .server_rpc()
        .find_and_init_server_web_config(&call, &FindAndInitServerWebConfigRequest { server_id })
        .await?;
    decode_web_config(resp.web_json)
}

pub async fn find_web_config_with_location_id(
    ctx: &ActionContext,
    location_id: i64,
) -> Result<HttpWebConfig, ActionError> {
    if location_id <= 0 {
        return Err(ActionError::not_found("location"));
    }
    let call = ctx.admin_context();
    let resp = ctx
        .rpc()
        .http_location_rpc()
        .find_and_init_http_location_web_config(
            &call,
            &FindAndInitHttpLocationWebConfigRequest { location_id },
        )
        .await?;
    decode_web_config(resp.web_json)
}

fn decode_web_config(web_json: serde_json::Value) -> Result<HttpWebConfig, ActionError> {
    if web_json.is_null() {
        return Err(ActionError::not_found("web config"));
    }
    decode_json_value("webJSON", web_json)
}
