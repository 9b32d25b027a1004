//! Websocket settings of a server or location.

use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::params::{decode_json_field, encode_json_value, form_int};
use crate::actions::{Action, ActionContext, ActionError, ActionResult, LogLevel};
use crate::admin::servers::settings::webutils::{ScopeParams, WebScope};
use crate::rpc::pb::{
    CreateHttpWebsocketRequest, UpdateHttpWebWebsocketRequest, UpdateHttpWebsocketRequest,
};
use crate::serverconfigs::{HttpWebsocketConfig, HttpWebsocketRef};

pub struct WebsocketAction {
    scope: WebScope,
}

impl WebsocketAction {
    pub fn server() -> Self {
        Self {
            scope: WebScope::Server,
        }
    }

    pub fn location() -> Self {
        Self {
            scope: WebScope::Location,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebsocketPost {
    #[serde(rename = "webId", deserialize_with = "form_int")]
    web_id: i64,
    #[serde(rename = "websocketRefJSON")]
    websocket_ref_json: String,
    #[serde(rename = "websocketJSON")]
    websocket_json: String,
}

#[async_trait]
impl Action for WebsocketAction {
    type GetParams = ScopeParams;
    type PostParams = WebsocketPost;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "setting", "index");
        match self.scope {
            WebScope::Server => ctx.second_menu("websocket"),
            WebScope::Location => {
                ctx.second_menu("locations");
                ctx.tiny_menu("websocket");
            }
        }
    }

    async fn run_get(&self, ctx: &mut ActionContext, params: ScopeParams) -> ActionResult {
        let web_config = self.scope.find_web_config(ctx, &params).await?;

        ctx.set("webId", &web_config.id);
        ctx.set("websocketRef", &web_config.websocket_ref.unwrap_or_default());
        ctx.set("websocketConfig", &web_config.websocket.unwrap_or_default());
        if self.scope.is_location() {
            ctx.set("locationId", &params.location_id);
        }
        ctx.show()
    }

    async fn run_post(&self, ctx: &mut ActionContext, params: WebsocketPost) -> ActionResult {
        ctx.create_log(
            LogLevel::Info,
            format!("update websocket settings of web {}", params.web_id),
        );

        let mut websocket_ref: HttpWebsocketRef =
            decode_json_field("websocketRefJSON", &params.websocket_ref_json)?;
        let mut config: HttpWebsocketConfig =
            decode_json_field("websocketJSON", &params.websocket_json)?;
        config
            .init()
            .map_err(|e| ActionError::fail_field("websocketJSON", e.to_string()))?;

        let handshake_timeout_json = encode_json_value("websocketJSON", &config.handshake_timeout)?;
        let call = ctx.admin_context();

        let websocket_id = if config.id <= 0 {
            ctx.rpc()
                .http_websocket_rpc()
                .create_http_websocket(
                    &call,
                    &CreateHttpWebsocketRequest {
                        handshake_timeout_json,
                        allow_all_origins: config.allow_all_origins,
                        allowed_origins: config.allowed_origins.clone(),
                        request_same_origin: config.request_same_origin,
                        request_origin: config.request_origin.clone(),
                    },
                )
                .await?
                .websocket_id
        } else {
            ctx.rpc()
                .http_websocket_rpc()
                .update_http_websocket(
                    &call,
                    &UpdateHttpWebsocketRequest {
                        websocket_id: config.id,
                        handshake_timeout_json,
                        allow_all_origins: config.allow_all_origins,
                        allowed_origins: config.allowed_origins.clone(),
                        request_same_origin: config.request_same_origin,
                        request_origin: config.request_origin.clone(),
                    },
                )
                .await?;
            config.id
        };

        websocket_ref.websocket_id = websocket_id;
        let websocket_json = encode_json_value("websocketRefJSON", &websocket_ref)?;
        ctx.rpc()
            .http_web_rpc()
            .update_http_web_websocket(
                &call,
                &UpdateHttpWebWebsocketRequest {
                    web_id: params.web_id,
                    websocket_json,
                },
            )
            .await?;

        ctx.success()
    }
}
