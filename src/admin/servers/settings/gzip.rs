//! Gzip settings of a server or location.
//!
//! The web config holds only a reference (`gzipRef`) to a gzip config
//! stored separately by the backend. Saving creates or updates that config
//! first and then points the reference at it.

use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::params::{
    decode_json_field, decode_json_value, decode_optional_json, encode_json_value, form_int,
};
use crate::actions::{Action, ActionContext, ActionError, ActionResult, LogLevel};
use crate::admin::servers::settings::webutils::{ScopeParams, WebScope};
use crate::rpc::pb::{
    CreateHttpGzipRequest, FindEnabledGzipConfigRequest, UpdateHttpGzipRequest,
    UpdateHttpWebGzipRequest,
};
use crate::serverconfigs::gzip::is_valid_level;
use crate::serverconfigs::{HttpGzipConfig, HttpGzipRef, SizeCapacity};

pub struct GzipAction {
    scope: WebScope,
}

impl GzipAction {
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
pub struct GzipPost {
    #[serde(rename = "webId", deserialize_with = "form_int")]
    web_id: i64,
    #[serde(rename = "gzipId", deserialize_with = "form_int")]
    gzip_id: i64,
    #[serde(deserialize_with = "form_int")]
    level: i32,
    #[serde(rename = "minLength")]
    min_length: String,
    #[serde(rename = "maxLength")]
    max_length: String,
    #[serde(rename = "condsJSON")]
    conds_json: String,
    #[serde(rename = "gzipRefJSON")]
    gzip_ref_json: String,
}

#[async_trait]
impl Action for GzipAction {
    type GetParams = ScopeParams;
    type PostParams = GzipPost;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "setting", "index");
        match self.scope {
            WebScope::Server => ctx.second_menu("gzip"),
            WebScope::Location => {
                ctx.second_menu("locations");
                ctx.tiny_menu("gzip");
            }
        }
    }

    async fn run_get(&self, ctx: &mut ActionContext, params: ScopeParams) -> ActionResult {
        let web_config = self.scope.find_web_config(ctx, &params).await?;
        ctx.set("webId", &web_config.id);

        let gzip_id = web_config.gzip_ref.as_ref().map(|r| r.gzip_id).unwrap_or(0);
        let gzip_config = if gzip_id > 0 {
            let call = ctx.admin_context();
            let resp = ctx
                .rpc()
                .http_gzip_rpc()
                .find_enabled_http_gzip_config(&call, &FindEnabledGzipConfigRequest { gzip_id })
                .await?;
            decode_json_value::<HttpGzipConfig>("gzipJSON", resp.gzip_json)?
        } else {
            HttpGzipConfig::default()
        };

        ctx.set("gzipConfig", &gzip_config);
        ctx.set("gzipRef", &web_config.gzip_ref.unwrap_or_default());
        if self.scope.is_location() {
            ctx.set("locationId", &params.location_id);
        }
        ctx.show()
    }

    async fn run_post(&self, ctx: &mut ActionContext, params: GzipPost) -> ActionResult {
        ctx.create_log(
            LogLevel::Info,
            format!("update gzip settings of web {}", params.web_id),
        );

        if !is_valid_level(params.level) {
            return Err(ActionError::fail_field(
                "level",
                "please choose a valid compression level",
            ));
        }

        let min_length = decode_optional_json::<SizeCapacity>("minLength", &params.min_length)?
            .unwrap_or_else(SizeCapacity::unlimited);
        let max_length = decode_optional_json::<SizeCapacity>("maxLength", &params.max_length)?
            .unwrap_or_else(SizeCapacity::unlimited);
        let mut gzip_ref: HttpGzipRef = decode_json_field("gzipRefJSON", &params.gzip_ref_json)?;
        let conds = decode_optional_json::<serde_json::Value>("condsJSON", &params.conds_json)?;

        let call = ctx.admin_context();
        if params.gzip_id > 0 {
            ctx.rpc()
                .http_gzip_rpc()
                .update_http_gzip(
                    &call,
                    &UpdateHttpGzipRequest {
                        gzip_id: params.gzip_id,
                        level: params.level,
                        min_length,
                        max_length,
                        conds_json: conds,
                    },
                )
                .await?;
            gzip_ref.gzip_id = params.gzip_id;
        } else {
            let resp = ctx
                .rpc()
                .http_gzip_rpc()
                .create_http_gzip(
                    &call,
                    &CreateHttpGzipRequest {
                        level: params.level,
                        min_length,
                        max_length,
                        conds_json: conds,
                    },
                )
                .await?;
            gzip_ref.gzip_id = resp.gzip_id;
        }

        let gzip_json = encode_json_value("gzipRefJSON", &gzip_ref)?;
        ctx.rpc()
            .http_web_rpc()
            .update_http_web_gzip(
                &call,
                &UpdateHttpWebGzipRequest {
                    web_id: params.web_id,
                    gzip_json,
                },
            )
            .await?;

        ctx.success()
    }
}
