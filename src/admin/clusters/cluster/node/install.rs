use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{Action, ActionContext, ActionError, ActionResult, LogLevel};
use crate::admin::clusters::nodeutils::find_node;
use crate::rpc::pb::{FindNodeInstallStatusRequest, InstallNodeRequest};

/// Installation page of one node.
pub struct InstallAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallParams {
    node_id: i64,
}

#[async_trait]
impl Action for InstallAction {
    type GetParams = InstallParams;
    type PostParams = InstallParams;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "install");
        ctx.second_menu("nodes");
    }

    async fn run_get(&self, ctx: &mut ActionContext, params: InstallParams) -> ActionResult {
        let node = find_node(ctx, params.node_id).await?;

        let call = ctx.admin_context();
        let install_status = ctx
            .rpc()
            .node_rpc()
            .find_node_install_status(
                &call,
                &FindNodeInstallStatusRequest {
                    node_id: params.node_id,
                },
            )
            .await?
            .install_status;

        let endpoints = ctx.config().rpc.endpoints.clone();
        ctx.set("node", &node);
        ctx.set("installStatus", &install_status);
        ctx.set("endpoints", &endpoints);
        ctx.show()
    }

    async fn run_post(&self, ctx: &mut ActionContext, params: InstallParams) -> ActionResult {
        ctx.create_log(LogLevel::Info, format!("install node {}", params.node_id));

        if params.node_id <= 0 {
            return Err(ActionError::not_found("node"));
        }

        let call = ctx.admin_context();
        ctx.rpc()
            .node_rpc()
            .install_node(&call, &InstallNodeRequest { node_id: params.node_id })
            .await?;
        ctx.success()
    }
}
