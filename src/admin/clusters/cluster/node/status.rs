use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{Action, ActionContext, ActionResult, NoParams};
use crate::rpc::pb::FindNodeInstallStatusRequest;

/// Install progress of one node.
pub struct StatusAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusPost {
    node_id: i64,
}

#[async_trait]
impl Action for StatusAction {
    type GetParams = NoParams;
    type PostParams = StatusPost;

    async fn run_post(&self, ctx: &mut ActionContext, params: StatusPost) -> ActionResult {
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

        ctx.set("installStatus", &install_status);
        ctx.success()
    }
}
