use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{Action, ActionContext, ActionError, ActionResult, LogLevel};
use crate::rpc::pb::{FindAllNotInstalledNodesWithNodeClusterIdRequest, InstallNodeRequest};

/// Remote (SSH) installation of not yet installed nodes.
pub struct InstallRemoteAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallRemoteGet {
    cluster_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallRemotePost {
    node_id: i64,
}

#[async_trait]
impl Action for InstallRemoteAction {
    type GetParams = InstallRemoteGet;
    type PostParams = InstallRemotePost;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "install");
        ctx.second_menu("installRemote");
    }

    async fn run_get(&self, ctx: &mut ActionContext, params: InstallRemoteGet) -> ActionResult {
        let call = ctx.admin_context();
        let nodes = ctx
            .rpc()
            .node_rpc()
            .find_all_not_installed_nodes_with_node_cluster_id(
                &call,
                &FindAllNotInstalledNodesWithNodeClusterIdRequest {
                    node_cluster_id: params.cluster_id,
                },
            )
            .await?
            .nodes;

        ctx.set("nodes", &nodes);
        ctx.show()
    }

    async fn run_post(&self, ctx: &mut ActionContext, params: InstallRemotePost) -> ActionResult {
        ctx.create_log(
            LogLevel::Info,
            format!("start remote installation of node {}", params.node_id),
        );

        if params.node_id <= 0 {
            return Err(ActionError::fail_field("nodeId", "please choose a node"));
        }

        let call = ctx.admin_context();
        ctx.rpc()
            .node_rpc()
            .install_node(&call, &InstallNodeRequest { node_id: params.node_id })
            .await?;
        ctx.success()
    }
}
