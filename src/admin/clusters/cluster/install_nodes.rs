use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{Action, ActionContext, ActionResult, LogLevel};
use crate::admin::clusters::nodeutils::parse_node_ids;
use crate::rpc::pb::{FindAllNotInstalledNodesWithNodeClusterIdRequest, UpdateNodeIsInstalledRequest};

/// Manual installation: shows what a node needs to reach the backend and
/// lets the admin mark nodes as installed.
pub struct InstallNodesAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallNodesGet {
    cluster_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InstallNodesPost {
    #[serde(rename = "clusterId")]
    cluster_id: i64,
    #[serde(rename = "nodeIdsJSON")]
    node_ids_json: String,
}

#[async_trait]
impl Action for InstallNodesAction {
    type GetParams = InstallNodesGet;
    type PostParams = InstallNodesPost;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "install");
        ctx.second_menu("nodes");
    }

    async fn run_get(&self, ctx: &mut ActionContext, params: InstallNodesGet) -> ActionResult {
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

        let endpoints = ctx.config().rpc.endpoints.clone();
        ctx.set("nodes", &nodes);
        ctx.set("endpoints", &endpoints);
        ctx.show()
    }

    async fn run_post(&self, ctx: &mut ActionContext, params: InstallNodesPost) -> ActionResult {
        ctx.create_log(
            LogLevel::Info,
            format!("mark nodes of cluster {} as installed", params.cluster_id),
        );

        let node_ids = parse_node_ids(&params.node_ids_json)?;
        let call = ctx.admin_context();
        for node_id in node_ids {
            ctx.rpc()
                .node_rpc()
                .update_node_is_installed(
                    &call,
                    &UpdateNodeIsInstalledRequest {
                        node_id,
                        is_installed: true,
                    },
                )
                .await?;
        }
        ctx.success()
    }
}
