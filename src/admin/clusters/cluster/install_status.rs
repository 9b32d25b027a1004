use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionContext, ActionResult, NoParams};
use crate::admin::clusters::nodeutils::parse_node_ids;
use crate::rpc::pb::{FindNodeInstallStatusRequest, NodeInstallStatus};

/// Install progress of several nodes, polled by the install pages.
pub struct InstallStatusAction;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InstallStatusPost {
    #[serde(rename = "nodeIdsJSON")]
    node_ids_json: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeStatus {
    node_id: i64,
    install_status: Option<NodeInstallStatus>,
}

#[async_trait]
impl Action for InstallStatusAction {
    type GetParams = NoParams;
    type PostParams = InstallStatusPost;

    async fn run_post(&self, ctx: &mut ActionContext, params: InstallStatusPost) -> ActionResult {
        let node_ids = parse_node_ids(&params.node_ids_json)?;
        let call = ctx.admin_context();

        let mut statuses = Vec::with_capacity(node_ids.len());
        for node_id in node_ids {
            let resp = ctx
                .rpc()
                .node_rpc()
                .find_node_install_status(&call, &FindNodeInstallStatusRequest { node_id })
                .await?;
            statuses.push(NodeStatus {
                node_id,
                install_status: resp.install_status,
            });
        }

        ctx.set("statuses", &statuses);
        ctx.success()
    }
}
