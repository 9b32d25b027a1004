use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{must, Action, ActionContext, ActionResult, LogLevel, NoParams};
use crate::admin::clusters::nodeutils::{
    parse_ip_addresses, save_ip_addresses, ssh_login, DEFAULT_SSH_PORT,
};
use crate::rpc::pb::CreateNodeRequest;

pub struct CreateNodeAction;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateNodePost {
    #[serde(rename = "clusterId")]
    cluster_id: i64,
    name: String,
    #[serde(rename = "ipAddressesJSON")]
    ip_addresses_json: String,
    #[serde(rename = "grantId")]
    grant_id: i64,
    #[serde(rename = "sshHost")]
    ssh_host: String,
    #[serde(rename = "sshPort")]
    ssh_port: i64,
}

#[async_trait]
impl Action for CreateNodeAction {
    type GetParams = NoParams;
    type PostParams = CreateNodePost;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "create");
        ctx.second_menu("nodes");
    }

    async fn run_get(&self, ctx: &mut ActionContext, _params: NoParams) -> ActionResult {
        ctx.set("defaultSshPort", &DEFAULT_SSH_PORT);
        ctx.show()
    }

    async fn run_post(&self, ctx: &mut ActionContext, params: CreateNodePost) -> ActionResult {
        ctx.create_log(
            LogLevel::Info,
            format!("create node '{}' in cluster {}", params.name.trim(), params.cluster_id),
        );

        let name = must::field("name", params.name.trim())
            .require("please enter the node name")?
            .max_length(255, "node name is too long")?
            .value();
        let addresses = parse_ip_addresses(&params.ip_addresses_json)?;
        let login = ssh_login(0, params.grant_id, &params.ssh_host, params.ssh_port)?;

        let call = ctx.admin_context();
        let node_id = ctx
            .rpc()
            .node_rpc()
            .create_node(
                &call,
                &CreateNodeRequest {
                    name: name.to_string(),
                    node_cluster_id: params.cluster_id,
                    node_login: login,
                },
            )
            .await?
            .node_id;

        // not transactional: a failure here leaves the node without addresses
        save_ip_addresses(ctx, node_id, &addresses).await?;

        ctx.set("nodeId", &node_id);
        ctx.success()
    }
}
