use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{form_bool, must, Action, ActionContext, ActionError, ActionResult, LogLevel};
use crate::admin::clusters::nodeutils::{
    find_node, parse_ip_addresses, save_ip_addresses, ssh_login, DEFAULT_SSH_PORT,
};
use crate::rpc::pb::{SshLoginParams, UpdateNodeRequest};

pub struct UpdateAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateGet {
    node_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePost {
    #[serde(rename = "nodeId")]
    node_id: i64,
    #[serde(rename = "clusterId")]
    cluster_id: i64,
    name: String,
    #[serde(rename = "ipAddressesJSON")]
    ip_addresses_json: String,
    #[serde(rename = "isOn", deserialize_with = "form_bool")]
    is_on: bool,
    #[serde(rename = "loginId")]
    login_id: i64,
    #[serde(rename = "grantId")]
    grant_id: i64,
    #[serde(rename = "sshHost")]
    ssh_host: String,
    #[serde(rename = "sshPort")]
    ssh_port: i64,
}

#[async_trait]
impl Action for UpdateAction {
    type GetParams = UpdateGet;
    type PostParams = UpdatePost;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "update");
        ctx.second_menu("nodes");
    }

    async fn run_get(&self, ctx: &mut ActionContext, params: UpdateGet) -> ActionResult {
        let node = find_node(ctx, params.node_id).await?;

        let (login_id, login_params) = match &node.node_login {
            Some(login) => (login.id, login.params.clone()),
            None => (
                0,
                SshLoginParams {
                    port: DEFAULT_SSH_PORT as i32,
                    ..Default::default()
                },
            ),
        };

        ctx.set("node", &node);
        ctx.set("loginId", &login_id);
        ctx.set("loginParams", &login_params);
        ctx.show()
    }

    async fn run_post(&self, ctx: &mut ActionContext, params: UpdatePost) -> ActionResult {
        ctx.create_log(LogLevel::Info, format!("update node {}", params.node_id));

        if params.node_id <= 0 {
            return Err(ActionError::not_found("node"));
        }
        let name = must::field("name", params.name.trim())
            .require("please enter the node name")?
            .max_length(255, "node name is too long")?
            .value();
        let addresses = parse_ip_addresses(&params.ip_addresses_json)?;
        let login = ssh_login(
            params.login_id,
            params.grant_id,
            &params.ssh_host,
            params.ssh_port,
        )?;

        let call = ctx.admin_context();
        ctx.rpc()
            .node_rpc()
            .update_node(
                &call,
                &UpdateNodeRequest {
                    node_id: params.node_id,
                    name: name.to_string(),
                    node_cluster_id: params.cluster_id,
                    is_on: params.is_on,
                    node_login: login,
                },
            )
            .await?;

        save_ip_addresses(ctx, params.node_id, &addresses).await?;
        ctx.success()
    }
}
