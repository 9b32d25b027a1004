use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{must, Action, ActionContext, ActionError, ActionResult, LogLevel};
use crate::admin::clusters::nodeutils::{find_node, DEFAULT_SSH_PORT};
use crate::rpc::pb::{NodeLogin, SshLoginParams, UpdateNodeLoginRequest};

pub struct UpdateNodeSshAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateNodeSshGet {
    node_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateNodeSshPost {
    node_id: i64,
    login_id: i64,
    grant_id: i64,
    ssh_host: String,
    ssh_port: i64,
}

#[async_trait]
impl Action for UpdateNodeSshAction {
    type GetParams = UpdateNodeSshGet;
    type PostParams = UpdateNodeSshPost;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "updateNodeSSH");
    }

    async fn run_get(&self, ctx: &mut ActionContext, params: UpdateNodeSshGet) -> ActionResult {
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
        ctx.set("params", &login_params);
        ctx.show()
    }

    async fn run_post(&self, ctx: &mut ActionContext, params: UpdateNodeSshPost) -> ActionResult {
        ctx.create_log(
            LogLevel::Info,
            format!("update SSH settings of node {}", params.node_id),
        );
        if params.node_id <= 0 {
            return Err(ActionError::not_found("node"));
        }

        let host = must::field("sshHost", params.ssh_host.trim())
            .require("please enter the SSH host")?
            .value();
        let port = must::port("sshPort", params.ssh_port, "SSH port must be between 1 and 65535")?;

        let login = NodeLogin::ssh(
            params.login_id,
            SshLoginParams {
                grant_id: params.grant_id,
                host: host.to_string(),
                port,
            },
        );
        let call = ctx.admin_context();
        ctx.rpc()
            .node_rpc()
            .update_node_login(
                &call,
                &UpdateNodeLoginRequest {
                    node_id: params.node_id,
                    node_login: login,
                },
            )
            .await?;
        ctx.success()
    }
}
