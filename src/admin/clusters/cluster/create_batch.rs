use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;

use crate::actions::{must, Action, ActionContext, ActionError, ActionResult, LogLevel, NoParams};
use crate::admin::clusters::nodeutils::DEFAULT_SSH_PORT;
use crate::rpc::pb::{CreateNodeIpAddressRequest, CreateNodeRequest, NodeLogin, SshLoginParams};

/// Creates one node per IP line, each reachable over SSH on its own IP.
pub struct CreateBatchAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBatchPost {
    cluster_id: i64,
    ip_list: String,
    grant_id: i64,
    ssh_port: i64,
}

#[async_trait]
impl Action for CreateBatchAction {
    type GetParams = NoParams;
    type PostParams = CreateBatchPost;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "create");
        ctx.second_menu("nodes");
    }

    async fn run_get(&self, ctx: &mut ActionContext, _params: NoParams) -> ActionResult {
        ctx.set("defaultSshPort", &DEFAULT_SSH_PORT);
        ctx.show()
    }

    async fn run_post(&self, ctx: &mut ActionContext, params: CreateBatchPost) -> ActionResult {
        ctx.create_log(
            LogLevel::Info,
            format!("batch create nodes in cluster {}", params.cluster_id),
        );

        let ips = parse_ip_list(&params.ip_list)?;
        let ssh_port = if params.ssh_port == 0 {
            DEFAULT_SSH_PORT
        } else {
            params.ssh_port
        };
        let port = must::port("sshPort", ssh_port, "SSH port must be between 1 and 65535")?;

        let call = ctx.admin_context();
        for ip in &ips {
            let ip = ip.to_string();
            let login = NodeLogin::ssh(
                0,
                SshLoginParams {
                    grant_id: params.grant_id,
                    host: ip.clone(),
                    port,
                },
            );
            let node_id = ctx
                .rpc()
                .node_rpc()
                .create_node(
                    &call,
                    &CreateNodeRequest {
                        name: ip.clone(),
                        node_cluster_id: params.cluster_id,
                        node_login: Some(login),
                    },
                )
                .await?
                .node_id;

            ctx.rpc()
                .node_ip_address_rpc()
                .create_node_ip_address(
                    &call,
                    &CreateNodeIpAddressRequest {
                        node_id,
                        name: String::new(),
                        ip,
                        can_access: true,
                    },
                )
                .await?;
        }

        ctx.set("count", &ips.len());
        ctx.success()
    }
}

/// One IP per line; blank lines are skipped and duplicates dropped.
fn parse_ip_list(raw: &str) -> Result<Vec<IpAddr>, ActionError> {
    let mut ips: Vec<IpAddr> = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let ip = must::field("ipList", line)
            .ip(&format!("invalid IP address '{}' on line {}", line, index + 1))?;
        if !ips.contains(&ip) {
            ips.push(ip);
        }
    }

    if ips.is_empty() {
        return Err(ActionError::fail_field(
            "ipList",
            "please enter at least one IP address",
        ));
    }
    Ok(ips)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ip_list() {
        let ips = parse_ip_list("10.0.0.1\n\n 10.0.0.2 \n10.0.0.1\n").unwrap();
        assert_eq!(ips.len(), 2);
        assert_eq!(ips[1].to_string(), "10.0.0.2");
    }

    #[test]
    fn test_parse_ip_list_errors() {
        assert!(parse_ip_list("  \n").is_err());
        match parse_ip_list("10.0.0.1\nnot-an-ip") {
            Err(ActionError::Fail { message, .. }) => assert!(message.contains("line 2")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
