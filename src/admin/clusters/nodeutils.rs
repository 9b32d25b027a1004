//! Shared parsing and persistence for node forms.

use crate::actions::params::decode_optional_json;
use crate::actions::{must, ActionContext, ActionError};
use crate::rpc::pb::{
    CreateNodeIpAddressRequest, FindEnabledNodeRequest, Node, NodeIpAddress, NodeLogin,
    SshLoginParams, UpdateNodeIpAddressRequest,
};

pub const DEFAULT_SSH_PORT: i64 = 22;

/// Parse `ipAddressesJSON`; at least one valid address is required.
pub fn parse_ip_addresses(raw: &str) -> Result<Vec<NodeIpAddress>, ActionError> {
    let addresses: Vec<NodeIpAddress> =
        decode_optional_json("ipAddressesJSON", raw)?.unwrap_or_default();
    if addresses.is_empty() {
        return Err(ActionError::fail_field(
            "ipAddressesJSON",
            "please add at least one IP address",
        ));
    }

    let mut parsed: Vec<NodeIpAddress> = Vec::with_capacity(addresses.len());
    for mut addr in addresses {
        let ip = must::field("ipAddressesJSON", &addr.ip)
            .ip(&format!("invalid IP address '{}'", addr.ip.trim()))?;
        addr.ip = ip.to_string();
        if parsed.iter().any(|p| p.ip == addr.ip) {
            continue;
        }
        parsed.push(addr);
    }
    Ok(parsed)
}

/// Parse `nodeIdsJSON`; must name at least one node.
pub fn parse_node_ids(raw: &str) -> Result<Vec<i64>, ActionError> {
    let ids: Vec<i64> = decode_optional_json("nodeIdsJSON", raw)?.unwrap_or_default();
    if ids.is_empty() {
        return Err(ActionError::fail_field("nodeIdsJSON", "please select at least one node"));
    }
    if ids.iter().any(|id| *id <= 0) {
        return Err(ActionError::fail_field("nodeIdsJSON", "invalid node id"));
    }
    Ok(ids)
}

/// SSH login from form fields. A blank host means no login.
pub fn ssh_login(
    login_id: i64,
    grant_id: i64,
    host: &str,
    port: i64,
) -> Result<Option<NodeLogin>, ActionError> {
    let host = host.trim();
    if host.is_empty() {
        return Ok(None);
    }
    let port = must::port("sshPort", port, "SSH port must be between 1 and 65535")?;
    Ok(Some(NodeLogin::ssh(
        login_id,
        SshLoginParams {
            grant_id,
            host: host.to_string(),
            port,
        },
    )))
}

pub async fn find_node(ctx: &ActionContext, node_id: i64) -> Result<Node, ActionError> {
    if node_id <= 0 {
        return Err(ActionError::not_found("node"));
    }
    let call = ctx.admin_context();
    ctx.rpc()
        .node_rpc()
        .find_enabled_node(&call, &FindEnabledNodeRequest { node_id })
        .await?
        .node
        .ok_or_else(|| ActionError::not_found(format!("node {}", node_id)))
}

/// Create new addresses, update the ones that already have an id.
pub async fn save_ip_addresses(
    ctx: &ActionContext,
    node_id: i64,
    addresses: &[NodeIpAddress],
) -> Result<(), ActionError> {
    let call = ctx.admin_context();
    let rpc = ctx.rpc().node_ip_address_rpc();
    for addr in addresses {
        if addr.id > 0 {
            rpc.update_node_ip_address(
                &call,
                &UpdateNodeIpAddressRequest {
                    node_ip_address_id: addr.id,
                    name: addr.name.clone(),
                    ip: addr.ip.clone(),
                    can_access: addr.can_access,
                },
            )
            .await?;
        } else {
            rpc.create_node_ip_address(
                &call,
                &CreateNodeIpAddressRequest {
                    node_id,
                    name: addr.name.clone(),
                    ip: addr.ip.clone(),
                    can_access: addr.can_access,
                },
            )
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ip_addresses() {
        let addrs = parse_ip_addresses(
            r#"[{"ip":" 10.0.0.1 ","canAccess":true},{"ip":"10.0.0.1"},{"ip":"::1","name":"v6"}]"#,
        )
        .unwrap();
        assert_eq!(addrs.len(), 2);
        assert_eq!(addrs[0].ip, "10.0.0.1");
        assert!(addrs[0].can_access);
        assert_eq!(addrs[1].name, "v6");
    }

    #[test]
    fn test_parse_ip_addresses_rejects_bad_input() {
        assert!(matches!(parse_ip_addresses(""), Err(ActionError::Fail { .. })));
        assert!(matches!(parse_ip_addresses("[]"), Err(ActionError::Fail { .. })));
        assert!(matches!(
            parse_ip_addresses(r#"[{"ip":"300.1.1.1"}]"#),
            Err(ActionError::Fail { .. })
        ));
        assert!(matches!(parse_ip_addresses("[{"), Err(ActionError::Json { .. })));
    }

    #[test]
    fn test_ssh_login() {
        assert_eq!(ssh_login(0, 1, "  ", 0).unwrap(), None);

        let login = ssh_login(5, 2, "10.0.0.1", 2222).unwrap().unwrap();
        assert_eq!(login.id, 5);
        assert_eq!(login.login_type, "ssh");
        assert_eq!(login.params.port, 2222);
        assert_eq!(login.params.grant_id, 2);

        assert!(ssh_login(0, 1, "10.0.0.1", 70000).is_err());
    }

    #[test]
    fn test_parse_node_ids() {
        assert_eq!(parse_node_ids("[1,2]").unwrap(), vec![1, 2]);
        assert!(parse_node_ids("[]").is_err());
        assert!(parse_node_ids("[0]").is_err());
    }
}
