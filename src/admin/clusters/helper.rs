use async_trait::async_trait;
use serde::Serialize;

use crate::actions::{ActionContext, ActionError};
use crate::routing::Helper;
use crate::rpc::pb::FindEnabledNodeClusterRequest;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MenuItem {
    name: &'static str,
    url: String,
    is_active: bool,
}

/// Loads the cluster named by `clusterId` for GET pages of the cluster
/// group. POST requests pass through untouched.
pub struct ClusterHelper;

#[async_trait]
impl Helper for ClusterHelper {
    fn name(&self) -> &'static str {
        "cluster"
    }

    async fn before_action(&self, ctx: &mut ActionContext) -> Result<(), ActionError> {
        if !ctx.is_get() {
            return Ok(());
        }

        let cluster_id = ctx.param_i64("clusterId");
        if cluster_id <= 0 {
            return Err(ActionError::not_found("cluster"));
        }

        let call = ctx.admin_context();
        let resp = ctx
            .rpc()
            .node_cluster_rpc()
            .find_enabled_node_cluster(
                &call,
                &FindEnabledNodeClusterRequest {
                    node_cluster_id: cluster_id,
                },
            )
            .await?;
        let cluster = resp
            .node_cluster
            .ok_or_else(|| ActionError::not_found(format!("cluster {}", cluster_id)))?;

        let menu = left_menu(cluster_id, &ctx.route().path);
        ctx.set("clusterId", &cluster.id);
        ctx.set("currentClusterName", &cluster.name);
        ctx.set("cluster", &cluster);
        ctx.set("leftMenuItems", &menu);
        Ok(())
    }
}

fn left_menu(cluster_id: i64, path: &str) -> Vec<MenuItem> {
    let items = [
        ("Nodes", "/clusters/cluster"),
        ("Install", "/clusters/cluster/installNodes"),
        ("Remote install", "/clusters/cluster/installRemote"),
        ("Delete", "/clusters/cluster/delete"),
    ];
    items
        .iter()
        .map(|&(name, base)| {
            // node pages live under the node list
            let in_nodes = base == "/clusters/cluster" && path.starts_with("/clusters/cluster/node");
            MenuItem {
                name,
                url: format!("{}?clusterId={}", base, cluster_id),
                is_active: path == base || in_nodes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_menu_marks_current_page() {
        let menu = left_menu(3, "/clusters/cluster/installNodes");
        let active: Vec<_> = menu.iter().filter(|m| m.is_active).map(|m| m.name).collect();
        assert_eq!(active, vec!["Install"]);
        assert_eq!(menu[0].url, "/clusters/cluster?clusterId=3");

        let menu = left_menu(3, "/clusters/cluster/node/logs");
        assert!(menu[0].is_active);
    }
}
