//! Pages of one cluster: `/clusters/cluster/*`.

pub mod create_batch;
pub mod create_node;
pub mod delete;
pub mod index;
pub mod install_nodes;
pub mod install_remote;
pub mod install_status;
pub mod node;
pub mod update_node_ssh;

use crate::admin::auth::UserMustAuth;
use crate::admin::clusters::ClusterHelper;
use crate::routing::{RouteError, RouteTable};

pub fn register(table: &mut RouteTable) -> Result<(), RouteError> {
    table
        .group("/clusters/cluster")
        .helper(UserMustAuth)
        .helper(ClusterHelper)
        .get("", index::IndexAction)
        .get_post("/installNodes", install_nodes::InstallNodesAction)
        .get_post("/installRemote", install_remote::InstallRemoteAction)
        .post("/installStatus", install_status::InstallStatusAction)
        .get_post("/delete", delete::DeleteAction)
        .get_post("/createNode", create_node::CreateNodeAction)
        .get_post("/createBatch", create_batch::CreateBatchAction)
        .get_post("/updateNodeSSH", update_node_ssh::UpdateNodeSshAction)
        // node
        .get("/node", node::NodeAction)
        .get_post("/node/update", node::UpdateAction)
        .get_post("/node/install", node::InstallAction)
        .post("/node/updateInstallStatus", node::UpdateInstallStatusAction)
        .post("/node/status", node::StatusAction)
        .get("/node/logs", node::LogsAction)
        .end()
}
