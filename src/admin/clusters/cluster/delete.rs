use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{Action, ActionContext, ActionError, ActionResult, LogLevel, NoParams};
use crate::rpc::pb::DeleteNodeClusterRequest;

pub struct DeleteAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeletePost {
    cluster_id: i64,
}

#[async_trait]
impl Action for DeleteAction {
    type GetParams = NoParams;
    type PostParams = DeletePost;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "delete");
        ctx.second_menu("delete");
    }

    async fn run_get(&self, ctx: &mut ActionContext, _params: NoParams) -> ActionResult {
        ctx.show()
    }

    async fn run_post(&self, ctx: &mut ActionContext, params: DeletePost) -> ActionResult {
        ctx.create_log(LogLevel::Info, format!("delete cluster {}", params.cluster_id));

        if params.cluster_id <= 0 {
            return Err(ActionError::not_found("cluster"));
        }

        let call = ctx.admin_context();
        ctx.rpc()
            .node_cluster_rpc()
            .delete_node_cluster(
                &call,
                &DeleteNodeClusterRequest {
                    node_cluster_id: params.cluster_id,
                },
            )
            .await?;
        ctx.success()
    }
}
