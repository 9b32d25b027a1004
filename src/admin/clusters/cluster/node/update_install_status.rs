use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{
    form_bool, Action, ActionContext, ActionError, ActionResult, LogLevel, NoParams,
};
use crate::rpc::pb::UpdateNodeIsInstalledRequest;

/// Manually flips the installed flag of a node.
pub struct UpdateInstallStatusAction;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateInstallStatusPost {
    #[serde(rename = "nodeId")]
    node_id: i64,
    #[serde(rename = "isInstalled", deserialize_with = "form_bool")]
    is_installed: bool,
}

#[async_trait]
impl Action for UpdateInstallStatusAction {
    type GetParams = NoParams;
    type PostParams = UpdateInstallStatusPost;

    async fn run_post(
        &self,
        ctx: &mut ActionContext,
        params: UpdateInstallStatusPost,
    ) -> ActionResult {
        ctx.create_log(
            LogLevel::Info,
            format!(
                "set install status of node {} to {}",
                params.node_id, params.is_installed
            ),
        );

        if params.node_id <= 0 {
            return Err(ActionError::not_found("node"));
        }

        let call = ctx.admin_context();
        ctx.rpc()
            .node_rpc()
            .update_node_is_installed(
                &call,
                &UpdateNodeIsInstalledRequest {
                    node_id: params.node_id,
                    is_installed: params.is_installed,
                },
            )
            .await?;
        ctx.success()
    }
}
