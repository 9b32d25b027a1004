use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{Action, ActionContext, ActionResult, NoParams};
use crate::admin::clusters::nodeutils::find_node;

/// Node detail.
pub struct NodeAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeGet {
    node_id: i64,
}

#[async_trait]
impl Action for NodeAction {
    type GetParams = NodeGet;
    type PostParams = NoParams;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "node");
        ctx.second_menu("nodes");
    }

    async fn run_get(&self, ctx: &mut ActionContext, params: NodeGet) -> ActionResult {
        let node = find_node(ctx, params.node_id).await?;
        ctx.set("node", &node);
        ctx.show()
    }
}
