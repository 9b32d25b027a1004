use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{Action, ActionContext, ActionResult, NoParams, Page, DEFAULT_PAGE_SIZE};
use crate::rpc::pb::{CountAllEnabledNodesMatchRequest, ListEnabledNodesMatchRequest};

/// Node list of a cluster.
pub struct IndexAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexParams {
    cluster_id: i64,
    keyword: String,
    install_state: i32,
    active_state: i32,
    page: i64,
}

#[async_trait]
impl Action for IndexAction {
    type GetParams = IndexParams;
    type PostParams = NoParams;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "index");
    }

    async fn run_get(&self, ctx: &mut ActionContext, params: IndexParams) -> ActionResult {
        let call = ctx.admin_context();
        let keyword = params.keyword.trim().to_string();

        let count = ctx
            .rpc()
            .node_rpc()
            .count_all_enabled_nodes_match(
                &call,
                &CountAllEnabledNodesMatchRequest {
                    node_cluster_id: params.cluster_id,
                    install_state: params.install_state,
                    active_state: params.active_state,
                    keyword: keyword.clone(),
                },
            )
            .await?
            .count;
        let page = Page::new(count, params.page, DEFAULT_PAGE_SIZE);

        let nodes = ctx
            .rpc()
            .node_rpc()
            .list_enabled_nodes_match(
                &call,
                &ListEnabledNodesMatchRequest {
                    offset: page.offset(),
                    size: page.size,
                    node_cluster_id: params.cluster_id,
                    install_state: params.install_state,
                    active_state: params.active_state,
                    keyword: keyword.clone(),
                },
            )
            .await?
            .nodes;

        ctx.set("nodes", &nodes);
        ctx.set("page", &page);
        ctx.set("keyword", &keyword);
        ctx.set("installState", &params.install_state);
        ctx.set("activeState", &params.active_state);
        ctx.show()
    }
}
