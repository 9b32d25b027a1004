use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::{
    Action, ActionContext, ActionError, ActionResult, NoParams, Page, DEFAULT_PAGE_SIZE,
};
use crate::admin::clusters::nodeutils::find_node;
use crate::rpc::pb::{CountNodeLogsRequest, ListNodeLogsRequest};

const NODE_ROLE: &str = "node";

pub struct LogsAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogsGet {
    node_id: i64,
    day_from: String,
    day_to: String,
    level: String,
    page: i64,
}

#[async_trait]
impl Action for LogsAction {
    type GetParams = LogsGet;
    type PostParams = NoParams;

    fn init(&self, ctx: &mut ActionContext) {
        ctx.nav("", "node", "log");
        ctx.second_menu("nodes");
    }

    async fn run_get(&self, ctx: &mut ActionContext, params: LogsGet) -> ActionResult {
        let day_from = normalize_day("dayFrom", &params.day_from)?;
        let day_to = normalize_day("dayTo", &params.day_to)?;
        let node = find_node(ctx, params.node_id).await?;

        let call = ctx.admin_context();
        let count = ctx
            .rpc()
            .node_log_rpc()
            .count_node_logs(
                &call,
                &CountNodeLogsRequest {
                    role: NODE_ROLE.to_string(),
                    node_id: params.node_id,
                    day_from: day_from.clone(),
                    day_to: day_to.clone(),
                    level: params.level.clone(),
                },
            )
            .await?
            .count;
        let page = Page::new(count, params.page, DEFAULT_PAGE_SIZE);

        let logs = ctx
            .rpc()
            .node_log_rpc()
            .list_node_logs(
                &call,
                &ListNodeLogsRequest {
                    role: NODE_ROLE.to_string(),
                    node_id: params.node_id,
                    day_from: day_from.clone(),
                    day_to: day_to.clone(),
                    level: params.level.clone(),
                    offset: page.offset(),
                    size: page.size,
                },
            )
            .await?
            .node_logs;

        ctx.set("node", &node);
        ctx.set("logs", &logs);
        ctx.set("page", &page);
        ctx.set("dayFrom", &day_from);
        ctx.set("dayTo", &day_to);
        ctx.set("level", &params.level);
        ctx.show()
    }
}

/// Accepts `YYYY-MM-DD` or `YYYYMMDD`; the backend wants `YYYYMMDD`.
fn normalize_day(field: &'static str, raw: &str) -> Result<String, ActionError> {
    let day: String = raw.trim().chars().filter(|c| *c != '-').collect();
    if day.is_empty() {
        return Ok(day);
    }
    if day.len() != 8 || !day.chars().all(|c| c.is_ascii_digit()) {
        return Err(ActionError::fail_field(field, "please enter a date like 2024-01-31"));
    }
    Ok(day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_day() {
        assert_eq!(normalize_day("dayFrom", "2024-01-31").unwrap(), "20240131");
        assert_eq!(normalize_day("dayFrom", "").unwrap(), "");
        assert!(normalize_day("dayFrom", "2024-1-31").is_err());
        assert!(normalize_day("dayFrom", "yesterday").is_err());
    }
}
