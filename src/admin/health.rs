use async_trait::async_trait;

use crate::actions::{Action, ActionContext, ActionResult, NoParams};

/// Liveness probe; does not touch the backend.
pub struct HealthAction;

#[async_trait]
impl Action for HealthAction {
    type GetParams = NoParams;
    type PostParams = NoParams;

    async fn run_get(&self, ctx: &mut ActionContext, _params: NoParams) -> ActionResult {
        ctx.set("status", "ok");
        ctx.set("version", env!("CARGO_PKG_VERSION"));
        ctx.success()
    }
}
