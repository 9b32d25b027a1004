use async_trait::async_trait;

use crate::actions::{ActionContext, ActionError};
use crate::routing::Helper;
use crate::rpc::pb::FindEnabledServerRequest;

/// Loads the server named by `serverId` for GET pages under a server.
pub struct ServerHelper;

#[async_trait]
impl Helper for ServerHelper {
    fn name(&self) -> &'static str {
        "server"
    }

    async fn before_action(&self, ctx: &mut ActionContext) -> Result<(), ActionError> {
        if !ctx.is_get() {
            return Ok(());
        }

        let server_id = ctx.param_i64("serverId");
        if server_id <= 0 {
            return Err(ActionError::not_found("server"));
        }

        let call = ctx.admin_context();
        let server = ctx
            .rpc()
            .server_rpc()
            .find_enabled_server(&call, &FindEnabledServerRequest { server_id })
            .await?
            .server
            .ok_or_else(|| ActionError::not_found(format!("server {}", server_id)))?;

        ctx.set("serverId", &server.id);
        ctx.set("serverName", &server.name);
        ctx.set("server", &server);
        Ok(())
    }
}
