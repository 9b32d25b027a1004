//! Settings pages of a server and of its locations.

pub mod gzip;
pub mod webutils;
pub mod websocket;

use crate::admin::auth::UserMustAuth;
use crate::admin::servers::ServerHelper;
use crate::routing::{RouteError, RouteTable};

pub fn register(table: &mut RouteTable) -> Result<(), RouteError> {
    table
        .group("/servers/server/settings/gzip")
        .helper(UserMustAuth)
        .helper(ServerHelper)
        .get_post("", gzip::GzipAction::server())
        .end()?;

    table
        .group("/servers/server/settings/websocket")
        .helper(UserMustAuth)
        .helper(ServerHelper)
        .get_post("", websocket::WebsocketAction::server())
        .end()?;

    table
        .group("/servers/server/settings/locations/gzip")
        .helper(UserMustAuth)
        .helper(ServerHelper)
        .get_post("", gzip::GzipAction::location())
        .end()?;

    table
        .group("/servers/server/settings/locations/websocket")
        .helper(UserMustAuth)
        .helper(ServerHelper)
        .get_post("", websocket::WebsocketAction::location())
        .end()
}
