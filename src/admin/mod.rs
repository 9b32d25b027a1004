//! Console pages.
//!
//! Each feature area registers its route groups here, in a fixed order,
//! when the server starts.

pub mod auth;
pub mod clusters;
pub mod health;
pub mod servers;

use crate::routing::{RouteError, RouteTable};

/// The complete route table of the console.
pub fn routes() -> Result<RouteTable, RouteError> {
    let mut table = RouteTable::new();

    table
        .group("/health")
        .public()
        .get("", health::HealthAction)
        .end()?;

    clusters::cluster::register(&mut table)?;
    servers::settings::register(&mut table)?;

    tracing::debug!(routes = table.len(), "Route table built");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteMethod;

    #[test]
    fn test_routes_build() {
        let table = routes().unwrap();

        assert!(table.contains(RouteMethod::Get, "/health"));
        assert!(table.contains(RouteMethod::Get, "/clusters/cluster"));
        assert!(table.contains(RouteMethod::Post, "/clusters/cluster/installStatus"));
        assert!(!table.contains(RouteMethod::Get, "/clusters/cluster/installStatus"));
        assert!(table.contains(RouteMethod::Get, "/clusters/cluster/node/logs"));
        assert!(table.contains(RouteMethod::Post, "/servers/server/settings/gzip"));
        assert!(table.contains(RouteMethod::Post, "/servers/server/settings/locations/websocket"));
        assert_eq!(
            table.template("/servers/server/settings/locations/gzip"),
            Some("servers/server/settings/locations/gzip/index.html")
        );
    }

    #[test]
    fn test_every_shown_template_exists() {
        let engine = crate::templates::MiniJinjaEngine::new();
        let view = serde_json::json!({
            "productName": "Edge Admin",
            "nav": {"menu": "", "tab": "node"},
            "clusterId": 1,
            "cluster": {"id": 1, "name": "default"},
            "server": {"id": 2, "name": "example.com"},
            "node": {"id": 3, "name": "edge-1", "ipAddresses": [{"ip": "10.0.0.1"}]},
            "nodes": [{"id": 3, "name": "edge-1", "ipAddresses": []}],
            "logs": [],
            "page": {"total": 1, "size": 20, "current": 1, "max": 1},
            "endpoints": ["http://127.0.0.1:8003"],
            "params": {"host": "", "port": 22, "grantId": 0},
            "loginParams": {"host": "", "port": 22, "grantId": 0},
            "webId": 5,
            "gzipRef": {"isPrior": false, "isOn": false, "gzipId": 0},
            "gzipConfig": {"id": 0, "isOn": true, "level": 0},
            "websocketRef": {"isPrior": false, "isOn": false, "websocketId": 0},
            "websocketConfig": {"allowedOrigins": []},
        });
        let table = routes().unwrap();
        let get_paths: Vec<String> = table
            .routes()
            .filter(|(m, p)| *m == RouteMethod::Get && *p != "/health")
            .map(|(_, p)| p.to_string())
            .collect();

        for path in get_paths {
            let template = table.template(&path).unwrap();
            let result = crate::templates::TemplateEngine::render(
                &engine,
                template,
                minijinja::Value::from_serialize(&view),
            );
            assert!(result.is_ok(), "template {} failed: {:?}", template, result.err());
        }
    }
}
