//! Edge Admin: web console for managing edge node clusters and the
//! per-server settings they serve.

pub mod actions;
pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod rpc;
pub mod serverconfigs;
pub mod templates;

pub use config::schema::AdminConfig;
pub use http::AdminServer;
pub use lifecycle::Shutdown;
