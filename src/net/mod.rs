//! Network layer.
//!
//! Plain TCP is served by `axum::serve`; TLS by `axum_server` with a
//! rustls config loaded here.

pub mod tls;

pub use tls::load_tls_config;
