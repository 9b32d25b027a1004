//! Configuration shapes exchanged with the management backend.
//!
//! These mirror the JSON the backend stores for a server's web config.
//! The console never persists them; they live for one request.

pub mod gzip;
pub mod shared;
pub mod web;
pub mod websocket;

pub use gzip::{HttpGzipConfig, HttpGzipRef};
pub use shared::{SizeCapacity, SizeUnit, TimeDuration, TimeUnit};
pub use web::HttpWebConfig;
pub use websocket::{HttpWebsocketConfig, HttpWebsocketRef};
