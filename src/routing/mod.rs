//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     admin::routes()
//!     → RouteTable::group(prefix).helper(..).get/post(..).end()
//!     → conflict and auth checks
//!     → RouteTable::into_router (frozen axum Router)
//!
//! Request:
//!     axum match → dispatch → helpers → action → response
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Every protected group starts with an authentication helper
//! - Re-registering a path with the same action is a no-op; with a different one an error

pub mod helpers;
pub mod table;

pub use helpers::Helper;
pub use table::{template_name, GroupBuilder, RouteError, RouteInfo, RouteMethod, RouteTable};
