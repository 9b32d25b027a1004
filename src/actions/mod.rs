//! Action framework.
//!
//! # Data Flow
//! ```text
//! Request
//!     → route helpers (auth first, then context loaders)
//!     → Action::init (menus)
//!     → params decoded into the action's typed struct
//!     → Action::run_get / Action::run_post
//!     → pending operation log written
//!     → Show (template) | Success (JSON envelope) | error page
//! ```
//!
//! # Design Decisions
//! - One action type per page; GET renders, POST mutates
//! - Params are typed per verb so a handler only sees what it reads
//! - The context owns everything the handler may touch

pub mod context;
pub mod error;
pub mod must;
pub mod oplog;
pub mod page;
pub mod params;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub use context::{ActionContext, AdminContext, Nav};
pub use error::{ActionError, ActionResponse, ActionResult};
pub use oplog::{LogLevel, OpLogEntry, OpLogWriter, RpcOpLogWriter};
pub use page::{Page, DEFAULT_PAGE_SIZE};
pub use params::{form_bool, form_int, NoParams, RawParams};

/// A page of the console.
///
/// Verbs the action does not override answer `405`.
#[async_trait]
pub trait Action: Send + Sync + 'static {
    type GetParams: DeserializeOwned + Send;
    type PostParams: DeserializeOwned + Send;

    fn init(&self, _ctx: &mut ActionContext) {}

    async fn run_get(&self, _ctx: &mut ActionContext, _params: Self::GetParams) -> ActionResult {
        Err(ActionError::MethodNotAllowed)
    }

    async fn run_post(&self, _ctx: &mut ActionContext, _params: Self::PostParams) -> ActionResult {
        Err(ActionError::MethodNotAllowed)
    }
}
