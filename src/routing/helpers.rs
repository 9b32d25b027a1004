//! Route helpers.
//!
//! A helper runs before every action of its group, in registration order.
//! An error from a helper ends the request before the action is reached.

use async_trait::async_trait;

use crate::actions::{ActionContext, ActionError};

#[async_trait]
pub trait Helper: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Whether this helper authenticates the caller. Protected groups must
    /// start with one.
    fn is_auth(&self) -> bool {
        false
    }

    async fn before_action(&self, ctx: &mut ActionContext) -> Result<(), ActionError>;
}
