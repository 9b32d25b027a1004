//! Servers.

pub mod helper;
pub mod settings;

pub use helper::ServerHelper;
