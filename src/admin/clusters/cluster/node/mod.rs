//! Pages of a single node.

pub mod index;
pub mod install;
pub mod logs;
pub mod status;
pub mod update;
pub mod update_install_status;

pub use index::NodeAction;
pub use install::InstallAction;
pub use logs::LogsAction;
pub use status::StatusAction;
pub use update::UpdateAction;
pub use update_install_status::UpdateInstallStatusAction;
