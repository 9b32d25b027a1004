//! Node clusters.

pub mod cluster;
pub mod helper;
pub mod nodeutils;

pub use helper::ClusterHelper;
