//! Configuration schema and subcommands behind the `latnet` binary.

pub mod commands;
pub mod config;

pub use config::{ConstructionKind, DesignConfig, GenValueConfig, NetConfig};
