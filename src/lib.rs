//! Switchboard: one canonical list of MCP servers, reconciled into many
//! client applications.
//!
//! The canonical document owns every server definition and its desired
//! enabled state. Each supported client keeps its own configuration file in
//! its own shape; Switchboard merges canonical intent into those files
//! without disturbing entries or settings it does not own, and guards every
//! write with a diff, an approval step, and a timestamped backup.
//!
//! # Architecture
//!
//! Bounded contexts follow hexagonal architecture principles:
//!
//! - **Domain**: Pure data and rules with no I/O
//! - **Ports**: Trait seams for storage, client files, and probes
//! - **Adapters**: JSON files, per-client layouts, process/HTTP/TCP probes
//! - **Services**: Orchestration over the ports
//!
//! # Modules
//!
//! - [`canonical`]: The canonical document, its stores, and profiles
//! - [`resolver`]: Fuzzy matching of free-text queries to servers
//! - [`client`]: Client adapters and per-user path roots
//! - [`reconcile`]: Merge, diff, approval, backup, and write
//! - [`health`]: Concurrent liveness checks and auto-disable
//! - [`operations`]: The command surface driven by a front end
//! - [`config`]: Tunable defaults and environment overrides
//! - [`error`]: The crate-wide error taxonomy

pub mod canonical;
pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod operations;
pub mod reconcile;
pub mod resolver;

mod fs_utils;

#[cfg(test)]
mod test_support;
