//! Liveness checks for canonical servers.
//!
//! Checks are read-only: results are reported to the caller and only feed
//! the canonical document through an explicit [`services::disable_failing`]
//! call.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
