//! Client applications whose configuration files are reconciled.
//!
//! - Domain types in [`domain`]: client state, the server entry shape, and
//!   per-user directory roots
//! - The [`ports::ClientAdapter`] capability set
//! - One adapter per supported client in [`adapters`]
//! - The per-invocation [`services::ClientRegistry`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
