//! Port contracts for client configuration access.

pub mod adapter;

pub use adapter::{ClientAdapter, ClientAdapterError, ClientAdapterResult};
