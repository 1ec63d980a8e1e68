//! Port contracts for canonical document persistence.

mod store;

pub use store::{CanonicalStore, CanonicalStoreError, CanonicalStoreResult};
