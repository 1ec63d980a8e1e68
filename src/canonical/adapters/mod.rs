//! Adapter implementations for canonical document persistence.

pub mod json_file;
pub mod memory;

pub use json_file::{JsonFileCanonicalStore, default_document_path};
pub use memory::InMemoryCanonicalStore;
