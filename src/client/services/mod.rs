//! Services over the client adapter set.

mod registry;

pub use registry::{ALL_CLIENTS, ClientRegistry, ClientRegistryError};
