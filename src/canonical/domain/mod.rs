//! Domain model for the canonical server catalogue.
//!
//! The canonical document owns server definitions, their desired enabled
//! state, and named profiles. Persistence concerns remain outside this
//! boundary.

mod document;
mod error;
mod name;
mod server;

pub use document::{CanonicalDocument, DOCUMENT_VERSION, DocumentMeta, ProfileApplication};
pub use error::CanonicalDomainError;
pub use name::ServerName;
pub use server::{CanonicalServer, HealthCheckSpec, RemediationPolicy};
