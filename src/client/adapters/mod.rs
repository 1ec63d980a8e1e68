//! Client adapter implementations.
//!
//! Every supported client stores servers in a JSON object, so each client
//! module only supplies its identity, its path, and a [`ConfigLayout`] for
//! the shared [`JsonConfigClient`].

pub mod claude;
pub mod cline;
pub mod cursor;
mod json_config;
pub mod vscode;
pub mod warp;

pub use json_config::{ConfigLayout, JsonConfigClient};
