//! Client-side domain types.

mod entry;
mod platform;
mod state;

pub use entry::ServerEntry;
pub(crate) use platform::join_all;
pub use platform::{ClientPathError, Platform, PlatformDirs};
pub use state::{ClientState, StateOrigin};
