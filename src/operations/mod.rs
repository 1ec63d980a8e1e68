//! User-facing operations over the canonical store and client set.
//!
//! [`Switchboard`] is what a command-line or terminal UI front end drives:
//! enable, disable, and toggle by fuzzy query; status; health with an
//! optional fix; apply with an optional profile; and profile management.
//! Prompts are injected as [`Disambiguator`](crate::resolver::Disambiguator)
//! and [`ApprovalGate`](crate::reconcile::ApprovalGate) values so the
//! operations never touch the terminal themselves.

mod error;
mod reports;
mod switchboard;

pub use error::{OperationError, OperationResult};
pub use reports::{ApplyReport, HealthRun, ToggleMode, ToggleReport};
pub use switchboard::Switchboard;

#[cfg(test)]
mod tests;
