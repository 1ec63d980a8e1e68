//! Confirmation step between computing a change and writing it.

use super::ConfigDiff;
use camino::Utf8Path;
use std::io::{BufRead, Write};
use thiserror::Error;

/// A pending change awaiting approval.
#[derive(Debug, Clone, Copy)]
pub struct ApprovalRequest<'a> {
    /// Client identifier.
    pub client: &'a str,
    /// File about to be rewritten.
    pub path: &'a Utf8Path,
    /// Proposed change.
    pub diff: &'a ConfigDiff,
}

/// Errors raised while asking for approval.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// The prompt could not be written or the answer read.
    #[error("failed to prompt for approval: {0}")]
    Io(#[from] std::io::Error),
}

/// Decides whether a pending change may be written.
pub trait ApprovalGate {
    /// Returns `true` to approve the change.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError`] when the decision cannot be obtained.
    fn approve(&mut self, request: &ApprovalRequest<'_>) -> Result<bool, ApprovalError>;
}

/// Approves every change without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl ApprovalGate for AutoApprove {
    fn approve(&mut self, _request: &ApprovalRequest<'_>) -> Result<bool, ApprovalError> {
        Ok(true)
    }
}

/// Declines every change. Useful for dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl ApprovalGate for DenyAll {
    fn approve(&mut self, _request: &ApprovalRequest<'_>) -> Result<bool, ApprovalError> {
        Ok(false)
    }
}

/// Shows the diff and asks a yes/no question.
///
/// Only `y` or `yes`, in any case, approves; everything else, including an
/// empty answer or end of input, declines.
#[derive(Debug)]
pub struct PromptApproval<R, W> {
    input: R,
    output: W,
    context: usize,
}

impl<R, W> PromptApproval<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Creates a prompt over `input` and `output`.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            context: super::DEFAULT_CONTEXT,
        }
    }

    /// Sets the number of context lines shown around changes.
    #[must_use]
    pub const fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }
}

impl<R, W> ApprovalGate for PromptApproval<R, W>
where
    R: BufRead,
    W: Write,
{
    fn approve(&mut self, request: &ApprovalRequest<'_>) -> Result<bool, ApprovalError> {
        writeln!(self.output, "{} ({})", request.client, request.path)?;
        write!(self.output, "{}", request.diff.render_unified(self.context))?;
        write!(
            self.output,
            "Apply these changes to {}? [y/N]: ",
            request.client
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    let trimmed = answer.trim();
    trimmed.eq_ignore_ascii_case("y") || trimmed.eq_ignore_ascii_case("yes")
}
