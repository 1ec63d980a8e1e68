//! Probe implementations, one per check type.

pub mod http;
pub mod stdio;
pub mod tcp;

pub use http::HttpChecker;
pub use stdio::{DEFAULT_STDIO_GRACE, StdioChecker};
pub use tcp::{TcpChecker, tcp_address};
