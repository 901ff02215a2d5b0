//! # GoGoG code runner
//!
//! Runs a submitted Go snippet with `go run` in a child process, under a
//! wall-clock timeout, and reports a normalized result. Each execution writes
//! its source to a uniquely named temporary file that is removed however the
//! run ends.
//!
//! No resource isolation is applied to the child beyond the timeout.

mod artifact;
mod config;
mod error;
mod invoker;
mod normalize;
mod runner;
mod types;

#[cfg(test)]
mod tests;

pub use artifact::SourceArtifact;
pub use config::{RunnerConfig, DEFAULT_TIMEOUT};
pub use error::{Error, FailureKind};
pub use invoker::ProcessInvoker;
pub use normalize::normalize;
pub use runner::CodeRunner;
pub use types::{ExecutionRequest, ExecutionResult, RawOutput};

/// Result type for code execution operations
pub type Result<T> = std::result::Result<T, Error>;
