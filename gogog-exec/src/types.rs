use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Source text submitted for a single execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    code: String,
}

impl ExecutionRequest {
    /// Build a request, rejecting empty (or whitespace-only) source.
    ///
    /// Nothing else is checked here: programs that do not compile are
    /// expected to fail in the toolchain, not be rejected up front.
    pub fn new(code: impl Into<String>) -> Result<Self, Error> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(Error::InvalidRequest("code must not be empty".to_string()));
        }
        Ok(Self { code })
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Outcome of one execution as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Combined stdout and stderr, trimmed
    pub output: String,
    /// Failure detail, empty on success
    pub error: String,
    pub success: bool,
}

/// What the invoker observed from a child that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the child was terminated by a signal
    pub exit_code: Option<i32>,
}

impl RawOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The toolchain failure this output represents, if any.
    pub fn failure(&self) -> Option<Error> {
        if self.success() {
            None
        } else {
            Some(Error::ToolchainFailure {
                code: self.exit_code,
                stderr: self.stderr.clone(),
            })
        }
    }
}
