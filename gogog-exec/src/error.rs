use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Execution timed out")]
    Timeout(Duration),

    #[error("Toolchain exited with status {}: {stderr}", display_code(.code))]
    ToolchainFailure { code: Option<i32>, stderr: String },

    #[error("Toolchain not found: {0}")]
    ToolchainNotFound(String),

    #[error("Failed to spawn process: {0}")]
    Spawn(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], used for logging and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The child outlived its deadline and was killed.
    Timeout,
    /// The toolchain ran to completion with a non-zero exit.
    Toolchain,
    /// Artifact handling, toolchain lookup or process spawning failed.
    Environment,
    /// The request was rejected before anything ran.
    InvalidRequest,
}

impl Error {
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Timeout(_) => FailureKind::Timeout,
            Error::ToolchainFailure { .. } => FailureKind::Toolchain,
            Error::ToolchainNotFound(_) | Error::Spawn(_) | Error::Io(_) => {
                FailureKind::Environment
            }
            Error::InvalidRequest(_) => FailureKind::InvalidRequest,
        }
    }
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}
