//! Folding invoker outcomes into [`ExecutionResult`]s.

use crate::{
    error::Error,
    types::{ExecutionResult, RawOutput},
};

impl ExecutionResult {
    /// Normalize a completed run.
    ///
    /// `output` keeps stdout followed by stderr even on failure, so warnings
    /// or partial output printed before a crash stay visible; the failure
    /// detail on its own is in `error`.
    pub fn from_raw(raw: RawOutput) -> Self {
        let success = raw.success();
        let output = format!("{}{}", raw.stdout, raw.stderr).trim().to_string();
        let error = if success { String::new() } else { raw.stderr };

        Self {
            output,
            error,
            success,
        }
    }

    /// Normalize a run that never completed (timeout, IO, spawn, validation).
    pub fn from_error(error: &Error) -> Self {
        Self {
            output: String::new(),
            error: error.to_string(),
            success: false,
        }
    }

    pub fn timed_out() -> Self {
        Self::from_error(&Error::Timeout(Default::default()))
    }
}

/// Convert whatever the invoker produced into the public result shape.
pub fn normalize(outcome: Result<RawOutput, Error>) -> ExecutionResult {
    match outcome {
        Ok(raw) => ExecutionResult::from_raw(raw),
        Err(e) => ExecutionResult::from_error(&e),
    }
}
