use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    artifact::SourceArtifact,
    config::RunnerConfig,
    error::{Error, FailureKind},
    invoker::ProcessInvoker,
    normalize::normalize,
    types::{ExecutionRequest, ExecutionResult, RawOutput},
};

/// Runs submitted source through the configured toolchain.
///
/// Every call gets its own artifact and child process and nothing is shared
/// between calls, so a single runner can be cloned into any number of
/// concurrent request handlers.
#[derive(Debug, Clone)]
pub struct CodeRunner {
    config: Arc<RunnerConfig>,
    invoker: ProcessInvoker,
}

impl CodeRunner {
    pub fn new(config: RunnerConfig) -> Self {
        let invoker = ProcessInvoker::from_config(&config);
        Self {
            config: Arc::new(config),
            invoker,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Resolve the toolchain on `PATH`.
    pub fn check_toolchain(&self) -> Result<PathBuf, Error> {
        self.invoker.resolve_program()
    }

    /// Execute a request. Failures of any kind come back as an unsuccessful
    /// [`ExecutionResult`], never as an error.
    pub async fn execute(&self, request: ExecutionRequest) -> ExecutionResult {
        let id = Uuid::new_v4();
        debug!("Execution {} - {} bytes of source", id, request.code().len());

        let outcome = self.run(&request).await;

        match &outcome {
            Ok(raw) => match raw.failure() {
                None => info!("Execution {} completed successfully", id),
                Some(e) => info!("Execution {} failed: {}", id, e),
            },
            Err(e) => match e.kind() {
                FailureKind::Timeout => {
                    warn!("Execution {} timed out after {:?}", id, self.config.timeout)
                }
                _ => error!("Execution {} errored: {}", id, e),
            },
        }

        normalize(outcome)
    }

    /// Validate raw source and execute it.
    pub async fn execute_source(&self, code: &str) -> ExecutionResult {
        match ExecutionRequest::new(code) {
            Ok(request) => self.execute(request).await,
            Err(e) => {
                warn!("Rejected execution request: {}", e);
                ExecutionResult::from_error(&e)
            }
        }
    }

    async fn run(&self, request: &ExecutionRequest) -> Result<RawOutput, Error> {
        let artifact = SourceArtifact::acquire(
            &self.config.temp_dir,
            &self.config.file_extension,
            request.code(),
        )?;

        let outcome = self.invoker.invoke(artifact.path()).await;

        // The artifact goes away whatever the invocation did.
        let released = artifact.release();
        match (outcome, released) {
            (Ok(raw), Ok(())) => Ok(raw),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), released) => {
                if let Err(release_err) = released {
                    error!("Failed to remove artifact: {}", release_err);
                }
                Err(e)
            }
        }
    }
}
