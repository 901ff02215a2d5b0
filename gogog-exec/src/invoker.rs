use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command;
use tokio::time::{self, Duration};
use tracing::{debug, warn};

use crate::{config::RunnerConfig, error::Error, types::RawOutput};

/// Spawns the toolchain against an artifact and waits for it under a deadline.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessInvoker {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(
            config.toolchain.clone(),
            config.toolchain_args.clone(),
            config.timeout,
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute path of the toolchain binary.
    pub fn resolve_program(&self) -> Result<PathBuf, Error> {
        let program = Path::new(&self.program);
        if program.is_absolute() || self.program.starts_with("./") {
            return Ok(program.to_path_buf());
        }
        which::which(&self.program).map_err(|_| Error::ToolchainNotFound(self.program.clone()))
    }

    /// Run `<program> <args...> <source>` and collect its output.
    ///
    /// Returns [`Error::Timeout`] if the child is still running when the
    /// deadline passes; the child's whole process group is killed first.
    pub async fn invoke(&self, source: &Path) -> Result<RawOutput, Error> {
        let program = self.resolve_program()?;

        debug!("Invoke - Command: {:?}", program);
        debug!("Invoke - Args: {:?} {:?}", self.args, source);

        let mut command = Command::new(&program);
        command
            .args(&self.args)
            .arg(source)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // `go run` execs the built binary as its own child; a fresh group lets
        // a timeout take both down.
        #[cfg(unix)]
        command.process_group(0);

        let started = Instant::now();
        let child = command
            .spawn()
            .map_err(|e| Error::Spawn(format!("{}: {}", self.program, e)))?;
        let group = ProcessGroupGuard::new(child.id());

        match time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                group.disarm();
                debug!(
                    "Invoke - {:?} finished in {:?} with {}",
                    program,
                    started.elapsed(),
                    output.status
                );
                Ok(RawOutput {
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                    exit_code: output.status.code(),
                })
            }
            Ok(Err(e)) => Err(Error::Io(e)),
            Err(_) => {
                warn!(
                    "Process {:?} exceeded {:?}, killing it",
                    group.id, self.timeout
                );
                Err(Error::Timeout(self.timeout))
            }
        }
    }
}

/// Kills the child's process group when dropped, unless disarmed.
///
/// Covers the timeout path as well as the caller dropping `invoke` midway.
struct ProcessGroupGuard {
    id: Option<u32>,
}

impl ProcessGroupGuard {
    fn new(id: Option<u32>) -> Self {
        Self { id }
    }

    fn disarm(mut self) {
        self.id = None;
    }
}

impl Drop for ProcessGroupGuard {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            kill_process_group(id);
        }
    }
}

#[cfg(unix)]
fn kill_process_group(id: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    if let Err(e) = killpg(Pid::from_raw(id as i32), Signal::SIGKILL) {
        // ESRCH: the group already exited on its own.
        if e != nix::errno::Errno::ESRCH {
            warn!("Failed to kill process group {}: {}", id, e);
        }
    }
}

// Elsewhere the dropped child is killed through `kill_on_drop`.
#[cfg(not(unix))]
fn kill_process_group(_id: u32) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::skip_if_not_available;
    use tempfile::tempdir;

    fn sh(timeout: Duration) -> ProcessInvoker {
        ProcessInvoker::new("sh", Vec::new(), timeout)
    }

    async fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("script.sh");
        tokio::fs::write(&path, body).await.unwrap();
        path
    }

    #[tokio::test]
    async fn collects_streams_separately() -> Result<(), Error> {
        if skip_if_not_available(&["sh"]) {
            return Ok(());
        }
        let dir = tempdir()?;
        let path = script(dir.path(), "echo out\necho err >&2\n").await;

        let raw = sh(Duration::from_secs(5)).invoke(&path).await?;
        assert_eq!(raw.stdout, "out\n");
        assert_eq!(raw.stderr, "err\n");
        assert_eq!(raw.exit_code, Some(0));
        assert!(raw.success());
        Ok(())
    }

    #[tokio::test]
    async fn reports_exit_code() -> Result<(), Error> {
        if skip_if_not_available(&["sh"]) {
            return Ok(());
        }
        let dir = tempdir()?;
        let path = script(dir.path(), "echo nope >&2\nexit 3\n").await;

        let raw = sh(Duration::from_secs(5)).invoke(&path).await?;
        assert_eq!(raw.exit_code, Some(3));
        assert!(!raw.success());
        Ok(())
    }

    #[tokio::test]
    async fn timeout_kills_child_and_grandchildren() -> Result<(), Error> {
        if skip_if_not_available(&["sh", "sleep"]) {
            return Ok(());
        }
        let dir = tempdir()?;
        let marker = dir.path().join("late");
        let body = format!("(sleep 2; touch {}) &\nsleep 60\n", marker.display());
        let path = script(dir.path(), &body).await;

        let started = Instant::now();
        let result = sh(Duration::from_millis(300)).invoke(&path).await;
        assert!(matches!(result, Err(Error::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(5));

        // The backgrounded subshell shared the group and must not survive.
        time::sleep(Duration::from_secs(3)).await;
        assert!(!marker.exists());
        Ok(())
    }

    #[tokio::test]
    async fn missing_toolchain_is_reported() {
        let invoker = ProcessInvoker::new(
            "gogog-no-such-toolchain",
            vec!["run".into()],
            Duration::from_secs(1),
        );
        let result = invoker.invoke(Path::new("main.go")).await;
        assert!(matches!(result, Err(Error::ToolchainNotFound(name)) if name == "gogog-no-such-toolchain"));
    }

    #[tokio::test]
    async fn unspawnable_path_is_a_spawn_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing-binary");
        let invoker = ProcessInvoker::new(
            missing.to_string_lossy().to_string(),
            Vec::new(),
            Duration::from_secs(1),
        );
        let result = invoker.invoke(Path::new("main.go")).await;
        assert!(matches!(result, Err(Error::Spawn(_))));
    }
}
