use std::path::Path;

use tokio::time::Duration;
use which::which;

use crate::{CodeRunner, RunnerConfig};

pub fn default_timeout() -> Duration {
    Duration::from_secs(5)
}

pub fn short_timeout() -> Duration {
    Duration::from_millis(500)
}

/// Runner that treats each submission as a POSIX shell script.
pub fn sh_runner(temp_dir: &Path, timeout: Duration) -> CodeRunner {
    CodeRunner::new(
        RunnerConfig::new()
            .with_toolchain("sh")
            .with_toolchain_args(Vec::<String>::new())
            .with_file_extension("sh")
            .with_timeout(timeout)
            .with_temp_dir(temp_dir),
    )
}

/// Runner with the stock `go run` toolchain.
pub fn go_runner(temp_dir: &Path, timeout: Duration) -> CodeRunner {
    CodeRunner::new(
        RunnerConfig::default()
            .with_timeout(timeout)
            .with_temp_dir(temp_dir),
    )
}

/// Number of entries left in a directory.
pub fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

pub(crate) fn skip_if_not_available(tools: &[&str]) -> bool {
    let missing: Vec<_> = tools
        .iter()
        .filter(|tool| which(**tool).is_err())
        .map(|s| (*s).to_string())
        .collect();

    if !missing.is_empty() {
        eprintln!("Skipping test: {} not available", missing.join(", "));
        return true;
    }
    false
}
