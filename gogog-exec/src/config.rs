use std::path::PathBuf;
use std::time::Duration;

/// Default wall-clock limit for a single execution.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for a [`CodeRunner`](crate::CodeRunner), fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Toolchain binary, resolved on `PATH`
    pub toolchain: String,

    /// Arguments placed before the artifact path
    pub toolchain_args: Vec<String>,

    /// Extension given to the temporary source file, without the dot
    pub file_extension: String,

    /// Wall-clock limit before the child is killed
    pub timeout: Duration,

    /// Directory temporary source files are created in
    pub temp_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            toolchain: "go".to_string(),
            toolchain_args: vec!["run".to_string()],
            file_extension: "go".to_string(),
            timeout: DEFAULT_TIMEOUT,
            temp_dir: std::env::temp_dir(),
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toolchain(mut self, toolchain: impl Into<String>) -> Self {
        self.toolchain = toolchain.into();
        self
    }

    pub fn with_toolchain_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.toolchain_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }
}
