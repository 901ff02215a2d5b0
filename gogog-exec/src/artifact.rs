use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Error;

const ARTIFACT_PREFIX: &str = "gogog-";

/// Temporary file holding the source of one execution.
///
/// The file is created with a random name (`O_EXCL`), so concurrent
/// acquisitions never share a path. It is removed by [`release`], or when the
/// artifact is dropped on any other exit path.
///
/// [`release`]: SourceArtifact::release
#[derive(Debug)]
pub struct SourceArtifact {
    file: NamedTempFile,
}

impl SourceArtifact {
    /// Create `<dir>/gogog-XXXXXX.<extension>` and write `source` into it.
    pub fn acquire(dir: &Path, extension: &str, source: &str) -> Result<Self, Error> {
        let suffix = if extension.is_empty() {
            String::new()
        } else {
            format!(".{}", extension)
        };

        let mut file = tempfile::Builder::new()
            .prefix(ARTIFACT_PREFIX)
            .suffix(&suffix)
            .tempfile_in(dir)?;
        file.write_all(source.as_bytes())?;
        file.flush()?;

        debug!("Artifact created at {:?}", file.path());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file, reporting failures instead of swallowing them.
    pub fn release(self) -> Result<(), Error> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        debug!("Artifact removed from {:?}", path);
        Ok(())
    }
}
