//! Export sink that writes documents into a directory.
//!
//! Each document is staged in a temporary file inside the target directory
//! and then persisted under its final name. A failed write leaves no
//! partial file behind; the staged file is removed when dropped.

use std::io::Write;
use std::path::{Path, PathBuf};

use credlens_core::{CredlensError, ExportSink};

/// Writes export documents to `dir/<filename>`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, filename: &str, content: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(filename);
        let mut staged = tempfile::NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content.as_bytes())?;
        staged.flush()?;
        staged.persist(&target).map_err(|e| e.error)?;
        Ok(target)
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&self, filename: &str, content: &str) -> Result<(), CredlensError> {
        if filename.contains(['/', '\\']) || filename.is_empty() {
            return Err(CredlensError::Export(format!(
                "refusing to write outside {}: {filename:?}",
                self.dir.display()
            )));
        }
        let target = self.write(filename, content).map_err(|e| {
            CredlensError::Export(format!(
                "failed to write {}: {e}",
                self.dir.join(filename).display()
            ))
        })?;
        tracing::debug!(path = %target.display(), bytes = content.len(), "wrote export");
        Ok(())
    }
}
