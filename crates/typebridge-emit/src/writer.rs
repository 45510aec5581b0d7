//! Output directory housekeeping and atomic file writes

use crate::error::{EmitError, EmitResult, io};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A fully rendered output file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub contents: String,
}

impl RenderedFile {
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

/// Writes generated files into one output directory.
pub struct OutputWriter {
    dir: PathBuf,
    extension: String,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<name>.generated.<ext>`
    pub fn generated_name(&self, target_name: &str) -> String {
        format!("{target_name}.generated.{}", self.extension)
    }

    /// `index.<ext>`
    pub fn index_name(&self) -> String {
        format!("index.{}", self.extension)
    }

    fn is_owned(&self, file_name: &str) -> bool {
        file_name == self.index_name()
            || file_name.ends_with(&format!(".generated.{}", self.extension))
    }

    /// Create the directory if needed and remove every file a previous run
    /// generated. Other files are left alone. Returns the number removed.
    pub fn clean(&self) -> EmitResult<usize> {
        fs::create_dir_all(&self.dir).map_err(|e| io(&self.dir, e))?;

        let mut removed = 0;
        for entry in fs::read_dir(&self.dir).map_err(|e| io(&self.dir, e))? {
            let entry = entry.map_err(|e| io(&self.dir, e))?;
            let path = entry.path();
            let owned = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| self.is_owned(name));

            if owned && path.is_file() {
                fs::remove_file(&path).map_err(|e| io(&path, e))?;
                debug!(path = %path.display(), "Removed stale generated file");
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Write one file through a temporary file in the output directory and
    /// rename it into place. On failure the temporary file is removed.
    pub fn write(&self, file: &RenderedFile) -> EmitResult<PathBuf> {
        let path = self.dir.join(&file.file_name);

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(|e| io(&self.dir, e))?;
        temp.write_all(file.contents.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|e| io(temp.path(), e))?;
        temp.persist(&path).map_err(|e| EmitError::Persist {
            path: path.clone(),
            source: e.error,
        })?;

        debug!(path = %path.display(), bytes = file.contents.len(), "Wrote file");
        Ok(path)
    }

    /// Clean the directory, then write every file in order.
    pub fn write_all(&self, files: &[RenderedFile]) -> EmitResult<WriteSummary> {
        let removed = self.clean()?;

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            written.push(self.write(file)?);
        }

        Ok(WriteSummary { written, removed })
    }
}

/// Outcome of [`OutputWriter::write_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub removed: usize,
}
