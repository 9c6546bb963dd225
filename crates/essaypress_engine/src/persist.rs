use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::ArchiveConfig;

/// Filesystem failure while writing one artifact. Fatal for that artifact
/// only; the fetch stage counts these and keeps going.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the output directory exists and is writable; create it if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), WriteError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| WriteError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(WriteError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| WriteError::OutputDir(e.to_string()))?;
    }
    // Writability probe: creating a temp file fails fast on a read-only dir.
    NamedTempFile::new_in(dir).map_err(|e| WriteError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes `{dir}/{filename}` atomically: temp file, flush, rename.
///
/// Always overwrites. A rerun over unchanged input therefore produces the
/// same bytes at the same path, and an interrupted run never leaves a
/// half-written file behind.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, WriteError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| WriteError::Io(e.error))?;
        Ok(target)
    }
}

/// Remove every generated output (essay directory, artifacts, manifest).
/// Returns the paths that actually existed and were removed.
pub fn clean_outputs(config: &ArchiveConfig) -> io::Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for path in config.generated_paths() {
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
            removed.push(path);
        } else if path.exists() {
            fs::remove_file(&path)?;
            removed.push(path);
        }
    }
    Ok(removed)
}
