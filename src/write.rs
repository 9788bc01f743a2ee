//! Writing fixed output back to disk.

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Path has no parent directory: {0}")]
    NoParent(PathBuf),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Atomic file write: tempfile + fsync + rename, then bump the mtime.
///
/// Either the full write lands or the file is left as it was.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), WriteError> {
    // Same directory keeps the rename on one filesystem
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => return Err(WriteError::NoParent(path.to_path_buf())),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    filetime::set_file_mtime(path, filetime::FileTime::now())?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");

    Ok(())
}
