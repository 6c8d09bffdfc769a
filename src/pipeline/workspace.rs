//! Working directories: create them before a run, remove scratch after.
//!
//! [`ScratchDir`] behaves like `tempfile::TempDir` at a fixed location: it
//! removes the directory on drop, and [`ScratchDir::close`] does the same
//! while reporting failures.

use crate::error::Pdf2PdfImageError;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Create `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), Pdf2PdfImageError> {
    std::fs::create_dir_all(dir).map_err(|source| Pdf2PdfImageError::WorkspaceIo {
        path: dir.to_path_buf(),
        source,
    })
}

/// Recursively remove `dir`. A directory that does not exist is not an error.
pub fn cleanup_scratch(dir: &Path) -> io::Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {
            debug!("Removed scratch directory {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Owns the scratch directory for the duration of one run.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    removed: bool,
}

impl ScratchDir {
    /// Create the directory (idempotent) and take ownership of it.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, Pdf2PdfImageError> {
        let path = path.into();
        ensure_dir(&path)?;
        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now.
    pub fn close(mut self) -> io::Result<()> {
        self.removed = true;
        cleanup_scratch(&self.path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = cleanup_scratch(&self.path) {
            warn!(
                "Could not remove scratch directory {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_of_missing_dir_is_noop() {
        let root = tempfile::tempdir().unwrap();
        let scratch = root.path().join("_temporario");
        cleanup_scratch(&scratch).unwrap();
        cleanup_scratch(&scratch).unwrap();
        assert!(!scratch.exists());
    }

    #[test]
    fn cleanup_removes_contents() {
        let root = tempfile::tempdir().unwrap();
        let scratch = root.path().join("_temporario");
        std::fs::create_dir_all(scratch.join("nested")).unwrap();
        std::fs::write(scratch.join("page_1.pdf"), b"x").unwrap();
        std::fs::write(scratch.join("nested").join("page_2.pdf"), b"y").unwrap();

        cleanup_scratch(&scratch).unwrap();
        assert!(!scratch.exists());
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("a").join("saida");
        ensure_dir(&out).unwrap();
        ensure_dir(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn scratch_dir_close_removes() {
        let root = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(root.path().join("_temporario")).unwrap();
        let path = scratch.path().to_path_buf();
        std::fs::write(path.join("page_1.pdf"), b"x").unwrap();
        assert!(path.is_dir());

        scratch.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn scratch_dir_drop_removes() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("_temporario");
        {
            let _scratch = ScratchDir::create(&path).unwrap();
            assert!(path.is_dir());
        }
        assert!(!path.exists());
    }

    #[test]
    fn scratch_dir_reuses_existing_directory() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("_temporario");
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join("stale.pdf"), b"old").unwrap();

        let scratch = ScratchDir::create(&path).unwrap();
        assert!(scratch.path().join("stale.pdf").exists());
        scratch.close().unwrap();
        assert!(!path.exists());
    }
}
