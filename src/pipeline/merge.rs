//! Concatenation: append single-page PDFs, in the order given, into one file.
//!
//! The caller owns ordering. Files are appended exactly as listed; nothing is
//! sorted or deduplicated here.

use crate::error::Pdf2PdfImageError;
use pdfium_render::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Merge `inputs` into `output` and return the output page count.
pub fn merge_pages(
    pdfium: &Pdfium,
    inputs: &[PathBuf],
    output: &Path,
) -> Result<usize, Pdf2PdfImageError> {
    let mut merged = pdfium
        .create_new_pdf()
        .map_err(|e| merge_error(output, e))?;

    for path in inputs {
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| merge_error(path, e))?;
        merged
            .pages_mut()
            .append(&document)
            .map_err(|e| merge_error(path, e))?;
        debug!("Appended {}", path.display());
    }

    let page_count = merged.pages().len() as usize;
    let bytes = merged
        .save_to_bytes()
        .map_err(|e| merge_error(output, e))?;

    write_atomically(output, &bytes)?;
    info!(
        "Wrote {} pages ({} bytes) to {}",
        page_count,
        bytes.len(),
        output.display()
    );

    Ok(page_count)
}

fn merge_error(path: &Path, e: PdfiumError) -> Pdf2PdfImageError {
    Pdf2PdfImageError::MergeFailed {
        path: path.to_path_buf(),
        detail: format!("{:?}", e),
    }
}

/// Write `bytes` to `path` via a temp file in the same directory, then rename.
///
/// An existing file at `path` is replaced; a failed write leaves it intact.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), Pdf2PdfImageError> {
    let write_err = |source: std::io::Error| Pdf2PdfImageError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("resultado.pdf");
        write_atomically(&out, b"%PDF-1.7 first").unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"%PDF-1.7 first");
    }

    #[test]
    fn atomic_write_overwrites_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("resultado.pdf");
        write_atomically(&out, b"old").unwrap();
        write_atomically(&out, b"new contents").unwrap();

        assert_eq!(std::fs::read(&out).unwrap(), b"new contents");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1, "temp file left behind");
    }

    #[test]
    fn atomic_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("resultado.pdf");
        let err = write_atomically(&out, b"x").unwrap_err();
        assert!(matches!(err, Pdf2PdfImageError::OutputWriteFailed { .. }));
        assert!(!out.exists());
    }
}
