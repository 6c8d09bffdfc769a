//! Input resolution: turn what the user typed into a path that exists.
//!
//! No format check happens here. A file that is not a PDF is left for
//! pdfium to reject when it is opened.

use crate::error::Pdf2PdfImageError;
use crate::progress::{ConversionProgressCallback, Stage};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Announce [`Stage::Prompting`] on `progress`, then read the input path
/// from `reader`.
pub fn prompt_for_input<R: BufRead>(
    reader: &mut R,
    progress: &dyn ConversionProgressCallback,
) -> Result<PathBuf, Pdf2PdfImageError> {
    progress.on_stage(Stage::Prompting);
    read_input_path(reader)
}

/// Read one line from `reader` and resolve it as the input path.
///
/// The line is taken as raw bytes, so paths that are not valid UTF-8 are
/// kept intact on Unix. Surrounding whitespace and a single pair of matching
/// quotes are removed, since dragging a file onto a terminal usually quotes
/// its path.
pub fn read_input_path<R: BufRead>(reader: &mut R) -> Result<PathBuf, Pdf2PdfImageError> {
    let mut line = Vec::new();
    reader
        .read_until(b'\n', &mut line)
        .map_err(|source| Pdf2PdfImageError::InputRead { source })?;
    resolve_local(path_from_bytes(clean_line(&line)))
}

/// Validate that `path` exists.
pub fn resolve_local(path: impl AsRef<Path>) -> Result<PathBuf, Pdf2PdfImageError> {
    let path = path.as_ref().to_path_buf();

    if path.as_os_str().is_empty() || !path.exists() {
        return Err(Pdf2PdfImageError::InputNotFound { path });
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}

fn clean_line(line: &[u8]) -> &[u8] {
    let s = line.trim_ascii();
    for quote in [b'"', b'\''] {
        if s.len() >= 2 && s[0] == quote && s[s.len() - 1] == quote {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}
