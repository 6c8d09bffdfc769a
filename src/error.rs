//! Error types for the pdf2pdfimage library.
//!
//! Every fallible operation returns [`Pdf2PdfImageError`]. Two of its
//! variants are *recognized* failures that a front-end reports as a plain
//! message instead of a crash: the input file is missing, or the pdfium
//! renderer cannot be bound. [`Pdf2PdfImageError::kind`] tells them apart
//! from everything else.

use std::path::PathBuf;
use thiserror::Error;

/// The failures a front-end is expected to handle gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The user-supplied path does not exist.
    InputNotFound,
    /// No pdfium library could be bound.
    RendererBackendMissing,
}

/// All errors returned by the pdf2pdfimage library.
#[derive(Debug, Error)]
pub enum Pdf2PdfImageError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// The input path could not be read from the terminal.
    #[error("Could not read the input path: {source}")]
    InputRead {
        #[source]
        source: std::io::Error,
    },

    // ── Renderer errors ───────────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {detail}\n\n\
You can:\n\
  • Unpack a pdfium-binaries release into a `pdfium-*` folder next to the program.\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n\
  • Install pdfium system-wide.\n"
    )]
    RendererBackendMissing {
        library: Option<PathBuf>,
        detail: String,
    },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The renderer could not open the source document.
    #[error("PDF '{path}' could not be opened: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// Copying a page range into a standalone batch document failed.
    #[error("Could not extract pages {first}-{last} into a batch: {detail}")]
    BatchExtractionFailed {
        first: usize,
        last: usize,
        detail: String,
    },

    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    /// A rendered page could not be written as a single-page PDF.
    #[error("Failed to write rendered page '{path}': {detail}")]
    PageWriteFailed { path: PathBuf, detail: String },

    /// Concatenating rendered pages failed.
    #[error("Failed to merge '{path}': {detail}")]
    MergeFailed { path: PathBuf, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or remove a working directory.
    #[error("Working directory error at '{path}': {source}")]
    WorkspaceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Pdf2PdfImageError {
    /// The recognized failure kind, or `None` for any other error.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::InputNotFound { .. } => Some(FailureKind::InputNotFound),
            Self::RendererBackendMissing { .. } => Some(FailureKind::RendererBackendMissing),
            _ => None,
        }
    }
}

impl From<pdfium_locate::LocateError> for Pdf2PdfImageError {
    fn from(e: pdfium_locate::LocateError) -> Self {
        use pdfium_locate::LocateError;

        let library = match &e {
            LocateError::Missing { path } | LocateError::Bind { path, .. } => Some(path.clone()),
            LocateError::SystemLibrary { .. } => None,
        };
        Pdf2PdfImageError::RendererBackendMissing {
            library,
            detail: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_kinds() {
        let e = Pdf2PdfImageError::InputNotFound {
            path: "missing.pdf".into(),
        };
        assert_eq!(e.kind(), Some(FailureKind::InputNotFound));

        let e = Pdf2PdfImageError::RendererBackendMissing {
            library: None,
            detail: "not installed".into(),
        };
        assert_eq!(e.kind(), Some(FailureKind::RendererBackendMissing));
    }

    #[test]
    fn other_errors_have_no_kind() {
        let e = Pdf2PdfImageError::RasterisationFailed {
            page: 3,
            detail: "boom".into(),
        };
        assert_eq!(e.kind(), None);
        assert!(e.to_string().contains("page 3"));
    }

    #[test]
    fn locate_error_maps_to_backend_missing() {
        let e: Pdf2PdfImageError = pdfium_locate::LocateError::Missing {
            path: "/opt/pdfium/lib/libpdfium.so".into(),
        }
        .into();
        match e {
            Pdf2PdfImageError::RendererBackendMissing { library, detail } => {
                assert_eq!(library, Some(PathBuf::from("/opt/pdfium/lib/libpdfium.so")));
                assert!(detail.contains("libpdfium.so"), "got: {detail}");
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn input_not_found_display() {
        let e = Pdf2PdfImageError::InputNotFound {
            path: "relatorio.pdf".into(),
        };
        assert!(e.to_string().contains("relatorio.pdf"));
    }
}
