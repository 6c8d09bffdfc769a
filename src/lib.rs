//! # pdf2pdfimage
//!
//! Flatten a PDF into an image-only PDF: every page is rasterised and the
//! rasters are reassembled, in order, into a new document. Text, vector art
//! and form fields all become pixels.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input    check the path exists
//!  ├─ 2. Batch    split pages into windows of 10
//!  ├─ 3. Render   copy each window into its own document, rasterise at
//!  │              110 DPI via pdfium, save one single-page PDF per page
//!  ├─ 4. Merge    append the single-page PDFs into saida/resultado.pdf
//!  └─ 5. Cleanup  remove the scratch directory, success or failure
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2pdfimage::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .program_dir(".")
//!         .build()?;
//!     let output = convert("document.pdf", &config)?;
//!     eprintln!("{} pages written to {}",
//!         output.stats.output_pages,
//!         output.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2pdfimage` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! ## Finding pdfium
//!
//! The renderer library is looked up once per run: an explicit
//! [`ConversionConfig::renderer_library`], then `PDFIUM_LIB_PATH`, then a
//! bundled `pdfium*` folder below the program directory, then the system
//! library. See [`backend`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_with_pdfium, inspect};
pub use error::{FailureKind, Pdf2PdfImageError};
pub use output::{ConversionOutput, ConversionStats};
pub use pipeline::batch::{batches, BatchRange};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback, Stage};
