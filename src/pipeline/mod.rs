//! Pipeline stages for PDF flattening.
//!
//! Each submodule implements exactly one step of a run, and each is
//! testable on its own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ workspace ──▶ batch ──▶ render ──▶ merge ──▶ workspace
//! (path)    (mkdir)      (slice)   (pdfium)   (append)   (rm scratch)
//! ```
//!
//! 1. [`input`]     — read the path the user typed and check it exists
//! 2. [`workspace`] — create the output and scratch directories; remove
//!    scratch afterwards whatever happened
//! 3. [`batch`]     — split the page range into windows of ten pages
//! 4. [`render`]    — copy each window into its own document, rasterise it
//!    and write one single-page PDF per page
//! 5. [`merge`]     — append the single-page PDFs into the final file

pub mod batch;
pub mod input;
pub mod merge;
pub mod render;
pub mod workspace;
