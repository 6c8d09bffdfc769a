//! Progress-callback trait for stage and per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline works through the document. The library never
//! prints anything itself; the CLI turns these events into status lines and
//! a progress bar.
//!
//! # Example
//!
//! ```rust
//! use pdf2pdfimage::{ConversionConfig, ConversionProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     rendered: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_rendered(&self, page_num: usize, total_pages: usize) {
//!         self.rendered.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("page {page_num} of {total_pages}");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { rendered: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::ConversionStats;
use std::fmt;
use std::sync::Arc;

/// Lifecycle of one run.
///
/// `Idle → Prompting → Converting → Merging → CleaningUp → Done`. A failure
/// while converting or merging jumps straight to `CleaningUp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Program started, nothing asked yet. Announced by the front-end.
    Idle,
    /// Waiting for the user to type a path. See
    /// [`crate::pipeline::input::prompt_for_input`].
    Prompting,
    Converting,
    Merging,
    CleaningUp,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Idle => "idle",
            Stage::Prompting => "prompting",
            Stage::Converting => "converting",
            Stage::Merging => "merging",
            Stage::CleaningUp => "cleaning up",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Called by the conversion pipeline as it works.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The pipeline is sequential, so events arrive in
/// page order.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called on every stage transition.
    fn on_stage(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called once the page count is known, before the first batch.
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after each page has been rendered and written.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    fn on_page_rendered(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called before the rendered pages are concatenated.
    fn on_merge_start(&self, file_count: usize) {
        let _ = file_count;
    }

    /// Called once after the output file has been written.
    fn on_conversion_complete(&self, stats: &ConversionStats) {
        let _ = stats;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
