//! Result types returned by a flattening run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a successful run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Path of the merged, image-only PDF.
    pub output_path: PathBuf,
    pub stats: ConversionStats,
}

/// Per-run statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages in the source document.
    pub total_pages: usize,
    /// Number of batches the pages were split into.
    pub batches: usize,
    /// Single-page files written to the scratch directory.
    pub rendered_pages: usize,
    /// Pages in the merged output.
    pub output_pages: usize,
    pub render_duration_ms: u64,
    pub merge_duration_ms: u64,
    pub total_duration_ms: u64,
}
