//! Conversion entry points.
//!
//! A run is strictly sequential: validate the input, create the working
//! directories, bind the renderer, rasterise batch by batch, merge, and
//! finally remove the scratch directory. Cleanup happens on every path out
//! of a run once the scratch directory exists, success or failure.

use crate::backend;
use crate::config::ConversionConfig;
use crate::error::Pdf2PdfImageError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::workspace::{self, ScratchDir};
use crate::pipeline::{batch, input, merge, render};
use crate::progress::Stage;
use pdfium_render::prelude::Pdfium;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Flatten the PDF at `input` into an image-only PDF.
///
/// The renderer is located and bound according to `config` (see
/// [`crate::backend`]). The result is written to
/// [`ConversionConfig::output_path`], replacing any previous result.
///
/// # Errors
/// - [`Pdf2PdfImageError::InputNotFound`] if `input` does not exist; nothing
///   is created on disk in that case.
/// - [`Pdf2PdfImageError::RendererBackendMissing`] if pdfium cannot be bound.
/// - Any other variant for failures while rendering or merging.
///
/// # Example
/// ```rust,no_run
/// use pdf2pdfimage::{convert, ConversionConfig};
///
/// let config = ConversionConfig::builder().program_dir(".").build()?;
/// let output = convert("document.pdf", &config)?;
/// println!("{} pages → {}", output.stats.output_pages, output.output_path.display());
/// # Ok::<(), pdf2pdfimage::Pdf2PdfImageError>(())
/// ```
pub fn convert(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2PdfImageError> {
    run_in_workspace(input.as_ref(), config, |input, scratch| {
        let pdfium = backend::bind(config)?;
        flatten(&pdfium, input, scratch, config)
    })
}

/// Same as [`convert`], with a renderer the caller has already bound.
pub fn convert_with_pdfium(
    pdfium: &Pdfium,
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2PdfImageError> {
    run_in_workspace(input.as_ref(), config, |input, scratch| {
        flatten(pdfium, input, scratch, config)
    })
}

/// Page count of the PDF at `input`, without converting anything.
pub fn inspect(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<usize, Pdf2PdfImageError> {
    let path = input::resolve_local(input)?;
    let pdfium = backend::bind(config)?;
    render::page_count(&pdfium, &path)
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Validate input, own the scratch directory around `run`, always clean up.
fn run_in_workspace<F>(
    input: &Path,
    config: &ConversionConfig,
    run: F,
) -> Result<ConversionOutput, Pdf2PdfImageError>
where
    F: FnOnce(&Path, &ScratchDir) -> Result<ConversionOutput, Pdf2PdfImageError>,
{
    let progress = config.progress();
    let input = input::resolve_local(input)?;
    info!("Starting conversion: {}", input.display());

    workspace::ensure_dir(&config.output_dir)?;
    let scratch = ScratchDir::create(&config.scratch_dir)?;

    progress.on_stage(Stage::Converting);
    let result = run(&input, &scratch);

    progress.on_stage(Stage::CleaningUp);
    if let Err(e) = scratch.close() {
        warn!(
            "Could not remove scratch directory {}: {}",
            config.scratch_dir.display(),
            e
        );
    }
    progress.on_stage(Stage::Done);

    if let Err(ref e) = result {
        info!("Conversion failed: {}", e);
    }
    result
}

fn flatten(
    pdfium: &Pdfium,
    input: &Path,
    scratch: &ScratchDir,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2PdfImageError> {
    let total_start = Instant::now();
    let progress = config.progress();

    // ── Step 1: Count pages ──────────────────────────────────────────────
    let source = render::open_document(pdfium, input)?;
    let total_pages = source.pages().len() as usize;
    info!("PDF loaded: {} pages", total_pages);
    progress.on_conversion_start(total_pages);

    // ── Step 2: Rasterise batch by batch ─────────────────────────────────
    let render_start = Instant::now();
    let files = render::rasterise_document(pdfium, &source, scratch.path(), config)?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    info!(
        "Rendered {} pages in {}ms",
        files.len(),
        render_duration_ms
    );
    drop(source);

    // ── Step 3: Merge ────────────────────────────────────────────────────
    progress.on_stage(Stage::Merging);
    progress.on_merge_start(files.len());

    let output_path = config.output_path();
    let merge_start = Instant::now();
    let output_pages = merge::merge_pages(pdfium, &files, &output_path)?;
    let merge_duration_ms = merge_start.elapsed().as_millis() as u64;

    // ── Step 4: Stats ────────────────────────────────────────────────────
    let stats = ConversionStats {
        total_pages,
        batches: batch::batch_count(total_pages, config.batch_size),
        rendered_pages: files.len(),
        output_pages,
        render_duration_ms,
        merge_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {}/{} pages, {}ms total",
        output_pages, total_pages, stats.total_duration_ms
    );
    debug!(
        "Run summary: {}",
        serde_json::to_string(&stats).unwrap_or_default()
    );
    progress.on_conversion_complete(&stats);

    Ok(ConversionOutput { output_path, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::progress::ConversionProgressCallback;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StageRecorder {
        stages: Mutex<Vec<Stage>>,
    }

    impl ConversionProgressCallback for StageRecorder {
        fn on_stage(&self, stage: Stage) {
            self.stages.lock().unwrap().push(stage);
        }
    }

    #[test]
    fn missing_input_creates_nothing() {
        let root = tempfile::tempdir().unwrap();
        let config = ConversionConfig::builder()
            .program_dir(root.path())
            .build()
            .unwrap();

        let err = convert(root.path().join("missing.pdf"), &config).unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::InputNotFound));
        assert!(!config.output_dir.exists());
        assert!(!config.scratch_dir.exists());
        assert!(!config.output_path().exists());
    }

    #[test]
    fn missing_backend_still_removes_scratch() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("entrada.pdf");
        std::fs::write(&input, b"%PDF-1.4\n%%EOF\n").unwrap();

        let recorder = Arc::new(StageRecorder::default());
        let config = ConversionConfig::builder()
            .program_dir(root.path())
            .renderer_library(root.path().join("no-such-libpdfium"))
            .progress_callback(recorder.clone())
            .build()
            .unwrap();

        let err = convert(&input, &config).unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::RendererBackendMissing));
        assert!(!config.scratch_dir.exists(), "scratch dir must be removed");
        assert!(!config.output_path().exists());
        assert_eq!(
            *recorder.stages.lock().unwrap(),
            vec![Stage::Converting, Stage::CleaningUp, Stage::Done]
        );
    }

    #[test]
    fn stale_scratch_contents_are_removed_on_failure() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("entrada.pdf");
        std::fs::write(&input, b"%PDF-1.4\n%%EOF\n").unwrap();

        let config = ConversionConfig::builder()
            .program_dir(root.path())
            .renderer_library(root.path().join("no-such-libpdfium"))
            .build()
            .unwrap();
        std::fs::create_dir_all(&config.scratch_dir).unwrap();
        std::fs::write(config.scratch_dir.join("page_1.pdf"), b"stale").unwrap();

        let _ = convert(&input, &config);
        assert!(!config.scratch_dir.exists());
    }

    #[test]
    fn inspect_missing_input() {
        let root = tempfile::tempdir().unwrap();
        let err = inspect(root.path().join("nope.pdf"), &ConversionConfig::default()).unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::InputNotFound));
    }
}
