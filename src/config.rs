//! Configuration types for PDF flattening.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The working directories are plain
//! fields rather than process-wide constants, so a test can point a run at a
//! temporary directory.

use crate::error::Pdf2PdfImageError;
use crate::progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Default rasterisation resolution.
pub const DEFAULT_DPI: u32 = 110;

/// Default number of pages extracted and rendered together.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Scratch directory name, relative to the program directory.
pub const SCRATCH_DIR_NAME: &str = "_temporario";

/// Output directory name, relative to the program directory.
pub const OUTPUT_DIR_NAME: &str = "saida";

/// File name of the merged result.
pub const OUTPUT_FILE_NAME: &str = "resultado.pdf";

/// Configuration for a flattening run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`], which resolves every directory relative
/// to the current working directory.
///
/// # Example
/// ```rust
/// use pdf2pdfimage::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .program_dir("/opt/pdf2pdfimage")
///     .dpi(150)
///     .build()
///     .unwrap();
/// assert!(config.output_path().ends_with("saida/resultado.pdf"));
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Rasterisation DPI. Range: 72–400. Default: 110.
    pub dpi: u32,

    /// Pages per batch. Default: 10.
    ///
    /// Each batch is copied into its own in-memory document before it is
    /// rendered, so this bounds how much of the source is live at once.
    pub batch_size: usize,

    /// Directory for the per-page PDFs. Removed at the end of every run.
    pub scratch_dir: PathBuf,

    /// Directory that receives the merged output.
    pub output_dir: PathBuf,

    /// File name of the merged output inside `output_dir`.
    pub output_file_name: String,

    /// Explicit pdfium library. Takes precedence over every lookup.
    pub renderer_library: Option<PathBuf>,

    /// Where to look for a bundled `pdfium*` installation. `None` skips the
    /// bundled search.
    pub renderer_search_root: Option<PathBuf>,

    /// Optional progress reporting.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            batch_size: DEFAULT_BATCH_SIZE,
            scratch_dir: PathBuf::from(SCRATCH_DIR_NAME),
            output_dir: PathBuf::from(OUTPUT_DIR_NAME),
            output_file_name: OUTPUT_FILE_NAME.to_string(),
            renderer_library: None,
            renderer_search_root: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("dpi", &self.dpi)
            .field("batch_size", &self.batch_size)
            .field("scratch_dir", &self.scratch_dir)
            .field("output_dir", &self.output_dir)
            .field("output_file_name", &self.output_file_name)
            .field("renderer_library", &self.renderer_library)
            .field("renderer_search_root", &self.renderer_search_root)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full path of the merged output file.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file_name)
    }

    /// The configured progress callback, or a no-op one.
    pub fn progress(&self) -> &dyn ConversionProgressCallback {
        match self.progress_callback {
            Some(ref cb) => cb.as_ref(),
            None => &NoopProgressCallback,
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Derive the scratch dir, output dir and renderer search root from the
    /// directory the program lives in.
    pub fn program_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.config.scratch_dir = dir.join(SCRATCH_DIR_NAME);
        self.config.output_dir = dir.join(OUTPUT_DIR_NAME);
        self.config.renderer_search_root = Some(dir.to_path_buf());
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 400);
        self
    }

    pub fn batch_size(mut self, n: usize) -> Self {
        self.config.batch_size = n;
        self
    }

    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.scratch_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_file_name = name.into();
        self
    }

    pub fn renderer_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.renderer_library = Some(path.into());
        self
    }

    pub fn renderer_search_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.renderer_search_root = Some(dir.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2PdfImageError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 400 {
            return Err(Pdf2PdfImageError::InvalidConfig(format!(
                "DPI must be 72–400, got {}",
                c.dpi
            )));
        }
        if c.batch_size == 0 {
            return Err(Pdf2PdfImageError::InvalidConfig(
                "Batch size must be ≥ 1".into(),
            ));
        }
        if c.output_file_name.trim().is_empty() {
            return Err(Pdf2PdfImageError::InvalidConfig(
                "Output file name must not be empty".into(),
            ));
        }
        // The scratch dir is removed wholesale at the end of a run.
        if normalize(&c.output_dir).starts_with(normalize(&c.scratch_dir)) {
            return Err(Pdf2PdfImageError::InvalidConfig(format!(
                "Output directory '{}' must not be inside the scratch directory '{}'",
                c.output_dir.display(),
                c.scratch_dir.display()
            )));
        }
        Ok(self.config)
    }
}

/// Lexical normalisation: drops `.` and folds `..` into its parent without
/// touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}
