//! # pdfium-locate
//!
//! Find a [PDFium](https://pdfium.googlesource.com/pdfium/) shared library
//! and bind `pdfium-render` to it, without caring which platform we run on.
//!
//! ## How it works
//!
//! [`library_override`] is a capability lookup. It returns an explicit
//! library path when one is available and `None` when the system library
//! should be used:
//!
//! 1. `PDFIUM_LIB_PATH`, when it names an existing file.
//! 2. A bundled installation somewhere below a search root (normally the
//!    program directory): any folder named `pdfium*` holding the platform
//!    library under `lib/` or `bin/`, which is the layout of the
//!    [pdfium-binaries](https://github.com/bblanchon/pdfium-binaries)
//!    archives once unpacked. Matches are sorted and the first one wins.
//!
//! [`bind_pdfium`] then binds to that path, or to the system library when
//! the lookup came back empty.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pdfium_locate::{bind_pdfium, library_override};
//! use std::path::Path;
//!
//! let library = library_override(Some(Path::new(".")));
//! let pdfium = bind_pdfium(library.as_deref()).expect("PDFium unavailable");
//! ```
//!
//! ## Platform support
//!
//! | OS      | Bundled path                       |
//! |---------|------------------------------------|
//! | macOS   | `pdfium*/lib/libpdfium.dylib`      |
//! | Linux   | `pdfium*/lib/libpdfium.so`         |
//! | Windows | `pdfium*/bin/pdfium.dll`           |

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use pdfium_render::prelude::Pdfium;
use thiserror::Error;

// ── Public constants ─────────────────────────────────────────────────────────

/// Environment variable naming an existing pdfium library.
pub const LIBRARY_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Folder-name pattern of a bundled pdfium installation.
pub const BUNDLE_DIR_PATTERN: &str = "pdfium*";

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by pdfium-locate operations.
#[derive(Error, Debug)]
pub enum LocateError {
    /// The explicit library path does not exist.
    #[error("PDFium library not found at '{path}'")]
    Missing { path: PathBuf },

    /// `libloading` / `pdfium-render` could not load the library.
    #[error("Failed to bind PDFium from '{path}': {reason}")]
    Bind { path: PathBuf, reason: String },

    /// No explicit path was given and no system-wide library could be loaded.
    #[error("No system PDFium library could be loaded: {reason}")]
    SystemLibrary { reason: String },
}

// ── Platform metadata ────────────────────────────────────────────────────────

/// File name of the pdfium library on this platform, e.g. `libpdfium.so`.
pub fn platform_library_name() -> OsString {
    Pdfium::pdfium_platform_library_name()
}

/// Subdirectory of a pdfium-binaries installation that holds the library.
fn bundle_library_dir() -> &'static str {
    if cfg!(target_os = "windows") {
        "bin"
    } else {
        "lib"
    }
}

// ── Lookup ───────────────────────────────────────────────────────────────────

/// Search `root` recursively for a bundled pdfium installation.
///
/// Returns the first match in sorted order, or `None`.
pub fn find_bundled_library(root: &Path) -> Option<PathBuf> {
    let pattern = format!(
        "{}/**/{}/{}/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        BUNDLE_DIR_PATTERN,
        bundle_library_dir(),
        platform_library_name().to_string_lossy(),
    );

    let mut matches: Vec<PathBuf> = glob::glob(&pattern)
        .ok()?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    matches.sort();
    matches.into_iter().next()
}

/// Resolve an explicit pdfium library path, or `None` to use the system one.
///
/// `search_root` is where a bundled installation is looked for; pass `None`
/// to skip that step.
pub fn library_override(search_root: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = env_library_path() {
        return Some(p);
    }
    search_root.and_then(find_bundled_library)
}

fn env_library_path() -> Option<PathBuf> {
    let value = std::env::var_os(LIBRARY_PATH_ENV)?;
    if value.is_empty() {
        return None;
    }
    let path = PathBuf::from(value);
    if path.is_file() {
        Some(path)
    } else {
        eprintln!(
            "pdfium-locate: {LIBRARY_PATH_ENV} '{}' not found; ignoring it",
            path.display()
        );
        None
    }
}

// ── Binding ──────────────────────────────────────────────────────────────────

/// Bind to `library` when given, otherwise to the system pdfium library.
pub fn bind_pdfium(library: Option<&Path>) -> Result<Pdfium, LocateError> {
    match library {
        Some(path) => bind_pdfium_from_path(path),
        None => Pdfium::bind_to_system_library()
            .map(Pdfium::new)
            .map_err(|e| LocateError::SystemLibrary {
                reason: e.to_string(),
            }),
    }
}

/// Binds to a PDFium library at an explicit `path`.
pub fn bind_pdfium_from_path(path: &Path) -> Result<Pdfium, LocateError> {
    if !path.exists() {
        return Err(LocateError::Missing {
            path: path.to_path_buf(),
        });
    }
    Pdfium::bind_to_library(path)
        .map(Pdfium::new)
        .map_err(|e| LocateError::Bind {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
