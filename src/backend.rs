//! Renderer backend resolution.
//!
//! The library location is looked up once per run, before any page is
//! touched: an explicit [`ConversionConfig::renderer_library`] wins, then
//! whatever [`pdfium_locate::library_override`] finds (environment variable
//! or bundled folder under the search root), then the system library.

use crate::config::ConversionConfig;
use crate::error::Pdf2PdfImageError;
use pdfium_render::prelude::Pdfium;
use std::path::PathBuf;
use tracing::info;

/// The explicit library path for this run, or `None` for the system library.
pub fn resolve_library(config: &ConversionConfig) -> Option<PathBuf> {
    if let Some(ref path) = config.renderer_library {
        return Some(path.clone());
    }
    pdfium_locate::library_override(config.renderer_search_root.as_deref())
}

/// Bind the pdfium renderer for this run.
pub fn bind(config: &ConversionConfig) -> Result<Pdfium, Pdf2PdfImageError> {
    let library = resolve_library(config);
    match library {
        Some(ref path) => info!("Binding pdfium from {}", path.display()),
        None => info!("Binding system pdfium library"),
    }
    Ok(pdfium_locate::bind_pdfium(library.as_deref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn explicit_library_wins() {
        let config = ConversionConfig::builder()
            .renderer_library("/opt/pdfium/lib/libpdfium.so")
            .build()
            .unwrap();
        assert_eq!(
            resolve_library(&config),
            Some(PathBuf::from("/opt/pdfium/lib/libpdfium.so"))
        );
    }

    #[test]
    fn missing_explicit_library_is_backend_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConversionConfig::builder()
            .renderer_library(dir.path().join("libpdfium-missing.so"))
            .build()
            .unwrap();
        let err = bind(&config).err().expect("binding must fail");
        assert_eq!(err.kind(), Some(FailureKind::RendererBackendMissing));
    }
}
