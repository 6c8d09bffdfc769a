//! PDF rasterisation: render every page and wrap each raster in its own PDF.
//!
//! ## Why copy each batch into a new document?
//!
//! Every batch of source pages is copied into a fresh document, serialised
//! and reloaded before it is rendered. Only that small document is open
//! while its pages are rendered, which keeps the renderer's working set
//! bounded on documents with hundreds of pages.
//!
//! ## Page geometry
//!
//! Pages are rendered at `dpi / 72` times their size in points. The
//! single-page PDF that wraps the raster keeps the source page's size in
//! points, so the flattened document prints at the same dimensions as the
//! original.

use crate::config::ConversionConfig;
use crate::error::Pdf2PdfImageError;
use crate::pipeline::batch::{self, BatchRange};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of a rendered page: `page_{offset + local_index + 1}.pdf`.
///
/// The number is the page's 1-indexed position in the source document, so
/// names never collide across batches.
pub fn rendered_page_file_name(batch_offset: usize, local_index: usize) -> String {
    format!("page_{}.pdf", batch_offset + local_index + 1)
}

/// Open the source document.
pub fn open_document<'a>(
    pdfium: &'a Pdfium,
    pdf_path: &Path,
) -> Result<PdfDocument<'a>, Pdf2PdfImageError> {
    if !pdf_path.exists() {
        return Err(Pdf2PdfImageError::InputNotFound {
            path: pdf_path.to_path_buf(),
        });
    }

    pdfium
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| Pdf2PdfImageError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail: format!("{:?}", e),
        })
}

/// Number of pages in the PDF at `pdf_path`.
pub fn page_count(pdfium: &Pdfium, pdf_path: &Path) -> Result<usize, Pdf2PdfImageError> {
    let document = open_document(pdfium, pdf_path)?;
    Ok(document.pages().len() as usize)
}

/// Rasterise every page of `source` into `scratch_dir`.
///
/// Returns the written files in page order.
pub fn rasterise_document(
    pdfium: &Pdfium,
    source: &PdfDocument,
    scratch_dir: &Path,
    config: &ConversionConfig,
) -> Result<Vec<PathBuf>, Pdf2PdfImageError> {
    let total_pages = source.pages().len() as usize;
    let mut files = Vec::with_capacity(total_pages);

    for range in batch::batches(total_pages, config.batch_size) {
        info!(
            "Rendering pages {}-{} of {}",
            range.first_page(),
            range.last_page(),
            total_pages
        );
        let written = rasterise_batch(pdfium, source, range, scratch_dir, config, total_pages)?;
        files.extend(written);
    }

    Ok(files)
}

/// Rasterise one batch of pages and return the single-page files written.
pub fn rasterise_batch(
    pdfium: &Pdfium,
    source: &PdfDocument,
    range: BatchRange,
    scratch_dir: &Path,
    config: &ConversionConfig,
    total_pages: usize,
) -> Result<Vec<PathBuf>, Pdf2PdfImageError> {
    let progress = config.progress();
    let batch_doc = extract_batch(pdfium, source, range)?;

    let render_config =
        PdfRenderConfig::new().scale_page_by_factor(config.dpi as f32 / 72.0);

    let mut files = Vec::with_capacity(range.len());

    for (local_index, page) in batch_doc.pages().iter().enumerate() {
        let page_num = range.offset() + local_index + 1;

        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            Pdf2PdfImageError::RasterisationFailed {
                page: page_num,
                detail: format!("{:?}", e),
            }
        })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            page_num,
            image.width(),
            image.height()
        );

        let path = scratch_dir.join(rendered_page_file_name(range.offset(), local_index));
        write_image_page(pdfium, &image, page.width(), page.height(), &path)?;

        progress.on_page_rendered(page_num, total_pages);
        files.push(path);
    }

    Ok(files)
}

/// Copy `range` out of `source` into a standalone document.
fn extract_batch<'a>(
    pdfium: &'a Pdfium,
    source: &PdfDocument,
    range: BatchRange,
) -> Result<PdfDocument<'a>, Pdf2PdfImageError> {
    let fail = |e: PdfiumError| Pdf2PdfImageError::BatchExtractionFailed {
        first: range.first_page(),
        last: range.last_page(),
        detail: format!("{:?}", e),
    };

    let mut batch_doc = pdfium.create_new_pdf().map_err(fail)?;
    batch_doc
        .pages_mut()
        .copy_page_range_from_document(
            source,
            (range.start as PdfPageIndex)..=((range.end - 1) as PdfPageIndex),
            0,
        )
        .map_err(fail)?;

    let bytes = batch_doc.save_to_bytes().map_err(fail)?;
    debug!(
        "Batch {}-{} re-encoded → {} bytes",
        range.first_page(),
        range.last_page(),
        bytes.len()
    );

    pdfium.load_pdf_from_byte_vec(bytes, None).map_err(fail)
}

/// Save `image` as a one-page PDF of `width` × `height` points.
fn write_image_page(
    pdfium: &Pdfium,
    image: &DynamicImage,
    width: PdfPoints,
    height: PdfPoints,
    path: &Path,
) -> Result<(), Pdf2PdfImageError> {
    let fail = |e: PdfiumError| Pdf2PdfImageError::PageWriteFailed {
        path: path.to_path_buf(),
        detail: format!("{:?}", e),
    };

    let mut document = pdfium.create_new_pdf().map_err(fail)?;
    {
        let mut page = document
            .pages_mut()
            .create_page_at_end(PdfPagePaperSize::Custom(width, height))
            .map_err(fail)?;

        let mut image_object = PdfPageImageObject::new(&document, image).map_err(fail)?;
        image_object.scale(width.value, height.value).map_err(fail)?;

        page.objects_mut()
            .add_object(PdfPageObject::Image(image_object))
            .map_err(fail)?;
    }

    document.save_to_file(path).map_err(fail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn file_name_encodes_global_page() {
        assert_eq!(rendered_page_file_name(0, 0), "page_1.pdf");
        assert_eq!(rendered_page_file_name(0, 9), "page_10.pdf");
        assert_eq!(rendered_page_file_name(10, 0), "page_11.pdf");
        assert_eq!(rendered_page_file_name(20, 2), "page_23.pdf");
    }

    #[test]
    fn file_names_never_collide_across_batches() {
        let total = 57;
        let mut seen = HashSet::new();
        for range in batch::batches(total, 10) {
            for local in 0..range.len() {
                let name = rendered_page_file_name(range.offset(), local);
                assert!(seen.insert(name.clone()), "duplicate {name}");
            }
        }
        assert_eq!(seen.len(), total);
        for page in 1..=total {
            assert!(seen.contains(&format!("page_{page}.pdf")));
        }
    }
}
