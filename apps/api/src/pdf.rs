//! First-page rasterisation of the uploaded resume.
//!
//! The pdfium C++ library keeps thread-local state and must not run on the
//! Tokio worker threads, so the whole rasterise-and-encode step happens
//! inside `spawn_blocking`. Only the first page is ever rendered: the model
//! receives a single image per analysis.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use image::DynamicImage;
use pdfium_render::prelude::*;
use serde::Serialize;
use std::io::Cursor;
use tracing::debug;

use crate::errors::AppError;

/// Longest-edge pixel cap for the rendered page. Page sizes vary, so the cap
/// is in pixels rather than DPI to keep memory bounded and the payload inside
/// the vision model's sweet spot.
const MAX_RENDERED_PIXELS: i32 = 1600;

/// The first page of the uploaded PDF, rasterised and base64-encoded for the
/// model request. `data` always corresponds to the most recently uploaded file.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeImage {
    pub mime_type: &'static str,
    pub data: String,
}

/// Rasterise the first page of `pdf_bytes` into a base64 JPEG payload.
pub async fn first_page_image(pdf_bytes: Bytes) -> Result<ResumeImage, AppError> {
    tokio::task::spawn_blocking(move || rasterize_first_page(&pdf_bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Render task panicked: {e}")))?
}

/// Blocking implementation of first-page rendering.
fn rasterize_first_page(pdf_bytes: &[u8]) -> Result<ResumeImage, AppError> {
    let pdfium = Pdfium::default();

    let document = pdfium
        .load_pdf_from_byte_slice(pdf_bytes, None)
        .map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not read the uploaded PDF: {e:?}"))
        })?;

    let pages = document.pages();
    if pages.len() == 0 {
        return Err(AppError::UnprocessableEntity(
            "The uploaded PDF has no pages".to_string(),
        ));
    }

    let page = pages.get(0).map_err(|e| {
        AppError::UnprocessableEntity(format!("Could not open the first page: {e:?}"))
    })?;

    let render_config = PdfRenderConfig::new()
        .set_target_width(MAX_RENDERED_PIXELS)
        .set_maximum_height(MAX_RENDERED_PIXELS);

    let bitmap = page.render_with_config(&render_config).map_err(|e| {
        AppError::UnprocessableEntity(format!("Could not rasterise the first page: {e:?}"))
    })?;

    let image = bitmap.as_image();
    debug!(
        "Rendered first page → {}x{} px",
        image.width(),
        image.height()
    );

    encode_jpeg(&image)
}

/// Encode a rendered page as a base64 JPEG payload tagged with its media type.
pub(crate) fn encode_jpeg(image: &DynamicImage) -> Result<ResumeImage, AppError> {
    // pdfium bitmaps carry an alpha channel; JPEG does not.
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JPEG encoding failed: {e}")))?;

    let data = STANDARD.encode(&buf);
    debug!("Encoded first page → {} bytes base64", data.len());

    Ok(ResumeImage {
        mime_type: "image/jpeg",
        data,
    })
}
