//! PDF assembly from rasterized pages.
//!
//! The PDF path reuses the bitmap pipeline: each composed page is rasterized
//! exactly as for image export, then embedded full-bleed on a fixed A4 page.
//! The raster is decoded with the `image` crate and attached as a raw RGB
//! XObject; the DPI is derived from the bitmap width so the image spans the
//! full page width regardless of the oversampling scale.

use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Raster decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("PDF write failed: {0}")]
    Write(String),
    #[error("No pages to assemble")]
    NoPages,
}

/// A4 page size in millimeters.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const MM_PER_INCH: f32 = 25.4;

/// Assemble encoded page bitmaps into one PDF, one bitmap per A4 page, in
/// the order given.
pub fn assemble(title: &str, rasters: &[Vec<u8>]) -> Result<Vec<u8>, PdfError> {
    let first = rasters.first().ok_or(PdfError::NoPages)?;

    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    place_raster(first, &doc.get_page(page).get_layer(layer))?;

    for raster in &rasters[1..] {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        place_raster(raster, &doc.get_page(page).get_layer(layer))?;
    }

    doc.save_to_bytes().map_err(|e| PdfError::Write(e.to_string()))
}

/// Decode one bitmap and draw it full-bleed at the page origin.
fn place_raster(
    raster: &[u8],
    layer: &printpdf::PdfLayerReference,
) -> Result<(), PdfError> {
    let decoded = image::load_from_memory(raster)?.to_rgb8();
    let (width, height) = decoded.dimensions();

    let xobject = ImageXObject {
        width: Px(width as usize),
        height: Px(height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: decoded.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    };

    // Pixels-per-inch that makes the bitmap exactly one page wide.
    let dpi = width as f32 / (PAGE_WIDTH_MM / MM_PER_INCH);

    Image::from(xobject).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    Ok(())
}
