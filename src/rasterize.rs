//! Page rasterization backend.
//!
//! The [`Rasterizer`] trait defines the two operations the export pipeline
//! needs: render an HTML page to a bitmap, and produce a print-ready PDF of
//! one page.
//!
//! The production implementation is [`ChromeRasterizer`], which drives
//! headless Chrome: page HTML goes to a temp file, a tab navigates to it,
//! and the capture is clipped to the configured page geometry at the
//! oversampling scale. The temp file is deleted on every path, success or
//! failure, because `NamedTempFile` owns it.
//!
//! Tests use a recording mock producing synthetic bitmaps (see the test
//! module) so pipeline logic runs without a browser. Chrome-dependent
//! integration tests live in `tests/` and are `#[ignore]`d.

use crate::config::ExportConfig;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Capture failed: {0}")]
    Capture(String),
    #[error("Could not open an output context: {0}")]
    OutputContext(String),
}

/// Bitmap output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    /// Artifact file extension.
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpg",
        }
    }
}

/// Geometry and encoding options for one capture.
#[derive(Debug, Clone, Copy)]
pub struct RasterOptions {
    /// Page width in CSS pixels.
    pub width: u32,
    /// Page height in CSS pixels.
    pub height: u32,
    /// Oversampling factor; output bitmaps are `width * scale` pixels wide.
    pub scale: u32,
    pub format: RasterFormat,
    /// JPEG quality (0-100), ignored for PNG.
    pub jpeg_quality: u32,
}

impl RasterOptions {
    pub fn new(export: &ExportConfig, format: RasterFormat) -> Self {
        Self {
            width: export.page_width,
            height: export.page_height,
            scale: export.scale,
            format,
            jpeg_quality: export.jpeg_quality,
        }
    }
}

/// Trait for page rasterization backends.
pub trait Rasterizer {
    /// Render an HTML document to an encoded bitmap.
    fn rasterize(&self, html: &str, options: &RasterOptions) -> Result<Vec<u8>, RasterizeError>;

    /// Produce a print-ready PDF of an HTML document. The document's images
    /// must be fully decoded before printing starts.
    fn print_pdf(&self, html: &str, options: &RasterOptions) -> Result<Vec<u8>, RasterizeError>;
}

/// Production rasterizer driving headless Chrome.
pub struct ChromeRasterizer {
    browser: Browser,
}

impl ChromeRasterizer {
    /// Launch a headless browser sized to the export geometry.
    pub fn new(export: &ExportConfig) -> Result<Self, RasterizeError> {
        let browser = Browser::new(LaunchOptions {
            window_size: Some((export.page_width, export.page_height)),
            ..Default::default()
        })
        .map_err(|e| RasterizeError::Capture(e.to_string()))?;
        Ok(Self { browser })
    }

    /// Write the page HTML to a self-deleting temp file and return it.
    fn stage_html(html: &str) -> Result<tempfile::NamedTempFile, RasterizeError> {
        let mut file = tempfile::Builder::new()
            .prefix("menu-press-")
            .suffix(".html")
            .tempfile()?;
        file.write_all(html.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

impl Rasterizer for ChromeRasterizer {
    fn rasterize(&self, html: &str, options: &RasterOptions) -> Result<Vec<u8>, RasterizeError> {
        let file = Self::stage_html(html)?;
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| RasterizeError::Capture(e.to_string()))?;

        let format = match options.format {
            RasterFormat::Png => Page::CaptureScreenshotFormatOption::Png,
            RasterFormat::Jpeg => Page::CaptureScreenshotFormatOption::Jpeg,
        };
        let quality = match options.format {
            RasterFormat::Png => None,
            RasterFormat::Jpeg => Some(options.jpeg_quality),
        };
        let clip = Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: options.width as f64,
            height: options.height as f64,
            scale: options.scale as f64,
        };

        // The browser is reused across a whole batch export, so the tab is
        // closed before any error propagates, not just on success.
        let result = (|| {
            tab.navigate_to(&format!("file://{}", file.path().display()))?
                .wait_until_navigated()?;
            tab.capture_screenshot(format, quality, Some(clip), true)
        })();
        let _ = tab.close(true);
        result.map_err(|e| RasterizeError::Capture(e.to_string()))
    }

    fn print_pdf(&self, html: &str, _options: &RasterOptions) -> Result<Vec<u8>, RasterizeError> {
        let file = Self::stage_html(html)?;
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| RasterizeError::OutputContext(e.to_string()))?;

        let result = (|| {
            tab.navigate_to(&format!("file://{}", file.path().display()))?
                .wait_until_navigated()?;

            // Printing before the page's images finish decoding produces
            // blank output, so block on decode first.
            tab.evaluate(
                "Promise.all(Array.from(document.images).map(i => i.decode())).then(() => 'decoded')",
                true,
            )?;

            tab.print_to_pdf(Some(PrintToPdfOptions {
                print_background: Some(true),
                margin_top: Some(0.0),
                margin_bottom: Some(0.0),
                margin_left: Some(0.0),
                margin_right: Some(0.0),
                ..Default::default()
            }))
        })();
        let _ = tab.close(true);
        result.map_err(|e| RasterizeError::Capture(e.to_string()))
    }
}
