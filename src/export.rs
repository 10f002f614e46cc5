//! Export pipeline: composed pages → artifacts on disk.
//!
//! The [`Exporter`] borrows a [`Rasterizer`] and the config, and owns the
//! output directory plus a busy flag. The flag is set before any export and
//! cleared by a drop guard, so it never sticks after a failure.
//!
//! All batch paths skip empty pages, write artifacts in composer order, and
//! abort the remaining loop on the first rasterization failure. Batch image
//! exports pace the writes with a configurable delay between files so a
//! six-page run does not hammer the capture backend.
//!
//! Artifact names are fixed: `menu-<pageKey>.<ext>` for images and
//! single-page PDFs, `menu-complete.pdf` for the full menu,
//! `menu-<pageKey>-print.pdf` for the print path, and
//! `menu-qr-<date>.png` for QR codes.

use crate::compose::ExportPage;
use crate::config::SiteConfig;
use crate::pdf::{self, PdfError};
use crate::rasterize::{RasterFormat, RasterOptions, Rasterizer, RasterizeError};
use crate::render;
use base64::Engine as _;
use maud::html;
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("An export is already running")]
    Busy,
    #[error("No page named {0:?}")]
    UnknownPage(String),
    #[error("Page {0:?} has no content to export")]
    EmptyPage(String),
    #[error("Nothing to export: every page is empty")]
    NothingToExport,
    #[error(transparent)]
    Rasterize(#[from] RasterizeError),
    #[error(transparent)]
    Pdf(#[from] PdfError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One file written by an export operation.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes: u64,
}

/// PDF export scope.
#[derive(Debug, Clone, Copy)]
pub enum PdfScope<'a> {
    /// One page, named `menu-<key>.pdf`.
    Current(&'a str),
    /// Every non-empty page, named `menu-complete.pdf`.
    Full,
}

/// Artifact name for a QR export on the given date.
pub fn qr_artifact_name(date: chrono::NaiveDate) -> String {
    format!("menu-qr-{}.png", date.format("%Y-%m-%d"))
}

pub struct Exporter<'a> {
    rasterizer: &'a dyn Rasterizer,
    config: &'a SiteConfig,
    output_dir: PathBuf,
    busy: Cell<bool>,
}

/// Clears the busy flag when the export ends, on every path.
struct BusyGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl<'a> Exporter<'a> {
    pub fn new(
        rasterizer: &'a dyn Rasterizer,
        config: &'a SiteConfig,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            rasterizer,
            config,
            output_dir: output_dir.into(),
            busy: Cell::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    fn begin(&self) -> Result<BusyGuard<'_>, ExportError> {
        if self.busy.replace(true) {
            return Err(ExportError::Busy);
        }
        Ok(BusyGuard { flag: &self.busy })
    }

    /// Export one page as an image artifact.
    pub fn export_page_image(
        &self,
        pages: &[ExportPage],
        key: &str,
        format: RasterFormat,
    ) -> Result<Artifact, ExportError> {
        let _guard = self.begin()?;
        let (index, page) = find_page(pages, key)?;
        let bytes = self.raster_page(pages, index, format)?;
        self.write_artifact(
            &format!("menu-{}.{}", page.key, format.extension()),
            &bytes,
        )
    }

    /// Export every non-empty page as an image artifact, in composer order,
    /// with the configured pacing delay between files.
    pub fn export_all_images(
        &self,
        pages: &[ExportPage],
        format: RasterFormat,
    ) -> Result<Vec<Artifact>, ExportError> {
        let _guard = self.begin()?;
        let mut artifacts = Vec::new();
        for (index, page) in pages.iter().enumerate() {
            if page.is_empty() {
                continue;
            }
            if !artifacts.is_empty() {
                self.pace();
            }
            let bytes = self.raster_page(pages, index, format)?;
            artifacts.push(self.write_artifact(
                &format!("menu-{}.{}", page.key, format.extension()),
                &bytes,
            )?);
        }
        if artifacts.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        Ok(artifacts)
    }

    /// Export one page or the full menu as a PDF.
    pub fn export_pdf(
        &self,
        pages: &[ExportPage],
        scope: PdfScope<'_>,
    ) -> Result<Artifact, ExportError> {
        let _guard = self.begin()?;
        match scope {
            PdfScope::Current(key) => {
                let (index, page) = find_page(pages, key)?;
                let raster = self.raster_page(pages, index, RasterFormat::Png)?;
                let bytes = pdf::assemble(&page.title, &[raster])?;
                self.write_artifact(&format!("menu-{}.pdf", page.key), &bytes)
            }
            PdfScope::Full => {
                let mut rasters = Vec::new();
                for (index, page) in pages.iter().enumerate() {
                    if page.is_empty() {
                        continue;
                    }
                    rasters.push(self.raster_page(pages, index, RasterFormat::Png)?);
                }
                if rasters.is_empty() {
                    return Err(ExportError::NothingToExport);
                }
                let title = format!("{} Menu", self.config.brand.name);
                let bytes = pdf::assemble(&title, &rasters)?;
                self.write_artifact("menu-complete.pdf", &bytes)
            }
        }
    }

    /// Export one page through the rasterizer's print path.
    ///
    /// The page is first rasterized like any image export, then wrapped in a
    /// minimal document holding just that bitmap; the rasterizer waits for
    /// image decode before printing.
    pub fn export_print(
        &self,
        pages: &[ExportPage],
        key: &str,
    ) -> Result<Artifact, ExportError> {
        let _guard = self.begin()?;
        let (index, page) = find_page(pages, key)?;
        let raster = self.raster_page(pages, index, RasterFormat::Png)?;

        let encoded = base64::engine::general_purpose::STANDARD.encode(&raster);
        let wrapper = html! {
            (maud::DOCTYPE)
            html {
                head {
                    style { "html,body{margin:0;padding:0}img{width:100%;display:block}" }
                }
                body {
                    img src=(format!("data:image/png;base64,{encoded}"));
                }
            }
        };

        let options = RasterOptions::new(&self.config.export, RasterFormat::Png);
        let bytes = self
            .rasterizer
            .print_pdf(&wrapper.into_string(), &options)?;
        self.write_artifact(&format!("menu-{}-print.pdf", page.key), &bytes)
    }

    fn raster_page(
        &self,
        pages: &[ExportPage],
        index: usize,
        format: RasterFormat,
    ) -> Result<Vec<u8>, ExportError> {
        let markup = render::render_export_page(&pages[index], index + 1, pages.len(), self.config);
        let options = RasterOptions::new(&self.config.export, format);
        Ok(self.rasterizer.rasterize(&markup.into_string(), &options)?)
    }

    fn write_artifact(&self, name: &str, bytes: &[u8]) -> Result<Artifact, ExportError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(name);
        fs::write(&path, bytes)?;
        Ok(Artifact {
            path,
            bytes: bytes.len() as u64,
        })
    }

    fn pace(&self) {
        let ms = self.config.export.pacing_ms;
        if ms > 0 {
            thread::sleep(Duration::from_millis(ms));
        }
    }
}

fn find_page<'p>(pages: &'p [ExportPage], key: &str) -> Result<(usize, &'p ExportPage), ExportError> {
    let index = pages
        .iter()
        .position(|p| p.key == key)
        .ok_or_else(|| ExportError::UnknownPage(key.to_string()))?;
    let page = &pages[index];
    if page.is_empty() {
        return Err(ExportError::EmptyPage(key.to_string()));
    }
    Ok((index, page))
}
