//! # Menu Press
//!
//! A command-line digital-menu builder for restaurants and bars. The menu
//! lives as a small file-backed store, edits are admin-gated, and the output
//! is both a browsable HTML menu and a set of print-ready artifacts:
//! per-page PNG/JPEG images, a multi-page PDF, and a QR code pointing at the
//! public menu URL.
//!
//! # Architecture: Load → Edit → Compose → Render → Export
//!
//! ```text
//! 1. Load      data-dir/  →  MenuDocument + pristine snapshot    (persist, store)
//! 2. Edit      admin mutations on the live document              (store, auth)
//! 3. Compose   document   →  six ordered export pages            (compose)
//! 4. Render    page       →  fixed-layout HTML                   (render)
//! 5. Export    HTML       →  Chrome raster  →  PNG/JPEG/PDF      (rasterize, export, pdf)
//! ```
//!
//! Each stage is a pure function over the previous stage's output wherever
//! possible, so unit tests exercise composition, rendering, and export
//! bookkeeping without launching a browser (the rasterizer is a trait; tests
//! swap in a recording mock).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | The menu document tree: sections, categories, items, price shapes |
//! | [`store`] | Live document + pristine snapshot; positional and id-based mutations |
//! | [`price`] | Currency-string parsing and percentage adjustment |
//! | [`auth`] | Admin authorization seam (`Authorizer` trait, token check) |
//! | [`persist`] | Three-table JSON store with seed-on-empty-load |
//! | [`compose`] | Fixed page plan: sections → export pages, split beverages |
//! | [`render`] | Maud templates for export pages and the browsable menu |
//! | [`rasterize`] | Headless-Chrome capture behind the `Rasterizer` trait |
//! | [`pdf`] | Full-bleed A4 assembly of raster pages into one PDF |
//! | [`export`] | Artifact pipeline: naming, pacing, busy flag, skip-empty rules |
//! | [`qr`] | Colored QR code for the public menu URL |
//! | [`config`] | `menu-press.toml` loading, validation, merging |
//! | [`output`] | CLI output formatting — information-first display of results |
//!
//! # Design Decisions
//!
//! ## Price Shapes as a Sum Type
//!
//! Menu items are priced one of three ways: a single price, a half/full
//! portion pair, or per-pour size tiers. The persisted JSON keeps these as
//! sparse optional fields; in memory they are a three-case enum so "exactly
//! one shape per item" holds by construction and every consumer (display,
//! adjustment, export layout) matches exhaustively instead of null-checking.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error, interpolation is auto-escaped, and there is no
//! template directory to ship. Untrusted item names entered through the
//! admin commands cannot break out of the page.
//!
//! ## Chrome as the Raster Engine
//!
//! Export pages are pixel-perfect fixed layouts with text shadows, gradients,
//! and emoji — exactly what a browser engine renders well and a from-scratch
//! rasterizer does not. Pages are staged as temp files, captured headless at
//! an oversampling scale, and assembled into PDFs in pure Rust. The browser
//! sits behind the [`rasterize::Rasterizer`] trait so nothing else in the
//! crate knows it exists.
//!
//! ## Positions Are the Durable Order
//!
//! The store persists sections, categories, and items as three related JSON
//! tables whose records carry explicit positions. Array order on disk is
//! irrelevant, files can be hand-edited, and an empty store reseeds itself
//! from the bundled dataset on the next load.

pub mod auth;
pub mod compose;
pub mod config;
pub mod export;
pub mod model;
pub mod output;
pub mod pdf;
pub mod persist;
pub mod price;
pub mod qr;
pub mod rasterize;
pub mod render;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
