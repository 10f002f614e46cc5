//! HTML rendering.
//!
//! Two surfaces, both built with [maud](https://maud.lambda.xyz/) compile-time
//! templates so all interpolated text is escaped at construction time:
//!
//! - **Export pages**: fixed-geometry documents, one per composed page, fed to
//!   the rasterizer. Layout is pinned to the configured page size; nothing
//!   responsive. CSS embedded at compile time from `static/print.css`.
//! - **Browsable menu** (`/index.html`): a single scrolling page of the whole
//!   document with section navigation. Unavailable items are dimmed and
//!   tagged, never removed. CSS from `static/menu.css`.
//!
//! Colors and geometry flow in as CSS custom properties set on `body`, so the
//! stylesheets stay static and the config stays the single source of truth.

use crate::compose::{ExportPage, Variant};
use crate::config::{PaletteConfig, SiteConfig};
use crate::model::{MenuCategory, MenuDocument, MenuItem, PriceShape, ALL_SECTIONS};
use maud::{html, Markup, DOCTYPE};

const PRINT_CSS: &str = include_str!("../static/print.css");
const MENU_CSS: &str = include_str!("../static/menu.css");

/// Size-tier column labels for categories priced per pour size. Fixed four
/// columns; categories with fewer tiers leave the leading columns blank.
pub const SIZE_LABELS: [&str; 4] = ["30ml", "60ml", "90ml", "180ml"];

/// Resolve a page variant to its configured accent color.
pub fn accent(palette: &PaletteConfig, variant: Variant) -> &str {
    match variant {
        Variant::Cyan => &palette.cyan,
        Variant::Magenta => &palette.magenta,
        Variant::Gold => &palette.gold,
    }
}

/// Renders the base HTML document structure.
fn base_document(title: &str, css: &str, body_style: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
                style { (css) }
            }
            body style=(body_style) {
                (content)
            }
        }
    }
}

// ============================================================================
// Export pages
// ============================================================================

/// Renders one export page as a complete HTML document at the configured
/// fixed geometry. `number` is 1-based; the footer shows "Page X of N".
pub fn render_export_page(
    page: &ExportPage,
    number: usize,
    total: usize,
    config: &SiteConfig,
) -> Markup {
    let palette = &config.palette;
    let body_style = format!(
        "--accent:{accent};--price:{price};--bg:{bg};--page-width:{w}px;--page-height:{h}px",
        accent = accent(palette, page.variant),
        price = palette.price,
        bg = palette.background,
        w = config.export.page_width,
        h = config.export.page_height,
    );

    let grid_class = if page.categories.len() >= 2 {
        "category-grid two-col"
    } else {
        "category-grid"
    };

    let content = html! {
        div.page {
            div.frame {
                header.masthead {
                    div.established { (config.brand.established) }
                    h1.brand { (config.brand.name) }
                    div.divider { "◆ ◆ ◆" }
                    div.tagline { (config.brand.tagline) }
                }
                div.section-title {
                    h2 { (page.title) }
                }
                div class=(grid_class) {
                    @for category in &page.categories {
                        (render_export_category(category))
                    }
                }
                footer.page-footer {
                    div.divider {}
                    div.disclaimer { (config.brand.disclaimer) }
                    div.page-num { "Page " (number) " of " (total) }
                }
            }
        }
    };

    base_document(&page.title, PRINT_CSS, &body_style, content)
}

fn render_export_category(category: &MenuCategory) -> Markup {
    let sized = category.has_sizes();
    html! {
        div.category {
            div.category-header {
                @if let Some(icon) = &category.icon {
                    span.icon { (icon) }
                }
                h3 { (category.title) }
            }
            @if sized {
                div.size-labels {
                    div {}
                    @for label in SIZE_LABELS {
                        div { (label) }
                    }
                }
            }
            @for item in &category.items {
                @if sized {
                    (render_sized_item(item))
                } @else {
                    (render_plain_item(item))
                }
            }
        }
    }
}

fn render_plain_item(item: &MenuItem) -> Markup {
    html! {
        div.item {
            div {
                div.item-name { (item.name) }
                @if let Some(desc) = &item.description {
                    div.item-desc { (desc) }
                }
            }
            (price_block(&item.shape))
        }
    }
}

/// Item row inside a size-tier category: one cell per tier column so prices
/// line up under the label row. Items that are not priced per size keep
/// their prices in the trailing columns.
fn render_sized_item(item: &MenuItem) -> Markup {
    html! {
        div.item.sized {
            div {
                div.item-name { (item.name) }
                @if let Some(desc) = &item.description {
                    div.item-desc { (desc) }
                }
            }
            @for col in 0..SIZE_LABELS.len() {
                div.price { (tier_cell(&item.shape, col)) }
            }
        }
    }
}

fn tier_cell(shape: &PriceShape, col: usize) -> &str {
    let last = SIZE_LABELS.len() - 1;
    match shape {
        PriceShape::Sizes(sizes) => sizes.get(col).map(String::as_str).unwrap_or(""),
        PriceShape::Single(price) => {
            if col == last {
                price
            } else {
                ""
            }
        }
        PriceShape::HalfFull { half, full } => match col {
            c if c == last - 1 => half,
            c if c == last => full,
            _ => "",
        },
    }
}

fn price_block(shape: &PriceShape) -> Markup {
    html! {
        div.price {
            @match shape {
                PriceShape::Single(price) => {
                    (price)
                }
                PriceShape::HalfFull { half, full } => {
                    span.tier-label { "Half" } (half) " "
                    span.tier-label { "Full" } (full)
                }
                PriceShape::Sizes(sizes) => {
                    @for (i, price) in sizes.iter().enumerate() {
                        @if i > 0 { " / " }
                        span.tier-label { (SIZE_LABELS.get(i).copied().unwrap_or("")) }
                        (price)
                    }
                }
            }
        }
    }
}

// ============================================================================
// Browsable menu
// ============================================================================

/// Renders the whole document as a browsable single-page site.
pub fn render_menu(document: &MenuDocument, config: &SiteConfig) -> Markup {
    let palette = &config.palette;
    let body_style = format!(
        "--bg:{bg};--cyan:{cyan};--magenta:{magenta};--gold:{gold};--price:{price}",
        bg = palette.background,
        cyan = palette.cyan,
        magenta = palette.magenta,
        gold = palette.gold,
        price = palette.price,
    );

    let content = html! {
        header.site-header {
            div.established { (config.brand.established) }
            h1 { (config.brand.name) }
            div.tagline { (config.brand.tagline) }
        }
        nav.section-nav {
            @for key in ALL_SECTIONS {
                a href={ "#" (key.as_str()) } { (document.section(key).title) }
            }
        }
        main {
            @for key in ALL_SECTIONS {
                @let section = document.section(key);
                section.menu-section id=(key.as_str()) {
                    h2 { (section.title) }
                    @for category in &section.categories {
                        div.category {
                            h3 {
                                @if let Some(icon) = &category.icon {
                                    (icon) " "
                                }
                                (category.title)
                            }
                            @for item in &category.items {
                                (render_menu_item(item))
                            }
                        }
                    }
                }
            }
        }
        footer.site-footer {
            (config.brand.disclaimer)
        }
    };

    base_document(&config.brand.name, MENU_CSS, &body_style, content)
}

fn render_menu_item(item: &MenuItem) -> Markup {
    let row_class = if item.available {
        "item"
    } else {
        "item unavailable"
    };
    html! {
        div class=(row_class) {
            div {
                span.item-name { (item.name) }
                @if !item.available {
                    span.tag { "unavailable" }
                }
                @if let Some(desc) = &item.description {
                    div.item-desc { (desc) }
                }
            }
            (price_block(&item.shape))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
