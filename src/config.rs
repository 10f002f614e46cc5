//! Venue configuration module.
//!
//! Handles loading and validating `menu-press.toml`. Configuration covers the
//! venue branding that appears on every rendered page, the neon palette, the
//! export geometry, QR generation, and admin access.
//!
//! ## Config File Location
//!
//! Place `menu-press.toml` in the working directory (or pass `--config`):
//!
//! ```text
//! my-venue/
//! ├── menu-press.toml          # Overrides stock defaults
//! └── data/                    # Menu store (created on first run)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! data_dir = "data"            # Where the menu store lives
//!
//! [brand]
//! name = "LIVE BAR"
//! established = "Est. 2024"
//! tagline = "Fine Dining & Premium Spirits • Pune"
//! disclaimer = "All prices inclusive of applicable taxes"
//! menu_url = "https://livebar.example/menu"
//!
//! [palette]
//! cyan = "#00f0ff"
//! magenta = "#ff00ff"
//! gold = "#ffd700"
//! price = "#fbbf24"
//! background = "#0a0a0f"
//!
//! [export]
//! page_width = 794             # Page size in CSS pixels (A4 at 96dpi)
//! page_height = 1123
//! scale = 3                    # Raster oversampling factor
//! pacing_ms = 800              # Delay between batch artifact writes
//! jpeg_quality = 95            # JPEG encoding quality (0-100)
//!
//! [qr]
//! width = 600
//! margin = 3
//! dark = "#8B5CF6"
//! light = "#FFFFFF"
//!
//! [admin]
//! # token = "change-me"        # Omit to disable editing entirely
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Venue configuration loaded from `menu-press.toml`.
///
/// All fields have stock defaults. User config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the persisted menu store.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Venue branding shown on every page.
    pub brand: BrandConfig,
    /// Neon accent palette.
    pub palette: PaletteConfig,
    /// Export geometry and pacing.
    pub export: ExportConfig,
    /// QR code generation settings.
    pub qr: QrConfig,
    /// Admin access settings.
    pub admin: AdminConfig,
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            brand: BrandConfig::default(),
            palette: PaletteConfig::default(),
            export: ExportConfig::default(),
            qr: QrConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("palette.cyan", &self.palette.cyan),
            ("palette.magenta", &self.palette.magenta),
            ("palette.gold", &self.palette.gold),
            ("palette.price", &self.palette.price),
            ("palette.background", &self.palette.background),
            ("qr.dark", &self.qr.dark),
            ("qr.light", &self.qr.light),
        ] {
            if !is_hex_color(value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a hex color like #00f0ff, got {value:?}"
                )));
            }
        }
        if self.export.page_width == 0 || self.export.page_height == 0 {
            return Err(ConfigError::Validation(
                "export.page_width and export.page_height must be non-zero".into(),
            ));
        }
        if self.export.scale == 0 || self.export.scale > 8 {
            return Err(ConfigError::Validation("export.scale must be 1-8".into()));
        }
        if self.export.jpeg_quality > 100 {
            return Err(ConfigError::Validation(
                "export.jpeg_quality must be 0-100".into(),
            ));
        }
        if self.qr.width == 0 {
            return Err(ConfigError::Validation("qr.width must be non-zero".into()));
        }
        if let Some(token) = &self.admin.token {
            if token.is_empty() {
                return Err(ConfigError::Validation(
                    "admin.token must not be empty (omit it to disable editing)".into(),
                ));
            }
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Venue branding shown in page headers and footers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
    /// Venue name, rendered as the page masthead.
    pub name: String,
    /// Establishment line under the masthead.
    pub established: String,
    /// Tagline under the masthead.
    pub tagline: String,
    /// Footer disclaimer.
    pub disclaimer: String,
    /// Public menu URL, the default QR code target.
    pub menu_url: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "LIVE BAR".to_string(),
            established: "Est. 2024".to_string(),
            tagline: "Fine Dining & Premium Spirits • Pune".to_string(),
            disclaimer: "All prices inclusive of applicable taxes".to_string(),
            menu_url: "https://livebar.example/menu".to_string(),
        }
    }
}

/// Neon accent palette. Each export page is tinted with one of the three
/// accents; prices render in their own fixed color.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub cyan: String,
    pub magenta: String,
    pub gold: String,
    /// Price column color (shared across all pages).
    pub price: String,
    /// Page background.
    pub background: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            cyan: "#00f0ff".to_string(),
            magenta: "#ff00ff".to_string(),
            gold: "#ffd700".to_string(),
            price: "#fbbf24".to_string(),
            background: "#0a0a0f".to_string(),
        }
    }
}

/// Export geometry and pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Page width in CSS pixels. The default is A4 at 96dpi.
    pub page_width: u32,
    /// Page height in CSS pixels.
    pub page_height: u32,
    /// Raster oversampling factor. Output bitmaps are
    /// `page_width * scale` pixels wide.
    pub scale: u32,
    /// Delay between artifact writes in batch exports, in milliseconds.
    pub pacing_ms: u64,
    /// JPEG encoding quality (0 = worst, 100 = best).
    pub jpeg_quality: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_width: 794,
            page_height: 1123,
            scale: 3,
            pacing_ms: 800,
            jpeg_quality: 95,
        }
    }
}

/// QR code generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QrConfig {
    /// Output image width/height in pixels.
    pub width: u32,
    /// Quiet-zone margin in modules.
    pub margin: u32,
    /// Module (foreground) color.
    pub dark: String,
    /// Background color.
    pub light: String,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            width: 600,
            margin: 3,
            dark: "#8B5CF6".to_string(),
            light: "#FFFFFF".to_string(),
        }
    }
}

/// Admin access settings.
///
/// Editing is disabled unless a token is configured and the caller presents
/// a matching one via the `MENU_PRESS_ADMIN_TOKEN` environment variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    pub token: Option<String>,
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "menu-press.toml";

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `menu-press.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no config file exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `menu-press.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `menu-press.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Menu Press Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# Directory holding the persisted menu store.
data_dir = "data"

# ---------------------------------------------------------------------------
# Branding - appears on every rendered page
# ---------------------------------------------------------------------------
[brand]
name = "LIVE BAR"
established = "Est. 2024"
tagline = "Fine Dining & Premium Spirits • Pune"
disclaimer = "All prices inclusive of applicable taxes"

# Public menu URL, the default QR code target.
menu_url = "https://livebar.example/menu"

# ---------------------------------------------------------------------------
# Palette - neon accents, one per export page
# ---------------------------------------------------------------------------
[palette]
cyan = "#00f0ff"
magenta = "#ff00ff"
gold = "#ffd700"
price = "#fbbf24"        # Price column, shared across all pages
background = "#0a0a0f"

# ---------------------------------------------------------------------------
# Export geometry
# ---------------------------------------------------------------------------
[export]
# Page size in CSS pixels. The default is A4 at 96dpi.
page_width = 794
page_height = 1123

# Raster oversampling factor. Output bitmaps are page_width * scale wide.
scale = 3

# Delay between artifact writes in batch exports, in milliseconds.
pacing_ms = 800

# JPEG encoding quality (0 = worst, 100 = best).
jpeg_quality = 95

# ---------------------------------------------------------------------------
# QR code generation
# ---------------------------------------------------------------------------
[qr]
width = 600              # Output image size in pixels
margin = 3               # Quiet-zone margin in modules
dark = "#8B5CF6"         # Module color
light = "#FFFFFF"        # Background color

# ---------------------------------------------------------------------------
# Admin access
# ---------------------------------------------------------------------------
[admin]
# Editing commands require this token to match the MENU_PRESS_ADMIN_TOKEN
# environment variable. Omit to disable editing entirely.
# token = "change-me"
"##
}
