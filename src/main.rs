use clap::{Parser, Subcommand, ValueEnum};
use menu_press::model::{MenuItem, SectionKey};
use menu_press::rasterize::RasterFormat;
use menu_press::{auth, compose, config, export, output, persist, qr, rasterize, render, store};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menu-press")]
#[command(about = "Digital menu builder: browsable HTML menu and print-ready exports")]
#[command(long_about = "\
Digital menu builder: browsable HTML menu and print-ready exports

The menu lives as three JSON tables under the data directory and seeds
itself from the bundled dataset on first use. Editing commands are
admin-gated: configure [admin] token in menu-press.toml and set the
MENU_PRESS_ADMIN_TOKEN environment variable to a matching value.

Typical workflow:

  menu-press show                        # inspect the current menu
  menu-press adjust 10                   # raise every price by 10%
  menu-press render                      # browsable HTML → dist/index.html
  menu-press export all-images           # one PNG per menu page
  menu-press export pdf                  # the whole menu as one PDF
  menu-press qr                          # QR code for the menu URL

Run 'menu-press gen-config' to generate a documented menu-press.toml.")]
#[command(version)]
struct Cli {
    /// Menu store directory (overrides data_dir from the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output directory for rendered HTML and export artifacts
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory containing menu-press.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the menu summary: sections, categories, item counts
    Show,
    /// Write the browsable HTML menu to the output directory
    Render,
    /// Export print-ready artifacts
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
    /// Adjust every price by a percentage (admin)
    Adjust {
        /// Percentage change, e.g. 10 or -7.5
        percent: f64,
        /// Restrict the adjustment to one section
        #[arg(long)]
        section: Option<SectionKey>,
    },
    /// Append an item to a category (admin)
    Add {
        section: SectionKey,
        /// Zero-based category index within the section
        category: usize,
        /// Item as JSON, e.g. '{"name":"Cola","price":"₹100"}'
        item: String,
    },
    /// Replace an item wholesale (admin)
    Update {
        section: SectionKey,
        category: usize,
        /// Zero-based item index within the category
        index: usize,
        /// Replacement item as JSON
        item: String,
    },
    /// Delete an item; later items shift down (admin)
    Delete {
        section: SectionKey,
        category: usize,
        index: usize,
    },
    /// Restore the menu to the bundled original dataset (admin)
    Reset,
    /// Delete the store tables; the store reseeds on next use (admin)
    ResetDb {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Write a QR code pointing at the public menu URL
    Qr {
        /// Target URL (defaults to brand.menu_url from the config)
        #[arg(long)]
        url: Option<String>,
    },
    /// Print a stock menu-press.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum ExportTarget {
    /// One page as a PNG or JPEG image
    Image {
        /// Page key: snacks, food, beverages-1..3, sides
        #[arg(long)]
        page: String,
        #[arg(long, value_enum, default_value = "png")]
        format: ImageFormat,
    },
    /// Every non-empty page as an image
    AllImages {
        #[arg(long, value_enum, default_value = "png")]
        format: ImageFormat,
    },
    /// One page, or the whole menu, as a PDF
    Pdf {
        /// Page key; omit for the complete menu
        #[arg(long, conflicts_with = "all")]
        page: Option<String>,
        /// Export the complete menu (the default when --page is omitted)
        #[arg(long)]
        all: bool,
    },
    /// One page as a print-ready PDF (Chrome's print path)
    Print {
        #[arg(long)]
        page: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ImageFormat {
    Png,
    Jpeg,
}

impl From<ImageFormat> for RasterFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => RasterFormat::Png,
            ImageFormat::Jpeg => RasterFormat::Jpeg,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data_dir));
    let file_store = persist::FileStore::new(&data_dir);

    match cli.command {
        Command::Show => {
            let document = file_store.load()?;
            output::print_summary(&document);
        }
        Command::Render => {
            let document = file_store.load()?;
            let html = render::render_menu(&document, &config).into_string();
            std::fs::create_dir_all(&cli.output)?;
            let path = cli.output.join("index.html");
            std::fs::write(&path, html)?;
            println!("Rendered menu → {}", path.display());
        }
        Command::Export { target } => {
            let document = file_store.load()?;
            let pages = compose::compose(&document);
            let rasterizer = rasterize::ChromeRasterizer::new(&config.export)?;
            let exporter = export::Exporter::new(&rasterizer, &config, &cli.output);

            match target {
                ExportTarget::Image { page, format } => {
                    let artifact = exporter.export_page_image(&pages, &page, format.into())?;
                    output::print_artifact_notification(&artifact);
                }
                ExportTarget::AllImages { format } => {
                    let artifacts = exporter.export_all_images(&pages, format.into())?;
                    output::print_export_output(&artifacts);
                }
                ExportTarget::Pdf { page, all: _ } => {
                    let scope = match &page {
                        Some(key) => export::PdfScope::Current(key),
                        None => export::PdfScope::Full,
                    };
                    let artifact = exporter.export_pdf(&pages, scope)?;
                    output::print_artifact_notification(&artifact);
                }
                ExportTarget::Print { page } => {
                    let artifact = exporter.export_print(&pages, &page)?;
                    output::print_artifact_notification(&artifact);
                }
            }
        }
        Command::Adjust { percent, section } => {
            let mut store = admin_store(&file_store, &config)?;
            store.adjust_prices(percent, section)?;
            file_store.save(store.menu())?;
            match section {
                Some(key) => println!("Adjusted {key} prices by {percent}%"),
                None => println!("Adjusted all prices by {percent}%"),
            }
        }
        Command::Add {
            section,
            category,
            item,
        } => {
            let item: MenuItem = serde_json::from_str(&item)?;
            let name = item.name.clone();
            let mut store = admin_store(&file_store, &config)?;
            store.add_item(section, category, item)?;
            file_store.save(store.menu())?;
            println!("Added {name:?} to {section}, category {category}");
        }
        Command::Update {
            section,
            category,
            index,
            item,
        } => {
            let item: MenuItem = serde_json::from_str(&item)?;
            let name = item.name.clone();
            let mut store = admin_store(&file_store, &config)?;
            store.update_item(section, category, index, item)?;
            file_store.save(store.menu())?;
            println!("Replaced {section}, category {category}, item {index} with {name:?}");
        }
        Command::Delete {
            section,
            category,
            index,
        } => {
            let mut store = admin_store(&file_store, &config)?;
            store.delete_item(section, category, index)?;
            file_store.save(store.menu())?;
            println!("Deleted {section}, category {category}, item {index}");
        }
        Command::Reset => {
            require_admin(&config)?;
            file_store.save(&persist::default_document())?;
            println!("Menu restored to the original dataset");
        }
        Command::ResetDb { yes } => {
            if !yes {
                return Err("reset-db deletes the store tables; pass --yes to confirm".into());
            }
            require_admin(&config)?;
            file_store.clear_all()?;
            println!(
                "Store cleared: {} (reseeds from the bundled dataset on next use)",
                file_store.dir().display()
            );
        }
        Command::Qr { url } => {
            let url = url.unwrap_or_else(|| config.brand.menu_url.clone());
            let image = qr::encode(&url, &config.qr)?;
            std::fs::create_dir_all(&cli.output)?;
            let name = export::qr_artifact_name(chrono::Local::now().date_naive());
            let path = cli.output.join(name);
            image.save(&path)?;
            let bytes = std::fs::metadata(&path)?.len();
            output::print_artifact_notification(&export::Artifact { path, bytes });
            println!("Target: {url}");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the store and switch it into edit mode, or explain how to get admin
/// access.
fn admin_store(
    file_store: &persist::FileStore,
    config: &config::SiteConfig,
) -> Result<store::MenuStore, Box<dyn std::error::Error>> {
    let mut store = store::MenuStore::new(file_store.load()?);
    let auth = auth::TokenAuth::from_env(config.admin.token.as_deref());
    store.enable_edit_mode(&auth).map_err(|e| {
        format!(
            "{e}: configure [admin] token in menu-press.toml and set {}",
            auth::ADMIN_TOKEN_ENV
        )
    })?;
    Ok(store)
}

fn require_admin(config: &config::SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    use auth::Authorizer as _;
    let auth = auth::TokenAuth::from_env(config.admin.token.as_deref());
    if !auth.is_admin() {
        return Err(format!(
            "admin privilege required: configure [admin] token in menu-press.toml and set {}",
            auth::ADMIN_TOKEN_ENV
        )
        .into());
    }
    Ok(())
}
