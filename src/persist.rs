//! File-backed menu store.
//!
//! The document persists as three related tables under the data directory,
//! one JSON file each: `sections.json`, `categories.json`, `items.json`.
//! Records carry their own id, a parent reference, and a position; positions
//! define order, so the files can be regenerated or hand-edited without the
//! array order mattering.
//!
//! An empty or missing store seeds itself from the bundled default dataset
//! on the next load. `clear_all` deletes the tables in dependency order
//! (items, then categories, then sections) and stops at the first failure,
//! so a partial clear never leaves orphaned parents behind.

use crate::model::{MenuCategory, MenuDocument, MenuItem, MenuSection, ALL_SECTIONS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Store has no section {0:?}")]
    MissingSection(String),
}

const SECTIONS_FILE: &str = "sections.json";
const CATEGORIES_FILE: &str = "categories.json";
const ITEMS_FILE: &str = "items.json";

/// Bundled default dataset, embedded at compile time.
const DEFAULT_MENU: &str = include_str!("../static/default-menu.json");

#[derive(Debug, Serialize, Deserialize)]
struct SectionRecord {
    id: u64,
    key: String,
    title: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CategoryRecord {
    id: u64,
    section_id: u64,
    position: u32,
    title: String,
    icon: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ItemRecord {
    id: u64,
    category_id: u64,
    position: u32,
    item: MenuItem,
}

/// The bundled default document.
pub fn default_document() -> MenuDocument {
    serde_json::from_str(DEFAULT_MENU).expect("bundled default menu must parse")
}

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the document, seeding from the bundled dataset first if the
    /// store is empty or missing.
    pub fn load(&self) -> Result<MenuDocument, PersistError> {
        if !self.is_populated() {
            self.save(&default_document())?;
        }

        let sections: Vec<SectionRecord> = self.read_table(SECTIONS_FILE)?;
        let mut categories: Vec<CategoryRecord> = self.read_table(CATEGORIES_FILE)?;
        let mut items: Vec<ItemRecord> = self.read_table(ITEMS_FILE)?;
        categories.sort_by_key(|c| c.position);
        items.sort_by_key(|i| i.position);

        let mut document = MenuDocument::default();
        for key in ALL_SECTIONS {
            let section = sections
                .iter()
                .find(|s| s.key == key.as_str())
                .ok_or_else(|| PersistError::MissingSection(key.as_str().to_string()))?;

            let mut out = MenuSection {
                title: section.title.clone(),
                categories: Vec::new(),
            };
            for category in categories.iter().filter(|c| c.section_id == section.id) {
                out.categories.push(MenuCategory {
                    title: category.title.clone(),
                    icon: category.icon.clone(),
                    items: items
                        .iter()
                        .filter(|i| i.category_id == category.id)
                        .map(|i| i.item.clone())
                        .collect(),
                });
            }
            *document.section_mut(key) = out;
        }
        Ok(document)
    }

    /// Re-normalize the document into the three tables and write them all.
    pub fn save(&self, document: &MenuDocument) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;

        let mut sections = Vec::new();
        let mut categories = Vec::new();
        let mut items = Vec::new();
        let mut next_id = 1u64;

        for key in ALL_SECTIONS {
            let section = document.section(key);
            let section_id = next_id;
            next_id += 1;
            sections.push(SectionRecord {
                id: section_id,
                key: key.as_str().to_string(),
                title: section.title.clone(),
            });

            for (cat_pos, category) in section.categories.iter().enumerate() {
                let category_id = next_id;
                next_id += 1;
                categories.push(CategoryRecord {
                    id: category_id,
                    section_id,
                    position: cat_pos as u32,
                    title: category.title.clone(),
                    icon: category.icon.clone(),
                });

                for (item_pos, item) in category.items.iter().enumerate() {
                    items.push(ItemRecord {
                        id: next_id,
                        category_id,
                        position: item_pos as u32,
                        item: item.clone(),
                    });
                    next_id += 1;
                }
            }
        }

        self.write_table(SECTIONS_FILE, &sections)?;
        self.write_table(CATEGORIES_FILE, &categories)?;
        self.write_table(ITEMS_FILE, &items)?;
        Ok(())
    }

    /// Delete the tables in dependency order, stopping at the first failure.
    /// Already-absent tables count as cleared.
    pub fn clear_all(&self) -> Result<(), PersistError> {
        for name in [ITEMS_FILE, CATEGORIES_FILE, SECTIONS_FILE] {
            match fs::remove_file(self.dir.join(name)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn is_populated(&self) -> bool {
        [SECTIONS_FILE, CATEGORIES_FILE, ITEMS_FILE]
            .iter()
            .all(|name| self.dir.join(name).exists())
    }

    fn read_table<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<Vec<T>, PersistError> {
        let content = fs::read_to_string(self.dir.join(name))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_table<T: Serialize>(&self, name: &str, records: &[T]) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(records)?;
        fs::write(self.dir.join(name), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_document_parses_and_is_complete() {
        let doc = default_document();
        assert_eq!(doc.snacks_and_starters.title, "SNACKS & STARTERS");
        assert_eq!(doc.beverages_menu.categories.len(), 8);
        assert!(doc.item_count() > 0);
    }

    #[test]
    fn empty_store_seeds_on_load() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        let doc = store.load().unwrap();
        assert_eq!(doc, default_document());
        assert!(tmp.path().join("sections.json").exists());
        assert!(tmp.path().join("categories.json").exists());
        assert!(tmp.path().join("items.json").exists());
    }

    #[test]
    fn save_then_load_round_trips_edits() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        let mut doc = store.load().unwrap();
        doc.side_items.categories[0]
            .items
            .push(crate::test_helpers::item("Jal Jeera", "₹99"));
        store.save(&doc).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, doc);
    }

    #[test]
    fn positions_define_order_not_record_order() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        store.load().unwrap();

        // Reverse the on-disk category record order; positions stay intact.
        let path = tmp.path().join("categories.json");
        let mut records: Vec<CategoryRecord> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        records.reverse();
        fs::write(&path, serde_json::to_string_pretty(&records).unwrap()).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc, default_document());
    }

    #[test]
    fn clear_all_removes_tables_and_reseeds_on_next_load() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        store.load().unwrap();

        store.clear_all().unwrap();
        assert!(!tmp.path().join("items.json").exists());
        assert!(!tmp.path().join("sections.json").exists());

        let doc = store.load().unwrap();
        assert_eq!(doc, default_document());
    }

    #[test]
    fn clear_all_on_empty_store_is_ok() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        store.clear_all().unwrap();
    }

    #[test]
    fn missing_section_record_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        store.load().unwrap();

        let path = tmp.path().join("sections.json");
        let mut records: Vec<SectionRecord> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        records.retain(|s| s.key != "foodMenu");
        fs::write(&path, serde_json::to_string_pretty(&records).unwrap()).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, PersistError::MissingSection(k) if k == "foodMenu"));
    }

    #[test]
    fn partial_store_counts_as_empty_and_reseeds() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        store.load().unwrap();

        fs::remove_file(tmp.path().join("items.json")).unwrap();
        let doc = store.load().unwrap();
        assert_eq!(doc, default_document());
    }
}
