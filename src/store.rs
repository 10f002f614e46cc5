//! The menu store: single source of truth for the live document.
//!
//! A [`MenuStore`] owns two copies of the menu: the **live** document that
//! every mutation targets, and the pristine **snapshot** taken at load time.
//! The snapshot is never mutated; [`MenuStore::reset_to_original`] replaces
//! the live document with a deep copy of it, so repeated resets always land
//! on the same baseline.
//!
//! ## Addressing and error policy
//!
//! Mutations address items positionally — `(section, category index, item
//! index)` — because that is the order the document displays in. Deleting an
//! item shifts later indices down, so callers must re-derive positions after
//! every mutation rather than caching them. For callers that need references
//! that survive unrelated edits, every item also carries a stable [`ItemId`]
//! assigned here at load/insert time, and `update_item_by_id` /
//! `delete_item_by_id` resolve id → position only at the point of mutation.
//!
//! Every mutation that addresses a nonexistent position fails with
//! [`StoreError::InvalidReference`]. There are no silent no-ops.
//!
//! ## Edit mode
//!
//! Mutations are privileged: they require edit mode, and edit mode can only
//! be enabled through an [`Authorizer`] that confirms admin privilege.

use crate::auth::Authorizer;
use crate::model::{ItemId, MenuDocument, MenuItem, SectionKey};
use crate::price;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("no such position: section {section}, category {category}{}",
        .item.map(|i| format!(", item {i}")).unwrap_or_default())]
    InvalidReference {
        section: SectionKey,
        category: usize,
        item: Option<usize>,
    },
    #[error("no item with id {0:?}")]
    UnknownItemId(ItemId),
    #[error("edit mode is not enabled")]
    EditLocked,
    #[error("admin privilege required to enable edit mode")]
    NotAuthorized,
}

/// Owns the live menu document and its pristine snapshot.
pub struct MenuStore {
    live: MenuDocument,
    snapshot: MenuDocument,
    edit_mode: bool,
    next_id: u64,
}

impl MenuStore {
    /// Create a store around a freshly loaded document. Assigns a stable id
    /// to every item and takes the reset snapshot.
    pub fn new(mut document: MenuDocument) -> Self {
        let mut next_id = 1;
        for key in crate::model::ALL_SECTIONS {
            for category in &mut document.section_mut(key).categories {
                for item in &mut category.items {
                    item.id = Some(ItemId(next_id));
                    next_id += 1;
                }
            }
        }
        Self {
            snapshot: document.clone(),
            live: document,
            edit_mode: false,
            next_id,
        }
    }

    /// Read-only view of the live document.
    pub fn menu(&self) -> &MenuDocument {
        &self.live
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Switch edit mode on. Requires the authorizer to confirm admin
    /// privilege; enforcement here makes the mutations privileged even if
    /// the store is driven by something other than the CLI.
    pub fn enable_edit_mode(&mut self, auth: &dyn Authorizer) -> Result<(), StoreError> {
        if !auth.is_admin() {
            return Err(StoreError::NotAuthorized);
        }
        self.edit_mode = true;
        Ok(())
    }

    pub fn disable_edit_mode(&mut self) {
        self.edit_mode = false;
    }

    /// Append an item to the addressed category. Returns the stable id
    /// assigned to the new item.
    pub fn add_item(
        &mut self,
        section: SectionKey,
        category_index: usize,
        mut item: MenuItem,
    ) -> Result<ItemId, StoreError> {
        self.require_edit_mode()?;
        let id = ItemId(self.next_id);
        let category = category_mut(&mut self.live, section, category_index)?;
        item.id = Some(id);
        category.items.push(item);
        self.next_id += 1;
        Ok(id)
    }

    /// Replace the item at the addressed position wholesale (not a merge).
    /// The replacement keeps the position's stable id.
    pub fn update_item(
        &mut self,
        section: SectionKey,
        category_index: usize,
        item_index: usize,
        mut item: MenuItem,
    ) -> Result<(), StoreError> {
        self.require_edit_mode()?;
        let category = category_mut(&mut self.live, section, category_index)?;
        let slot = category.items.get_mut(item_index).ok_or({
            StoreError::InvalidReference {
                section,
                category: category_index,
                item: Some(item_index),
            }
        })?;
        item.id = slot.id;
        *slot = item;
        Ok(())
    }

    /// Remove the item at the addressed position. Later items in the same
    /// category shift down by one.
    pub fn delete_item(
        &mut self,
        section: SectionKey,
        category_index: usize,
        item_index: usize,
    ) -> Result<(), StoreError> {
        self.require_edit_mode()?;
        let category = category_mut(&mut self.live, section, category_index)?;
        if item_index >= category.items.len() {
            return Err(StoreError::InvalidReference {
                section,
                category: category_index,
                item: Some(item_index),
            });
        }
        category.items.remove(item_index);
        Ok(())
    }

    /// Replace an item addressed by its stable id.
    pub fn update_item_by_id(&mut self, id: ItemId, item: MenuItem) -> Result<(), StoreError> {
        self.require_edit_mode()?;
        let (section, category, index) = self.position_of(id)?;
        self.update_item(section, category, index, item)
    }

    /// Delete an item addressed by its stable id.
    pub fn delete_item_by_id(&mut self, id: ItemId) -> Result<(), StoreError> {
        self.require_edit_mode()?;
        let (section, category, index) = self.position_of(id)?;
        self.delete_item(section, category, index)
    }

    /// Current position of an item id. Valid only until the next mutation.
    pub fn position_of(&self, id: ItemId) -> Result<(SectionKey, usize, usize), StoreError> {
        for (key, section) in self.live.sections() {
            for (ci, category) in section.categories.iter().enumerate() {
                for (ii, item) in category.items.iter().enumerate() {
                    if item.id == Some(id) {
                        return Ok((key, ci, ii));
                    }
                }
            }
        }
        Err(StoreError::UnknownItemId(id))
    }

    /// Apply a percentage change to every numeric price in the document, or
    /// in one section when `scope` is given. Atomic: the change is computed
    /// on a working copy and swapped in wholesale, so readers never observe
    /// a partially adjusted document.
    ///
    /// `percent` may be negative; zero is a valid no-op call. Price strings
    /// that do not parse as currency values are left untouched.
    pub fn adjust_prices(
        &mut self,
        percent: f64,
        scope: Option<SectionKey>,
    ) -> Result<(), StoreError> {
        self.require_edit_mode()?;
        let mut working = self.live.clone();
        let keys: Vec<SectionKey> = match scope {
            Some(key) => vec![key],
            None => crate::model::ALL_SECTIONS.to_vec(),
        };
        for key in keys {
            for category in &mut working.section_mut(key).categories {
                for item in &mut category.items {
                    item.shape.map_prices(|p| price::adjust(p, percent));
                }
            }
        }
        self.live = working;
        Ok(())
    }

    /// Discard all live edits and restore the originally loaded document.
    /// The snapshot itself is never touched.
    pub fn reset_to_original(&mut self) -> Result<(), StoreError> {
        self.require_edit_mode()?;
        self.live = self.snapshot.clone();
        Ok(())
    }

    fn require_edit_mode(&self) -> Result<(), StoreError> {
        if self.edit_mode {
            Ok(())
        } else {
            Err(StoreError::EditLocked)
        }
    }
}

fn category_mut(
    document: &mut MenuDocument,
    section: SectionKey,
    category_index: usize,
) -> Result<&mut crate::model::MenuCategory, StoreError> {
    document
        .section_mut(section)
        .categories
        .get_mut(category_index)
        .ok_or(StoreError::InvalidReference {
            section,
            category: category_index,
            item: None,
        })
}
