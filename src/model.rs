//! The menu document tree shared across the whole pipeline.
//!
//! A [`MenuDocument`] is a fixed set of four named sections; each section is
//! an ordered list of categories; each category an ordered list of items.
//! Order is significant everywhere — it drives both the live display and the
//! export page layout, and positional indices are the addressing keys for
//! the store's mutation operations.
//!
//! ## Price shapes
//!
//! Every item carries exactly one of three price shapes:
//!
//! - a single price (`"₹149"`),
//! - a half/full pair (`"₹499"` / `"₹899"`),
//! - an ordered list of size-tier prices (30/60/90/180 ml pours).
//!
//! [`PriceShape`] models this as a sum type so "exactly one shape populated"
//! is enforced by construction. The persisted JSON keeps the original sparse
//! optional-field form (`price` / `halfPrice`+`fullPrice` / `sizes`); the
//! serde boundary goes through a raw mirror struct and rejects records that
//! populate zero or more than one shape.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    #[error("item '{0}' has no price shape (expected price, halfPrice+fullPrice, or sizes)")]
    MissingPriceShape(String),
    #[error("item '{0}' mixes price shapes (exactly one of price / halfPrice+fullPrice / sizes)")]
    AmbiguousPriceShape(String),
    #[error("item '{0}' has halfPrice without fullPrice (or vice versa)")]
    IncompletePair(String),
    #[error("item name must not be empty")]
    EmptyName,
}

/// Stable opaque identifier for an item, assigned by the store at load or
/// insert time. Never persisted — positions are the durable ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u64);

/// The three mutually exclusive ways an item is priced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceShape {
    /// One price string, e.g. `"₹149"`.
    Single(String),
    /// Half/full portion pair. Both are always present together.
    HalfFull { half: String, full: String },
    /// One price per serving-size tier, in tier order (30/60/90/180 ml).
    Sizes(Vec<String>),
}

impl PriceShape {
    /// Visit every price string in the shape.
    pub fn prices(&self) -> Vec<&str> {
        match self {
            PriceShape::Single(p) => vec![p.as_str()],
            PriceShape::HalfFull { half, full } => vec![half.as_str(), full.as_str()],
            PriceShape::Sizes(sizes) => sizes.iter().map(String::as_str).collect(),
        }
    }

    /// Apply `f` to every price string in place.
    pub fn map_prices(&mut self, mut f: impl FnMut(&str) -> String) {
        match self {
            PriceShape::Single(p) => *p = f(p),
            PriceShape::HalfFull { half, full } => {
                *half = f(half);
                *full = f(full);
            }
            PriceShape::Sizes(sizes) => {
                for s in sizes.iter_mut() {
                    *s = f(s);
                }
            }
        }
    }
}

/// A single orderable menu entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMenuItem", into = "RawMenuItem")]
pub struct MenuItem {
    /// Session-local stable id; `None` until the store assigns one.
    pub id: Option<ItemId>,
    pub name: String,
    pub shape: PriceShape,
    pub description: Option<String>,
    /// Display-only flag: unavailable items are dimmed, never removed.
    pub available: bool,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, shape: PriceShape) -> Self {
        Self {
            id: None,
            name: name.into(),
            shape,
            description: None,
            available: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Sparse wire form of an item, matching the persisted JSON records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RawMenuItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl TryFrom<RawMenuItem> for MenuItem {
    type Error = ModelError;

    fn try_from(raw: RawMenuItem) -> Result<Self, ModelError> {
        if raw.name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        let shape = match (raw.price, raw.half_price, raw.full_price, raw.sizes) {
            (Some(p), None, None, None) => PriceShape::Single(p),
            (None, Some(half), Some(full), None) => PriceShape::HalfFull { half, full },
            (None, None, None, Some(sizes)) => PriceShape::Sizes(sizes),
            (None, Some(_), None, None) | (None, None, Some(_), None) => {
                return Err(ModelError::IncompletePair(raw.name));
            }
            (None, None, None, None) => return Err(ModelError::MissingPriceShape(raw.name)),
            _ => return Err(ModelError::AmbiguousPriceShape(raw.name)),
        };
        Ok(MenuItem {
            id: None,
            name: raw.name,
            shape,
            description: raw.description,
            available: raw.available.unwrap_or(true),
        })
    }
}

impl From<MenuItem> for RawMenuItem {
    fn from(item: MenuItem) -> Self {
        let mut raw = RawMenuItem {
            name: item.name,
            price: None,
            half_price: None,
            full_price: None,
            sizes: None,
            description: item.description,
            // `true` is the implicit default and is omitted from the record.
            available: (!item.available).then_some(false),
        };
        match item.shape {
            PriceShape::Single(p) => raw.price = Some(p),
            PriceShape::HalfFull { half, full } => {
                raw.half_price = Some(half);
                raw.full_price = Some(full);
            }
            PriceShape::Sizes(sizes) => raw.sizes = Some(sizes),
        }
        raw
    }
}

/// Named grouping of items within a section (e.g. "Crystal Clear Vodkas").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuCategory {
    pub title: String,
    /// Short decorative glyph shown next to the title (usually an emoji).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub items: Vec<MenuItem>,
}

impl MenuCategory {
    /// Whether any item in the category is priced by size tiers. Drives the
    /// fixed tier-label row in the export layout.
    pub fn has_sizes(&self) -> bool {
        self.items
            .iter()
            .any(|i| matches!(i.shape, PriceShape::Sizes(_)))
    }
}

/// Top-level menu division (e.g. Beverages & Spirits).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuSection {
    pub title: String,
    pub categories: Vec<MenuCategory>,
}

/// The closed set of section keys. The set is fixed at build time — none of
/// the exposed operations can add or remove sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKey {
    SnacksAndStarters,
    FoodMenu,
    BeveragesMenu,
    SideItems,
}

/// Fixed section order, used everywhere sections are iterated.
pub const ALL_SECTIONS: [SectionKey; 4] = [
    SectionKey::SnacksAndStarters,
    SectionKey::FoodMenu,
    SectionKey::BeveragesMenu,
    SectionKey::SideItems,
];

impl SectionKey {
    /// Canonical string form, matching the persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::SnacksAndStarters => "snacksAndStarters",
            SectionKey::FoodMenu => "foodMenu",
            SectionKey::BeveragesMenu => "beveragesMenu",
            SectionKey::SideItems => "sideItems",
        }
    }

    pub fn parse(s: &str) -> Option<SectionKey> {
        ALL_SECTIONS.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::parse(s).ok_or_else(|| {
            let known: Vec<&str> = ALL_SECTIONS.iter().map(|k| k.as_str()).collect();
            format!("unknown section '{s}' (expected one of {known:?})")
        })
    }
}

/// The whole menu: four fixed sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MenuDocument {
    pub snacks_and_starters: MenuSection,
    pub food_menu: MenuSection,
    pub beverages_menu: MenuSection,
    pub side_items: MenuSection,
}

impl MenuDocument {
    pub fn section(&self, key: SectionKey) -> &MenuSection {
        match key {
            SectionKey::SnacksAndStarters => &self.snacks_and_starters,
            SectionKey::FoodMenu => &self.food_menu,
            SectionKey::BeveragesMenu => &self.beverages_menu,
            SectionKey::SideItems => &self.side_items,
        }
    }

    pub fn section_mut(&mut self, key: SectionKey) -> &mut MenuSection {
        match key {
            SectionKey::SnacksAndStarters => &mut self.snacks_and_starters,
            SectionKey::FoodMenu => &mut self.food_menu,
            SectionKey::BeveragesMenu => &mut self.beverages_menu,
            SectionKey::SideItems => &mut self.side_items,
        }
    }

    /// Sections in fixed document order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionKey, &MenuSection)> {
        ALL_SECTIONS.into_iter().map(|k| (k, self.section(k)))
    }

    pub fn category_count(&self) -> usize {
        self.sections().map(|(_, s)| s.categories.len()).sum()
    }

    pub fn item_count(&self) -> usize {
        self.sections()
            .flat_map(|(_, s)| &s.categories)
            .map(|c| c.items.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> Result<MenuItem, String> {
        serde_json::from_str::<MenuItem>(json).map_err(|e| e.to_string())
    }

    #[test]
    fn single_price_round_trips() {
        let item = raw(r#"{"name":"Cola","price":"₹100"}"#).unwrap();
        assert_eq!(item.shape, PriceShape::Single("₹100".into()));
        assert!(item.available);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"], "₹100");
        assert!(json.get("halfPrice").is_none());
        assert!(json.get("available").is_none());
    }

    #[test]
    fn half_full_pair_parses() {
        let item = raw(r#"{"name":"Biryani","halfPrice":"₹199","fullPrice":"₹299"}"#).unwrap();
        assert_eq!(
            item.shape,
            PriceShape::HalfFull {
                half: "₹199".into(),
                full: "₹299".into()
            }
        );
    }

    #[test]
    fn sizes_parse_in_order() {
        let item =
            raw(r#"{"name":"Old Monk","sizes":["₹80","₹150","₹220","₹375"]}"#).unwrap();
        assert_eq!(
            item.shape,
            PriceShape::Sizes(vec!["₹80".into(), "₹150".into(), "₹220".into(), "₹375".into()])
        );
    }

    #[test]
    fn missing_shape_rejected() {
        let err = raw(r#"{"name":"Ghost"}"#).unwrap_err();
        assert!(err.contains("no price shape"), "{err}");
    }

    #[test]
    fn mixed_shapes_rejected() {
        let err = raw(r#"{"name":"Odd","price":"₹10","sizes":["₹1"]}"#).unwrap_err();
        assert!(err.contains("mixes price shapes"), "{err}");
    }

    #[test]
    fn half_without_full_rejected() {
        let err = raw(r#"{"name":"Odd","halfPrice":"₹10"}"#).unwrap_err();
        assert!(err.contains("halfPrice without fullPrice"), "{err}");
    }

    #[test]
    fn empty_name_rejected() {
        let err = raw(r#"{"name":"","price":"₹10"}"#).unwrap_err();
        assert!(err.contains("must not be empty"), "{err}");
    }

    #[test]
    fn unavailable_survives_round_trip() {
        let item = raw(r#"{"name":"Cola","price":"₹100","available":false}"#).unwrap();
        assert!(!item.available);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["available"], false);
    }

    #[test]
    fn map_prices_visits_every_shape_slot() {
        let mut shape = PriceShape::Sizes(vec!["a".into(), "b".into()]);
        shape.map_prices(|p| format!("{p}!"));
        assert_eq!(shape, PriceShape::Sizes(vec!["a!".into(), "b!".into()]));

        let mut pair = PriceShape::HalfFull {
            half: "h".into(),
            full: "f".into(),
        };
        pair.map_prices(|p| p.to_uppercase());
        assert_eq!(
            pair,
            PriceShape::HalfFull {
                half: "H".into(),
                full: "F".into()
            }
        );
    }

    #[test]
    fn section_key_canonical_strings() {
        for key in ALL_SECTIONS {
            assert_eq!(SectionKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SectionKey::parse("dessertMenu"), None);
    }

    #[test]
    fn has_sizes_checks_all_items_not_just_first() {
        let category = MenuCategory {
            title: "Mixed".into(),
            icon: None,
            items: vec![
                MenuItem::new("Plain", PriceShape::Single("₹99".into())),
                MenuItem::new("Pour", PriceShape::Sizes(vec!["₹100".into()])),
            ],
        };
        assert!(category.has_sizes());
    }
}
