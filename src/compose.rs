//! Page composition: menu document → ordered export pages.
//!
//! The export pipeline does not paginate dynamically. A fixed, hand-authored
//! plan maps each output page to one source section, an optional category
//! filter, a display title, and an accent variant. Sections small enough for
//! one physical page pass through whole; the beverages section is split
//! across three pages by category-title buckets.
//!
//! One bucket per split section is [`CategoryFilter::Remainder`], so the
//! partition invariant — every source category appears on exactly one page,
//! in source order — holds for any document, not just the shipped dataset.
//! The explicit buckets must be disjoint; a test enforces that.
//!
//! Pages that end up with zero categories are still emitted (page numbering
//! follows the plan) but flagged empty; every export path skips them.

use crate::model::{MenuCategory, MenuDocument, SectionKey};

/// Accent-color tag for an export page. Selects from the 3-entry palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Cyan,
    Magenta,
    Gold,
}

/// Which categories of the source section a page carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CategoryFilter {
    /// The whole section.
    All,
    /// Categories whose title is in this bucket.
    Titles(&'static [&'static str]),
    /// Every category of the section not claimed by another page's bucket.
    Remainder,
}

/// One entry of the fixed page plan.
#[derive(Debug, Clone, Copy)]
pub struct PageSpec {
    /// Artifact key: exports are named `menu-<key>.<ext>`.
    pub key: &'static str,
    pub section: SectionKey,
    pub filter: CategoryFilter,
    /// Display title override; `None` uses the section title.
    pub title: Option<&'static str>,
    pub variant: Variant,
}

/// The fixed export plan, in output order.
pub const PAGE_PLAN: [PageSpec; 6] = [
    PageSpec {
        key: "snacks",
        section: SectionKey::SnacksAndStarters,
        filter: CategoryFilter::All,
        title: None,
        variant: Variant::Cyan,
    },
    PageSpec {
        key: "food",
        section: SectionKey::FoodMenu,
        filter: CategoryFilter::All,
        title: None,
        variant: Variant::Magenta,
    },
    PageSpec {
        key: "beverages-1",
        section: SectionKey::BeveragesMenu,
        filter: CategoryFilter::Titles(&[
            "Craft & Classic Brews",
            "Crystal Clear Vodkas",
            "Aged & Spiced Rums",
            "Indian Reserve Whiskies",
        ]),
        title: Some("Beverages (Beer & Spirits)"),
        variant: Variant::Cyan,
    },
    // The remaining whisky categories, and anything added to the section
    // later that no explicit bucket claims.
    PageSpec {
        key: "beverages-2",
        section: SectionKey::BeveragesMenu,
        filter: CategoryFilter::Remainder,
        title: Some("Premium Whiskies"),
        variant: Variant::Gold,
    },
    PageSpec {
        key: "beverages-3",
        section: SectionKey::BeveragesMenu,
        filter: CategoryFilter::Titles(&[
            "Tequila Shots",
            "Liqueurs & Shooters",
            "Celebration Bottles (750 ml)",
        ]),
        title: Some("Shots & Celebrations"),
        variant: Variant::Magenta,
    },
    PageSpec {
        key: "sides",
        section: SectionKey::SideItems,
        filter: CategoryFilter::All,
        title: None,
        variant: Variant::Gold,
    },
];

/// A composed export page: a title, a variant, and a filtered snapshot of
/// the source section's categories in source order.
#[derive(Debug, Clone)]
pub struct ExportPage {
    pub key: &'static str,
    pub title: String,
    pub variant: Variant,
    pub categories: Vec<MenuCategory>,
}

impl ExportPage {
    /// Empty pages are skipped by every export path.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Compose the full page list from a document snapshot, in plan order.
pub fn compose(document: &MenuDocument) -> Vec<ExportPage> {
    PAGE_PLAN
        .iter()
        .map(|spec| {
            let section = document.section(spec.section);
            let categories: Vec<MenuCategory> = section
                .categories
                .iter()
                .filter(|c| filter_matches(spec, c.title.as_str()))
                .cloned()
                .collect();
            ExportPage {
                key: spec.key,
                title: spec.title.unwrap_or(section.title.as_str()).to_string(),
                variant: spec.variant,
                categories,
            }
        })
        .collect()
}

fn filter_matches(spec: &PageSpec, title: &str) -> bool {
    match spec.filter {
        CategoryFilter::All => true,
        CategoryFilter::Titles(bucket) => bucket.contains(&title),
        CategoryFilter::Remainder => !PAGE_PLAN
            .iter()
            .filter(|other| other.section == spec.section)
            .any(|other| match other.filter {
                CategoryFilter::Titles(bucket) => bucket.contains(&title),
                _ => false,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MenuSection, ALL_SECTIONS};
    use crate::test_helpers::sample_document;

    #[test]
    fn plan_order_is_stable() {
        let keys: Vec<&str> = PAGE_PLAN.iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            [
                "snacks",
                "food",
                "beverages-1",
                "beverages-2",
                "beverages-3",
                "sides"
            ]
        );
    }

    #[test]
    fn explicit_buckets_are_disjoint_per_section() {
        for key in ALL_SECTIONS {
            let mut seen = std::collections::HashSet::new();
            for spec in PAGE_PLAN.iter().filter(|s| s.section == key) {
                if let CategoryFilter::Titles(bucket) = spec.filter {
                    for title in bucket {
                        assert!(seen.insert(*title), "'{title}' claimed twice for {key}");
                    }
                }
            }
        }
    }

    #[test]
    fn at_most_one_remainder_bucket_per_section() {
        for key in ALL_SECTIONS {
            let remainders = PAGE_PLAN
                .iter()
                .filter(|s| s.section == key && s.filter == CategoryFilter::Remainder)
                .count();
            assert!(remainders <= 1, "{key} has {remainders} remainder pages");
        }
    }

    #[test]
    fn split_section_partitions_exactly() {
        let doc = sample_document();
        let pages = compose(&doc);

        let source_titles: Vec<&str> = doc
            .beverages_menu
            .categories
            .iter()
            .map(|c| c.title.as_str())
            .collect();

        let mut composed_titles = Vec::new();
        for page in pages.iter().filter(|p| p.key.starts_with("beverages")) {
            for c in &page.categories {
                composed_titles.push(c.title.as_str());
            }
        }

        // No omission, no duplication.
        composed_titles.sort_unstable();
        let mut expected = source_titles.clone();
        expected.sort_unstable();
        assert_eq!(composed_titles, expected);
    }

    #[test]
    fn remainder_picks_up_unclaimed_categories() {
        let mut doc = sample_document();
        doc.beverages_menu.categories.push(crate::model::MenuCategory {
            title: "House Infusions".into(),
            icon: None,
            items: vec![],
        });
        let pages = compose(&doc);
        let remainder = pages.iter().find(|p| p.key == "beverages-2").unwrap();
        assert!(remainder
            .categories
            .iter()
            .any(|c| c.title == "House Infusions"));
    }

    #[test]
    fn category_order_follows_source_order() {
        let doc = sample_document();
        let pages = compose(&doc);
        let first = pages.iter().find(|p| p.key == "beverages-1").unwrap();
        let composed: Vec<&str> = first.categories.iter().map(|c| c.title.as_str()).collect();
        let source_order: Vec<&str> = doc
            .beverages_menu
            .categories
            .iter()
            .map(|c| c.title.as_str())
            .filter(|t| composed.contains(t))
            .collect();
        assert_eq!(composed, source_order);
    }

    #[test]
    fn whole_section_pages_carry_every_category() {
        let doc = sample_document();
        let pages = compose(&doc);
        let snacks = pages.iter().find(|p| p.key == "snacks").unwrap();
        assert_eq!(
            snacks.categories.len(),
            doc.snacks_and_starters.categories.len()
        );
        assert_eq!(snacks.title, doc.snacks_and_starters.title);
    }

    #[test]
    fn split_pages_use_override_titles() {
        let pages = compose(&sample_document());
        let titles: Vec<&str> = pages
            .iter()
            .filter(|p| p.key.starts_with("beverages"))
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(
            titles,
            [
                "Beverages (Beer & Spirits)",
                "Premium Whiskies",
                "Shots & Celebrations"
            ]
        );
    }

    #[test]
    fn empty_section_composes_to_empty_flagged_page() {
        let mut doc = sample_document();
        doc.side_items = MenuSection {
            title: "SIDE ITEMS & REFRESHMENTS".into(),
            categories: vec![],
        };
        let pages = compose(&doc);
        let sides = pages.iter().find(|p| p.key == "sides").unwrap();
        assert!(sides.is_empty());
        // Page count is fixed by the plan regardless.
        assert_eq!(pages.len(), PAGE_PLAN.len());
    }
}
