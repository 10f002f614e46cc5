//! Shared test fixtures for the menu-press test suite.
//!
//! [`sample_document`] builds a small but structurally complete menu: all
//! four sections populated, every beverage category from the page plan
//! present, and all three price shapes represented. Several tests pin exact
//! prices from it (Cola at ₹100, the ₹499/₹899 handi pair, the vodka size
//! tiers), so treat the fixture data as load-bearing.

use crate::auth::Authorizer;
use crate::model::{MenuCategory, MenuDocument, MenuItem, MenuSection, PriceShape};
use crate::store::MenuStore;

/// Single-priced item, available, no description.
pub fn item(name: &str, price: &str) -> MenuItem {
    MenuItem::new(name, PriceShape::Single(price.to_string()))
}

/// Size-tier priced item (30/60/90/180 ml order).
pub fn sized(name: &str, tiers: &[&str]) -> MenuItem {
    MenuItem::new(
        name,
        PriceShape::Sizes(tiers.iter().map(|t| t.to_string()).collect()),
    )
}

/// Half/full portion pair.
pub fn half_full(name: &str, half: &str, full: &str) -> MenuItem {
    MenuItem::new(
        name,
        PriceShape::HalfFull {
            half: half.to_string(),
            full: full.to_string(),
        },
    )
}

fn category(title: &str, icon: Option<&str>, items: Vec<MenuItem>) -> MenuCategory {
    MenuCategory {
        title: title.to_string(),
        icon: icon.map(str::to_string),
        items,
    }
}

/// A store over `document` with edit mode already enabled.
pub fn admin_store(document: MenuDocument) -> MenuStore {
    struct AlwaysAdmin;
    impl Authorizer for AlwaysAdmin {
        fn is_admin(&self) -> bool {
            true
        }
    }

    let mut store = MenuStore::new(document);
    store.enable_edit_mode(&AlwaysAdmin).unwrap();
    store
}

pub fn sample_document() -> MenuDocument {
    MenuDocument {
        snacks_and_starters: MenuSection {
            title: "SNACKS & STARTERS".into(),
            categories: vec![
                category(
                    "VEG",
                    None,
                    vec![
                        item("Peanut Masala", "₹149"),
                        item("French Fries", "₹179"),
                        item("Paneer Chilly", "₹249"),
                    ],
                ),
                category(
                    "NON-VEG",
                    None,
                    vec![item("Chicken 65", "₹299"), item("Chilly Chicken", "₹319")],
                ),
            ],
        },
        food_menu: MenuSection {
            title: "FOOD MENU".into(),
            categories: vec![
                category(
                    "Non-Vegetarian Handi & Firepot",
                    Some("🍲"),
                    vec![
                        item("Chicken Firepot", "₹649"),
                        half_full("Solapuri Chicken Handi", "₹499", "₹899"),
                    ],
                ),
                category(
                    "Vegetarian Specials",
                    Some("🥗"),
                    vec![item("Paneer Tikka Masala", "₹329")],
                ),
            ],
        },
        beverages_menu: MenuSection {
            title: "BEVERAGES & SPIRITS".into(),
            categories: vec![
                category(
                    "Craft & Classic Brews",
                    Some("🍺"),
                    vec![item("Kingfisher Premium", "₹180"), item("Bira White", "₹220")],
                ),
                category(
                    "Crystal Clear Vodkas",
                    Some("🍸"),
                    vec![
                        sized("Magic Moments", &["₹120", "₹200", "₹300", "₹600"]),
                        sized("White Mischief", &["₹100", "₹200", "₹300", "₹600"]),
                    ],
                ),
                category(
                    "Aged & Spiced Rums",
                    Some("🥃"),
                    vec![sized("Old Monk", &["₹80", "₹150", "₹220", "₹375"])],
                ),
                category(
                    "Indian Reserve Whiskies",
                    Some("🥃"),
                    vec![sized("Imperial Blue", &["₹90", "₹160", "₹240", "₹420"])],
                ),
                category(
                    "Scotch & Blended Whiskies",
                    Some("🥃"),
                    vec![sized(
                        "Teacher's Highland Cream",
                        &["₹180", "₹330", "₹480", "₹900"],
                    )],
                ),
                category(
                    "Tequila Shots",
                    Some("🌵"),
                    vec![sized("Camino Gold", &["₹150", "₹280"])],
                ),
                category(
                    "Liqueurs & Shooters",
                    Some("🍹"),
                    vec![item("Kahlua Shot", "₹200")],
                ),
                category(
                    "Celebration Bottles (750 ml)",
                    Some("🍾"),
                    vec![item("Sula Brut", "₹2500")],
                ),
            ],
        },
        side_items: MenuSection {
            title: "SIDE ITEMS & REFRESHMENTS".into(),
            categories: vec![
                category(
                    "Soft Drinks & Refreshments",
                    Some("💧"),
                    vec![item("Cola", "₹100"), item("Fresh Lime Soda", "₹90")],
                ),
                category("Accompaniments", Some("🍿"), vec![item("Masala Papad", "₹79")]),
            ],
        },
    }
}
