//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (section, category, artifact) is its semantic identity —
//! title and positional index — with filesystem paths shown as context.
//!
//! ## Show
//!
//! ```text
//! SNACKS & STARTERS
//!     001 VEG (7 items)
//!     002 NON-VEG (7 items)
//! FOOD MENU
//!     001 Non-Vegetarian Handi & Firepot (4 items)
//!     ...
//!
//! 4 sections, 17 categories, 74 items
//! ```
//!
//! ## Export
//!
//! ```text
//! 001 menu-snacks.png (182.4 KB)
//! 002 menu-food.png (199.1 KB)
//!
//! Exported 2 artifacts
//! ```
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::export::Artifact;
use crate::model::{MenuDocument, ALL_SECTIONS};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Human-readable byte size.
fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

// ============================================================================
// Document summary
// ============================================================================

/// Format the document summary: sections with their categories and counts.
pub fn format_summary(document: &MenuDocument) -> Vec<String> {
    let mut lines = Vec::new();
    for key in ALL_SECTIONS {
        let section = document.section(key);
        lines.push(section.title.clone());
        for (i, category) in section.categories.iter().enumerate() {
            lines.push(format!(
                "    {} {} ({} items)",
                format_index(i + 1),
                category.title,
                category.items.len()
            ));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "4 sections, {} categories, {} items",
        document.category_count(),
        document.item_count()
    ));
    lines
}

/// Print the document summary to stdout.
pub fn print_summary(document: &MenuDocument) {
    for line in format_summary(document) {
        println!("{}", line);
    }
}

// ============================================================================
// Export results
// ============================================================================

/// Format a batch export result: one line per artifact, then a total.
pub fn format_export_output(artifacts: &[Artifact]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, artifact) in artifacts.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            artifact.path.file_name().unwrap_or_default().to_string_lossy(),
            human_size(artifact.bytes)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Exported {} artifact{}",
        artifacts.len(),
        if artifacts.len() == 1 { "" } else { "s" }
    ));
    lines
}

/// Print a batch export result to stdout.
pub fn print_export_output(artifacts: &[Artifact]) {
    for line in format_export_output(artifacts) {
        println!("{}", line);
    }
}

/// One-line success notification for a single artifact.
pub fn format_artifact_notification(artifact: &Artifact) -> String {
    format!(
        "Exported {} ({})",
        artifact.path.display(),
        human_size(artifact.bytes)
    )
}

/// Print a single-artifact success notification.
pub fn print_artifact_notification(artifact: &Artifact) {
    println!("{}", format_artifact_notification(artifact));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_document;
    use std::path::PathBuf;

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn human_size_units() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn summary_leads_with_section_titles() {
        let lines = format_summary(&sample_document());
        assert_eq!(lines[0], "SNACKS & STARTERS");
        assert!(lines.iter().any(|l| l.starts_with("    001 ")));
    }

    #[test]
    fn summary_ends_with_totals() {
        let doc = sample_document();
        let lines = format_summary(&doc);
        let totals = lines.last().unwrap();
        assert!(totals.starts_with("4 sections,"));
        assert!(totals.contains(&format!("{} categories", doc.category_count())));
        assert!(totals.contains(&format!("{} items", doc.item_count())));
    }

    #[test]
    fn summary_counts_items_per_category() {
        let doc = sample_document();
        let lines = format_summary(&doc);
        let veg_items = doc.snacks_and_starters.categories[0].items.len();
        assert!(lines
            .iter()
            .any(|l| l.contains(&format!("({} items)", veg_items))));
    }

    #[test]
    fn export_output_lists_artifacts_with_sizes() {
        let artifacts = vec![
            Artifact {
                path: PathBuf::from("/out/menu-snacks.png"),
                bytes: 2048,
            },
            Artifact {
                path: PathBuf::from("/out/menu-food.png"),
                bytes: 4096,
            },
        ];
        let lines = format_export_output(&artifacts);
        assert_eq!(lines[0], "001 menu-snacks.png (2.0 KB)");
        assert_eq!(lines[1], "002 menu-food.png (4.0 KB)");
        assert_eq!(lines.last().unwrap(), "Exported 2 artifacts");
    }

    #[test]
    fn export_output_singular_total() {
        let artifacts = vec![Artifact {
            path: PathBuf::from("menu-complete.pdf"),
            bytes: 100,
        }];
        let lines = format_export_output(&artifacts);
        assert_eq!(lines.last().unwrap(), "Exported 1 artifact");
    }

    #[test]
    fn artifact_notification_names_path() {
        let artifact = Artifact {
            path: PathBuf::from("dist/menu-qr-2024-01-05.png"),
            bytes: 1024,
        };
        let line = format_artifact_notification(&artifact);
        assert!(line.contains("menu-qr-2024-01-05.png"));
        assert!(line.contains("1.0 KB"));
    }
}
