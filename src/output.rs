//! CLI output formatting.
//!
//! Each piece of output has a pure `format_*` function (returns a `String`
//! or `Vec<String>`, no I/O) and the binary prints the result. The catalog
//! summary also exists as a serializable struct so `hexbot catalog --json`
//! can emit machine-readable output.

use crate::catalog::AssetCatalog;
use serde::Serialize;
use std::path::Path;

/// Machine-readable view of what a catalog offers.
#[derive(Debug, Serialize)]
pub struct CatalogSummary {
    pub part_sets: Vec<String>,
    pub colors: Vec<String>,
    pub background_sets: Vec<String>,
}

pub fn catalog_summary(catalog: &dyn AssetCatalog) -> CatalogSummary {
    CatalogSummary {
        part_sets: catalog.part_sets().to_vec(),
        colors: catalog.colors().to_vec(),
        background_sets: catalog.background_sets().to_vec(),
    }
}

/// Human-readable catalog listing.
///
/// ```text
/// Part sets
///     robots (colors: blue, green)
///     squids
/// Background sets
///     plain
///     spaceport
/// ```
pub fn format_catalog(summary: &CatalogSummary) -> Vec<String> {
    let mut lines = vec!["Part sets".to_string()];
    for (i, set) in summary.part_sets.iter().enumerate() {
        if i == 0 && !summary.colors.is_empty() {
            lines.push(format!("    {} (colors: {})", set, summary.colors.join(", ")));
        } else {
            lines.push(format!("    {set}"));
        }
    }
    if !summary.background_sets.is_empty() {
        lines.push("Background sets".to_string());
        for set in &summary.background_sets {
            lines.push(format!("    {set}"));
        }
    }
    lines
}

/// One line per rendered token: `token → path (WxH)`.
pub fn format_render_line(token: &str, width: u32, height: u32, path: &Path) -> String {
    format!("{} → {} ({}x{})", token, path.display(), width, height)
}

/// Batch tail line: rendered and failed counts.
pub fn format_batch_summary(rendered: usize, failed: usize) -> String {
    if failed > 0 {
        format!("{rendered} rendered, {failed} failed")
    } else {
        format!("{rendered} rendered")
    }
}
