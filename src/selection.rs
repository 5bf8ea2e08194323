//! Resolving the caller's request against the catalog.
//!
//! Three decisions come out of this module: which part set to draw from,
//! which color variant of it (canonical set only), and what goes behind the
//! robot. Each decision prefers an explicit, valid request and falls back to
//! an index-derived choice, so an unconfigured caller still gets a fully
//! deterministic avatar.
//!
//! The two fallback policies are deliberately different: an unrecognized
//! part set falls back to the canonical first set (there must always be a
//! robot), while an unrecognized background set falls back to no background
//! at all (a background is optional decoration).

use crate::catalog::AssetCatalog;
use crate::indices::{BACKGROUND_SET_SLOT, COLOR_SLOT, Identity, SET_SLOT};
use image::Rgba;
use thiserror::Error;

/// Sentinel request value: let the indices choose.
pub const ANY: &str = "any";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid background color literal: {0:?} (expected #RRGGBB or #AARRGGBB)")]
    BadColorLiteral(String),
}

/// What goes behind the part layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    /// Transparent canvas.
    None,
    /// Solid fill from a literal color request.
    Color(Rgba<u8>),
    /// An image picked from this background set.
    Set(String),
}

/// The resolved choices for one avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Set path relative to the sets root, color segment included when the
    /// canonical set is in play (e.g. `"robots/blue"`).
    pub set_path: String,
    pub background: Background,
}

/// Resolve part set, color and background for one identity.
pub fn resolve(
    identity: &Identity,
    catalog: &dyn AssetCatalog,
    part_set: Option<&str>,
    color: Option<&str>,
    background: Option<&str>,
) -> Result<Selection, SelectionError> {
    Ok(Selection {
        set_path: resolve_set_path(identity, catalog, part_set, color),
        background: resolve_background(identity, catalog, background)?,
    })
}

/// Part set plus color segment.
///
/// "any" picks by index; a known name is honored; anything else falls back
/// to the canonical first set. Color applies only to the canonical set:
/// the resolved path gains a `/{color}` segment, requested if valid,
/// index-derived otherwise.
pub fn resolve_set_path(
    identity: &Identity,
    catalog: &dyn AssetCatalog,
    part_set: Option<&str>,
    color: Option<&str>,
) -> String {
    let sets = catalog.part_sets();
    let set = match part_set {
        Some(name) if name.eq_ignore_ascii_case(ANY) => {
            sets[(identity.index(SET_SLOT) % sets.len() as u64) as usize].clone()
        }
        Some(name) if sets.iter().any(|s| s == name) => name.to_string(),
        _ => sets[0].clone(),
    };

    if !set.eq_ignore_ascii_case(&sets[0]) {
        return set;
    }
    let colors = catalog.colors();
    if colors.is_empty() {
        return set;
    }
    let color = match color {
        Some(c) if colors.iter().any(|k| k == c) => c,
        _ => colors[(identity.index(COLOR_SLOT) % colors.len() as u64) as usize].as_str(),
    };
    format!("{set}/{color}")
}

/// Background resolution.
///
/// A request starting with `#` is a literal fill color; "any" picks a set by
/// index (none when the catalog has no background sets); a known set name is
/// honored; anything else (including no request) means no background.
pub fn resolve_background(
    identity: &Identity,
    catalog: &dyn AssetCatalog,
    background: Option<&str>,
) -> Result<Background, SelectionError> {
    let resolved = match background {
        Some(literal) if literal.starts_with('#') => {
            Background::Color(parse_color_literal(literal)?)
        }
        Some(name) if name.eq_ignore_ascii_case(ANY) => {
            let sets = catalog.background_sets();
            if sets.is_empty() {
                Background::None
            } else {
                let pick = identity.index(BACKGROUND_SET_SLOT) % sets.len() as u64;
                Background::Set(sets[pick as usize].clone())
            }
        }
        Some(name) if catalog.background_sets().iter().any(|s| s == name) => {
            Background::Set(name.to_string())
        }
        _ => Background::None,
    };
    Ok(resolved)
}

/// Parse `#RRGGBB` or `#AARRGGBB` into a pixel.
fn parse_color_literal(literal: &str) -> Result<Rgba<u8>, SelectionError> {
    let hex = &literal[1..];
    let bad = || SelectionError::BadColorLiteral(literal.to_string());
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());

    match hex.len() {
        6 if hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            Ok(Rgba([byte(0)?, byte(2)?, byte(4)?, 0xff]))
        }
        8 if hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            Ok(Rgba([byte(2)?, byte(4)?, byte(6)?, byte(0)?]))
        }
        _ => Err(bad()),
    }
}
