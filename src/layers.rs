//! Choosing one artwork file per category, then stacking them correctly.
//!
//! Artwork file names carry two keys around a `#` delimiter:
//!
//! ```text
//! 000#01body-round.png
//! ^^^ ^^^^^^^^^^^^^^^^
//! |   layer-order key: sorts the chosen files into draw order
//! enumeration prefix: keeps directory listings in one order on every OS
//! ```
//!
//! The prefix never influences what gets drawn; it only pins enumeration
//! order so that category k always consumes index slot `PART_SLOT_BASE + k`.
//! The layer-order key decides stacking: the body has to go down before the
//! eyes, or the eyes would be hidden. Sorting by the key, not by category
//! order, is what keeps the anatomy right even if categories enumerate in
//! an unrelated order.
//!
//! The background file is picked separately from its own slot and is never
//! part of the sorted stack: it is always drawn first.

use crate::catalog::{AssetCatalog, CatalogError};
use crate::indices::{BACKGROUND_FILE_SLOT, HASH_COUNT, Identity, PART_SLOT_BASE};
use std::path::{Path, PathBuf};

/// Layer-order key of an artwork file: the substring of its file name
/// between the first and second `#` (or to the end of the name).
///
/// `None` when the name has no `#`, a catalog-integrity violation.
pub fn layer_key(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let rest = &name[name.find('#')? + 1..];
    Some(rest.split('#').next().unwrap_or(rest))
}

/// Pick one file per category of `set_path`, sorted into draw order.
///
/// Category k consumes index slot `PART_SLOT_BASE + k` in the catalog's
/// enumeration order; the chosen files are then re-sorted by layer-order
/// key. Every file name is validated before sorting so a missing key
/// surfaces as an error, not a scrambled stack.
pub fn select_layers(
    identity: &Identity,
    catalog: &dyn AssetCatalog,
    set_path: &str,
) -> Result<Vec<PathBuf>, CatalogError> {
    let categories = catalog.categories(set_path)?;
    let available = HASH_COUNT - PART_SLOT_BASE;
    if categories.len() > available {
        return Err(CatalogError::TooManyCategories {
            set: set_path.to_string(),
            count: categories.len(),
            available,
        });
    }

    let mut chosen = Vec::with_capacity(categories.len());
    for (k, category) in categories.iter().enumerate() {
        let files = catalog.files(category)?;
        if files.is_empty() {
            return Err(CatalogError::EmptyCategory(category.clone()));
        }
        let pick = identity.index(PART_SLOT_BASE + k) % files.len() as u64;
        chosen.push(files[pick as usize].clone());
    }

    for file in &chosen {
        if layer_key(file).is_none() {
            return Err(CatalogError::MissingLayerKey(file.clone()));
        }
    }
    chosen.sort_by_cached_key(|file| layer_key(file).unwrap_or_default().to_string());

    Ok(chosen)
}

/// Pick the background file for a resolved background set.
pub fn select_background_file(
    identity: &Identity,
    catalog: &dyn AssetCatalog,
    background_set: &str,
) -> Result<PathBuf, CatalogError> {
    let dir = catalog.background_dir(background_set);
    let files = catalog.files(&dir)?;
    if files.is_empty() {
        return Err(CatalogError::EmptyBackgroundSet(dir));
    }
    let pick = identity.index(BACKGROUND_FILE_SLOT) % files.len() as u64;
    Ok(files[pick as usize].clone())
}
