//! Artwork discovery: the read-only catalog the renderer draws from.
//!
//! ## Directory Structure
//!
//! A catalog root contains two trees:
//!
//! ```text
//! assets/
//! ├── sets/                        # part sets, one directory per set
//! │   ├── robots/                  # canonical set (first by name), has color variants
//! │   │   ├── blue/
//! │   │   │   ├── 000#01body/      # category: one anatomical layer
//! │   │   │   │   ├── 000#01body-round.png
//! │   │   │   │   └── 001#01body-square.png
//! │   │   │   └── 001#02eyes/
//! │   │   │       └── 000#02eyes-dots.png
//! │   │   └── green/
//! │   │       └── ...
//! │   └── squids/                  # further sets hold categories directly
//! │       ├── 000#01body/
//! │       └── 001#02eyes/
//! └── backgrounds/                 # background sets, flat file lists
//!     ├── plain/
//!     │   ├── 000-solid.png
//!     │   └── 001-grid.png
//!     └── spaceport/
//!         └── ...
//! ```
//!
//! Subdirectories of the canonical set whose names carry no `#` are color
//! variants; directories with a `#` are categories. Only the canonical set
//! ships color variants; the other sets don't have enough artwork per
//! color.
//!
//! ## Ordering Is Load-Bearing
//!
//! The order in which categories are enumerated decides which index slot
//! each category consumes (see [`crate::indices`]). Filesystem enumeration
//! order differs between operating systems, so every listing here is sorted
//! by file name — that is the whole purpose of the numeric prefix in front
//! of the `#` in artwork names. Listings must not change for the lifetime
//! of the process; [`DirCatalog`] snapshots the set/color/background names
//! once at construction.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Directory under the catalog root holding part sets.
pub const SETS_DIR: &str = "sets";
/// Directory under the catalog root holding background sets.
pub const BACKGROUNDS_DIR: &str = "backgrounds";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog has no part sets under {0}")]
    NoPartSets(PathBuf),
    #[error("unknown part set path: {0}")]
    UnknownSetPath(String),
    #[error("no artwork files in category {0}")]
    EmptyCategory(PathBuf),
    #[error("no files in background set {0}")]
    EmptyBackgroundSet(PathBuf),
    #[error("artwork file name has no '#' layer key: {0}")]
    MissingLayerKey(PathBuf),
    #[error("part set {set} has {count} categories but only {available} index slots")]
    TooManyCategories {
        set: String,
        count: usize,
        available: usize,
    },
}

/// Read-only access to the artwork repository.
///
/// All listings are ordered and must be stable across calls within one
/// process lifetime; renders consume them positionally. `Sync` so a single
/// catalog serves many concurrent renders; nothing here mutates.
pub trait AssetCatalog: Sync {
    /// Part set names in stable order. Never empty; the first entry is the
    /// canonical set.
    fn part_sets(&self) -> &[String];

    /// Background set names in stable order. May be empty.
    fn background_sets(&self) -> &[String];

    /// Color variants of the canonical part set. Empty when the canonical
    /// set holds categories directly.
    fn colors(&self) -> &[String];

    /// Category directories of a resolved set path (e.g. `"robots/blue"`),
    /// in stable order.
    fn categories(&self, set_path: &str) -> Result<Vec<PathBuf>, CatalogError>;

    /// Candidate artwork files within a category or background directory,
    /// in stable order.
    fn files(&self, dir: &Path) -> Result<Vec<PathBuf>, CatalogError>;

    /// The directory holding a background set's files.
    fn background_dir(&self, background_set: &str) -> PathBuf;
}

/// Filesystem-backed catalog rooted at a directory containing `sets/` and
/// `backgrounds/`.
pub struct DirCatalog {
    root: PathBuf,
    part_sets: Vec<String>,
    background_sets: Vec<String>,
    colors: Vec<String>,
}

impl DirCatalog {
    /// Open a catalog, snapshotting set, background and color names.
    ///
    /// Fails when the root has no part sets. A missing `backgrounds/` tree
    /// is tolerated: such a catalog simply renders without backgrounds.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let root = root.into();

        let sets_dir = root.join(SETS_DIR);
        let part_sets = subdirectory_names(&sets_dir)?;
        if part_sets.is_empty() {
            return Err(CatalogError::NoPartSets(sets_dir));
        }

        let background_sets =
            subdirectory_names(&root.join(BACKGROUNDS_DIR)).unwrap_or_default();

        // Color variants live directly under the canonical set; category
        // directories carry a '#', color directories don't.
        let colors = subdirectory_names(&sets_dir.join(&part_sets[0]))?
            .into_iter()
            .filter(|name| !name.contains('#'))
            .collect();

        Ok(Self {
            root,
            part_sets,
            background_sets,
            colors,
        })
    }

    /// The catalog root this instance was opened on.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetCatalog for DirCatalog {
    fn part_sets(&self) -> &[String] {
        &self.part_sets
    }

    fn background_sets(&self) -> &[String] {
        &self.background_sets
    }

    fn colors(&self) -> &[String] {
        &self.colors
    }

    fn categories(&self, set_path: &str) -> Result<Vec<PathBuf>, CatalogError> {
        let dir = self.root.join(SETS_DIR).join(set_path);
        if !dir.is_dir() {
            return Err(CatalogError::UnknownSetPath(set_path.to_string()));
        }
        Ok(sorted_entries(&dir, EntryKind::Directory))
    }

    fn files(&self, dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
        if !dir.is_dir() {
            return Err(CatalogError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such catalog directory: {}", dir.display()),
            )));
        }
        Ok(sorted_entries(dir, EntryKind::File))
    }

    fn background_dir(&self, background_set: &str) -> PathBuf {
        self.root.join(BACKGROUNDS_DIR).join(background_set)
    }
}

enum EntryKind {
    File,
    Directory,
}

/// Immediate children of `dir` of the given kind, sorted by file name.
/// Hidden entries (leading `.`) are skipped.
fn sorted_entries(dir: &Path, kind: EntryKind) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| match kind {
            EntryKind::File => entry.file_type().is_file(),
            EntryKind::Directory => entry.file_type().is_dir(),
        })
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.into_path())
        .collect()
}

/// Names of the immediate subdirectories of `dir`, sorted.
fn subdirectory_names(dir: &Path) -> Result<Vec<String>, CatalogError> {
    if !dir.is_dir() {
        return Err(CatalogError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no such catalog directory: {}", dir.display()),
        )));
    }
    Ok(sorted_entries(dir, EntryKind::Directory)
        .into_iter()
        .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    /// In-memory catalog for tests that never touch the filesystem.
    ///
    /// Paths are virtual: selection and layer choice operate purely on the
    /// listings, so nothing needs to exist on disk until composition.
    #[derive(Default)]
    pub struct MockCatalog {
        pub part_sets: Vec<String>,
        pub background_sets: Vec<String>,
        pub colors: Vec<String>,
        pub categories: HashMap<String, Vec<PathBuf>>,
        pub files: HashMap<PathBuf, Vec<PathBuf>>,
    }

    impl MockCatalog {
        pub fn new(part_sets: &[&str]) -> Self {
            Self {
                part_sets: part_sets.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        pub fn with_background_sets(mut self, sets: &[&str]) -> Self {
            self.background_sets = sets.iter().map(|s| s.to_string()).collect();
            self
        }

        pub fn with_colors(mut self, colors: &[&str]) -> Self {
            self.colors = colors.iter().map(|s| s.to_string()).collect();
            self
        }

        /// Register a category under a set path with the given file names.
        pub fn add_category(mut self, set_path: &str, category: &str, files: &[&str]) -> Self {
            let dir = PathBuf::from(set_path).join(category);
            self.categories
                .entry(set_path.to_string())
                .or_default()
                .push(dir.clone());
            self.files
                .insert(dir.clone(), files.iter().map(|f| dir.join(f)).collect());
            self
        }

        /// Register a background set's flat file list.
        pub fn add_background(mut self, set: &str, files: &[&str]) -> Self {
            let dir = PathBuf::from(BACKGROUNDS_DIR).join(set);
            self.files
                .insert(dir.clone(), files.iter().map(|f| dir.join(f)).collect());
            self
        }
    }

    impl AssetCatalog for MockCatalog {
        fn part_sets(&self) -> &[String] {
            &self.part_sets
        }

        fn background_sets(&self) -> &[String] {
            &self.background_sets
        }

        fn colors(&self) -> &[String] {
            &self.colors
        }

        fn categories(&self, set_path: &str) -> Result<Vec<PathBuf>, CatalogError> {
            self.categories
                .get(set_path)
                .cloned()
                .ok_or_else(|| CatalogError::UnknownSetPath(set_path.to_string()))
        }

        fn files(&self, dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
            Ok(self.files.get(dir).cloned().unwrap_or_default())
        }

        fn background_dir(&self, background_set: &str) -> PathBuf {
            PathBuf::from(BACKGROUNDS_DIR).join(background_set)
        }
    }

    // =========================================================================
    // DirCatalog discovery
    // =========================================================================

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"png").unwrap();
    }

    /// Lay out a small two-set catalog on disk.
    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("sets/robots/blue/000#01body/000#01body.png"));
        touch(&root.join("sets/robots/blue/001#02eyes/000#02eyes.png"));
        touch(&root.join("sets/robots/green/000#01body/000#01body.png"));
        touch(&root.join("sets/squids/000#01body/000#01body.png"));
        touch(&root.join("sets/squids/001#02eyes/000#02eyes.png"));
        touch(&root.join("backgrounds/plain/000-solid.png"));
        touch(&root.join("backgrounds/plain/001-grid.png"));
        touch(&root.join("backgrounds/spaceport/000-pad.png"));
        tmp
    }

    #[test]
    fn discovers_sets_backgrounds_and_colors_sorted() {
        let tmp = fixture();
        let catalog = DirCatalog::open(tmp.path()).unwrap();
        assert_eq!(catalog.part_sets(), ["robots", "squids"]);
        assert_eq!(catalog.background_sets(), ["plain", "spaceport"]);
        assert_eq!(catalog.colors(), ["blue", "green"]);
    }

    #[test]
    fn canonical_set_with_direct_categories_has_no_colors() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("sets/only/000#01body/000#01body.png"));
        fs::create_dir_all(tmp.path().join("backgrounds")).unwrap();
        let catalog = DirCatalog::open(tmp.path()).unwrap();
        assert!(catalog.colors().is_empty());
    }

    #[test]
    fn missing_backgrounds_tree_is_tolerated() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("sets/only/000#01body/000#01body.png"));
        let catalog = DirCatalog::open(tmp.path()).unwrap();
        assert!(catalog.background_sets().is_empty());
    }

    #[test]
    fn empty_sets_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("sets")).unwrap();
        assert!(matches!(
            DirCatalog::open(tmp.path()),
            Err(CatalogError::NoPartSets(_))
        ));
    }

    #[test]
    fn missing_sets_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(DirCatalog::open(tmp.path()).is_err());
    }

    #[test]
    fn categories_are_sorted_full_paths() {
        let tmp = fixture();
        let catalog = DirCatalog::open(tmp.path()).unwrap();
        let cats = catalog.categories("robots/blue").unwrap();
        let names: Vec<_> = cats
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["000#01body", "001#02eyes"]);
        assert!(cats[0].starts_with(tmp.path()));
    }

    #[test]
    fn unknown_set_path_is_an_error() {
        let tmp = fixture();
        let catalog = DirCatalog::open(tmp.path()).unwrap();
        assert!(matches!(
            catalog.categories("no-such-set"),
            Err(CatalogError::UnknownSetPath(_))
        ));
    }

    #[test]
    fn files_are_sorted_and_skip_directories_and_hidden_entries() {
        let tmp = fixture();
        let root = tmp.path();
        touch(&root.join("backgrounds/plain/.DS_Store"));
        fs::create_dir_all(root.join("backgrounds/plain/nested")).unwrap();
        let catalog = DirCatalog::open(root).unwrap();

        let files = catalog.files(&catalog.background_dir("plain")).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["000-solid.png", "001-grid.png"]);
    }

    #[test]
    fn files_on_missing_directory_is_an_error() {
        let tmp = fixture();
        let catalog = DirCatalog::open(tmp.path()).unwrap();
        assert!(catalog.files(Path::new("/no/such/dir")).is_err());
    }
}
