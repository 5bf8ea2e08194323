//! # Hexbot
//!
//! Deterministic robot avatar generator: hash a token, get a robot. The
//! same input always produces the same image, on every platform, on every
//! run; different inputs produce visually distinct robots with high
//! probability.
//!
//! # Architecture: One Strict Pipeline
//!
//! A render is a pure function of the input token and the artwork catalog:
//!
//! ```text
//! input → digest → indices → selection → layer files → composite → post-process
//! ```
//!
//! Every stage consumes only what the previous stage produced. The digest
//! is the sole source of randomness: it is cut into eleven index values,
//! and each decision the renderer makes (part set, color, background,
//! which file per anatomical category) burns exactly one index slot. No
//! clock, no RNG, no global state anywhere in the pipeline.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`digest`] | `DigestGenerator` capability — SHA-512 hex by default |
//! | [`indices`] | cuts a digest into the eleven-slot index sequence |
//! | [`catalog`] | `AssetCatalog` capability — artwork discovery with stable ordering |
//! | [`selection`] | resolves part set, color variant, and background |
//! | [`layers`] | one file per category, sorted by embedded layer-order key |
//! | [`compose`] | native-resolution compositing and the final resize |
//! | [`postprocess`] | optional grayscale and box blur |
//! | [`render`] | `Avatar` and `Armada` strategies behind one `AvatarRenderer` trait |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Capabilities Are Parameters, Not Singletons
//!
//! The digest generator and the artwork catalog are the only external
//! collaborators, and both are passed in explicitly: the generator at
//! seeding time, the catalog at render time. Swapping either for a stub
//! never touches global state, which is what keeps the full pipeline
//! testable against a synthetic catalog in a temp directory.
//!
//! ## Composite at Native Resolution, Resize Once
//!
//! Artwork is authored on a shared 1024×1024 square. Compositing always
//! happens there and the result is resized to the requested output size as
//! the last step. Selection therefore cannot depend on output size: a
//! 64×64 request picks the same parts as a 2048×2048 one.
//!
//! ## Ordering Is Part of the Contract
//!
//! Filesystem enumeration order differs between operating systems, so the
//! catalog sorts every listing, and artwork names embed a numeric prefix to
//! pin that order. Which index slot a category consumes is decided purely
//! by its position in the listing; reordering the catalog means different
//! robots. The second key embedded in each file name decides stacking
//! order, so the head goes down before the eyes no matter how categories
//! enumerate.
//!
//! ## Pure Rust Imaging
//!
//! Decoding, scaling and encoding go through the `image` crate with only
//! the PNG codec compiled in. No system libraries, no external processes;
//! the binary is self-contained.

pub mod catalog;
pub mod compose;
pub mod digest;
pub mod indices;
pub mod layers;
pub mod output;
pub mod postprocess;
pub mod render;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_helpers;
