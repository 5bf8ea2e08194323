//! Avatar identity: a hex digest partitioned into eleven index values.
//!
//! The digest string is cut into [`HASH_COUNT`] contiguous, equal-length
//! substrings (block size = `len / 11`, integer division; any remainder
//! characters at the tail are unused) and each block is parsed as a base-16
//! integer. Those eleven numbers drive every choice the renderer makes, one
//! slot per decision:
//!
//! | Slot | Decides |
//! |---|---|
//! | [`COLOR_SLOT`] (0) | color variant of the canonical part set |
//! | [`SET_SLOT`] (1) | part set, when the caller asks for "any" |
//! | [`BACKGROUND_SET_SLOT`] (2) | background set, when the caller asks for "any" |
//! | [`BACKGROUND_FILE_SLOT`] (3) | file within the resolved background set |
//! | [`PART_SLOT_BASE`] (4) onward | one slot per part category, in catalog order |
//!
//! Slot-to-category binding is positional and load-bearing: the k-th
//! category the catalog reports consumes slot `PART_SLOT_BASE + k`, so a
//! reordered catalog produces a different robot. The catalog is required to
//! report categories in a stable, OS-independent order for exactly this
//! reason.

use thiserror::Error;

/// Number of index slots derived from a digest.
pub const HASH_COUNT: usize = 11;

/// Slot choosing the color variant of the canonical part set.
pub const COLOR_SLOT: usize = 0;
/// Slot choosing the part set when the caller requests "any".
pub const SET_SLOT: usize = 1;
/// Slot choosing the background set when the caller requests "any".
pub const BACKGROUND_SET_SLOT: usize = 2;
/// Slot choosing the file within the resolved background set.
pub const BACKGROUND_FILE_SLOT: usize = 3;
/// First of the per-category slots; category k uses `PART_SLOT_BASE + k`.
pub const PART_SLOT_BASE: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("empty digest")]
    Empty,
    #[error("digest has odd length ({0})")]
    OddLength(usize),
    #[error("digest too short to cut into {HASH_COUNT} blocks ({0} characters)")]
    TooShort(usize),
    #[error("digest contains a non-hexadecimal character")]
    NotHex,
    #[error("digest block {0} is too wide to parse as an index")]
    BlockTooWide(usize),
}

/// A digest and the index sequence derived from it.
///
/// Immutable once constructed; the digest string is the sole source of
/// randomness and the indices are a pure function of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    digest: String,
    indices: [u64; HASH_COUNT],
}

impl Identity {
    /// Derive an identity from a hex digest.
    ///
    /// Rejects digests that are empty, odd-length, shorter than
    /// [`HASH_COUNT`] characters, or not hexadecimal. A malformed digest
    /// means the digest generator broke its contract; there is nothing to
    /// retry.
    pub fn from_digest(digest: impl Into<String>) -> Result<Self, IdentityError> {
        let digest = digest.into();
        if digest.is_empty() {
            return Err(IdentityError::Empty);
        }
        if digest.len() % 2 != 0 {
            return Err(IdentityError::OddLength(digest.len()));
        }
        if !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdentityError::NotHex);
        }
        let block = digest.len() / HASH_COUNT;
        if block == 0 {
            return Err(IdentityError::TooShort(digest.len()));
        }

        let mut indices = [0u64; HASH_COUNT];
        for (i, slot) in indices.iter_mut().enumerate() {
            let chunk = &digest[i * block..(i + 1) * block];
            *slot = u64::from_str_radix(chunk, 16)
                .map_err(|_| IdentityError::BlockTooWide(i))?;
        }

        Ok(Self { digest, indices })
    }

    /// The hex digest this identity was derived from.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// All eleven index values, in slot order.
    pub fn indices(&self) -> &[u64; HASH_COUNT] {
        &self.indices
    }

    /// The index value at a slot.
    pub fn index(&self, slot: usize) -> u64 {
        self.indices[slot]
    }
}
