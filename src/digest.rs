//! Digest generation: the sole source of randomness in the pipeline.
//!
//! Everything a rendered avatar looks like traces back to one hex digest of
//! the input token. The [`DigestGenerator`] trait keeps the hash primitive
//! pluggable: the rest of the crate only ever sees a lowercase hex string of
//! fixed, even length.
//!
//! The production implementation is [`Sha512Generator`]: SHA-512 via the
//! `sha2` crate, hex-encoded to 128 characters. That width matters: it is
//! wide enough to cut into the eleven index blocks the
//! [`indices`](crate::indices) module needs while keeping each block well
//! inside `u64` range.

use sha2::{Digest, Sha512};

/// Produces a deterministic, fixed-length, lowercase hex digest of a byte
/// stream.
///
/// Implementations must be pure: the same input yields the same digest on
/// every call, on every platform. `Sync` so a single instance can serve many
/// concurrent renders.
pub trait DigestGenerator: Sync {
    /// Lowercase hex digest of `data`.
    fn hex_digest(&self, data: &[u8]) -> String;
}

/// Default digest generator: SHA-512, hex-encoded to 128 characters.
pub struct Sha512Generator;

impl Sha512Generator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha512Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestGenerator for Sha512Generator {
    fn hex_digest(&self, data: &[u8]) -> String {
        format!("{:x}", Sha512::digest(data))
    }
}
