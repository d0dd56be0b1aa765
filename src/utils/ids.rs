//! Stable, deterministic id derivation for graph elements.
//!
//! Node, edge, and roadmap ids are hashes of their defining inputs rather
//! than timestamps or counters, so synthesizing the same topic list twice
//! yields byte-identical graphs. `FxHasher` is unseeded, which makes it
//! run-to-run stable, and the layout engine only needs stability, not
//! cryptographic strength.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Hash an ordered sequence of string parts into a stable 64-bit value.
///
/// Parts are separated by a sentinel byte so that `["ab", "c"]` and
/// `["a", "bc"]` hash differently.
#[must_use]
pub fn stable_hash(parts: &[&str]) -> u64 {
    let mut hasher = FxHasher::default();
    for part in parts {
        hasher.write(part.as_bytes());
        hasher.write_u8(0x1f);
    }
    hasher.finish()
}

/// Derive a readable element id of the form `"{role}-{hash:016x}"`.
///
/// The role is both a human-readable prefix and part of the hashed input,
/// so the same discriminator used in two roles yields two distinct ids.
///
/// # Examples
///
/// ```rust
/// use roadweave::utils::ids::derive_id;
///
/// let a = derive_id("content", "t1");
/// let b = derive_id("content", "t1");
/// assert_eq!(a, b);
/// assert!(a.starts_with("content-"));
/// assert_ne!(a, derive_id("category", "t1"));
/// ```
#[must_use]
pub fn derive_id(role: &str, discriminator: &str) -> String {
    format!("{role}-{:016x}", stable_hash(&[role, discriminator]))
}
