//! Non-cryptographic block fingerprint.
//!
//! Every field is hashed on its own, then folded into a running seed with the
//! classic `hash_combine` mix. The fold is order sensitive, so swapping two
//! fields changes the result.

use crate::constants::{FIELD_HASH_SIZE, GOLDEN_RATIO};
use crate::Timestamp;
use sha2::{Digest, Sha256};

/// Hash of a single field: the first eight bytes of its SHA-256 digest, read
/// little-endian.
pub fn field_hash(bytes: &[u8]) -> u64 {
    let digest = Sha256::digest(bytes);
    let mut out = [0u8; FIELD_HASH_SIZE];
    out.copy_from_slice(&digest[..FIELD_HASH_SIZE]);
    u64::from_le_bytes(out)
}

/// Folds `h` into `seed`.
pub fn combine(seed: &mut u64, h: u64) {
    let mixed = h
        .wrapping_add(GOLDEN_RATIO)
        .wrapping_add(*seed << 6)
        .wrapping_add(*seed >> 2);
    *seed ^= mixed;
}

/// Fingerprint over `(timestamp, data, previous_hash, nonce)`, in that order,
/// starting from a zero seed.
pub fn fingerprint(timestamp: Timestamp, data: &str, previous_hash: u64, nonce: u64) -> u64 {
    let mut seed = 0u64;
    combine(&mut seed, field_hash(&timestamp.to_le_bytes()));
    combine(&mut seed, field_hash(data.as_bytes()));
    combine(&mut seed, field_hash(&previous_hash.to_le_bytes()));
    combine(&mut seed, field_hash(&nonce.to_le_bytes()));
    seed
}
