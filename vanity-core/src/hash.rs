//! Engine name hashing.
//!
//! Every string identifier the engine understands (model names, DLC packs,
//! tattoo overlays) is addressed by the same 32-bit hash: Jenkins
//! one-at-a-time over the lowercased name. The function is a fixed external
//! contract and must stay bit-exact.

/// Hash a name the way the engine does.
///
/// Input is lowercased byte-wise before hashing, so `"MP_M_FREEMODE_01"` and
/// `"mp_m_freemode_01"` resolve to the same key.
#[must_use]
pub fn hash_key(name: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in name.bytes() {
        hash = hash.wrapping_add(u32::from(byte.to_ascii_lowercase()));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}
