//! 32-bit FNV-1a digest used to place keys into buckets.
//!
//! The key is consumed one UTF-16 code unit at a time. The multiply must
//! truncate to 32 bits; every bucket assignment (and therefore every
//! grow/shrink trigger point) depends on it.

pub const OFFSET_BASIS: u32 = 2_166_136_261;
pub const PRIME: u32 = 16_777_619;

/// Raw 32-bit FNV-1a accumulator over the key's UTF-16 code units.
#[inline]
pub fn fnv1a32(key: &str) -> u32 {
    key.encode_utf16().fold(OFFSET_BASIS, |acc, unit| {
        (acc ^ u32::from(unit)).wrapping_mul(PRIME)
    })
}

/// Bucket index for `key` in a table of `capacity` buckets.
///
/// `capacity` must be non-zero; the result is always in `0..capacity`.
#[inline]
pub fn digest(key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "digest over an empty bucket array");
    (fnv1a32(key) as usize) % capacity
}
