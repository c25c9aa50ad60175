//! The demo's string hash.
//!
//! A classic `h * 31 + c` hash over UTF-16 code units, computed in 32-bit
//! two's-complement arithmetic so every key lands on the same slot the
//! browser version of the demo picked.

use super::SLOT_COUNT;

/// Hash a key. Wraps on overflow and returns the absolute value of the
/// final signed accumulator, so `i32::MIN` becomes `2147483648`.
pub fn hash(key: &str) -> u32 {
    let h = key.encode_utf16().fold(0i32, |h, unit| {
        // (h << 5) - h == h * 31
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    });
    h.unsigned_abs()
}

/// Slot index for a key: `hash(key) mod 5`
pub fn index(key: &str) -> usize {
    (hash(key) % SLOT_COUNT as u32) as usize
}
