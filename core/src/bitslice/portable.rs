//! 64-lane portable backend, built on plain `u64` words.
//!
//! This is the reference implementation: used whenever AVX2 is unavailable,
//! and exercised directly by the bitslice self-tests so a bug shared with
//! the AVX2 path would still be caught by comparing both against the scalar
//! cipher.

use super::search_generic;

/// Runs the bit-sliced search using 64-bit lanes.
pub fn search(pt: u32, target_ct: u32, pkey: u128) -> Vec<u32> {
    search_generic::<u64>(pt, target_ct, pkey)
}
