//! 256-lane AVX2 backend.
//!
//! `Avx2Lane` wraps a raw `__m256i` and is only ever constructed by
//! [`search`], which the dispatcher calls exclusively after confirming AVX2
//! support with `is_x86_feature_detected!`. Every intrinsic call below
//! assumes that precondition instead of re-checking it per lane.

#![cfg(target_arch = "x86_64")]

use std::arch::x86_64::*;

use super::lane::{counter_mask_u64, Lane};
use super::search_generic;

#[derive(Clone, Copy)]
pub struct Avx2Lane(__m256i);

impl Avx2Lane {
    fn from_limbs(limbs: [u64; 4]) -> Self {
        // SAFETY: _mm256_set_epi64x has no preconditions beyond AVX2 support,
        // guaranteed by the caller of `search` below.
        unsafe { Self(_mm256_set_epi64x(limbs[3] as i64, limbs[2] as i64, limbs[1] as i64, limbs[0] as i64)) }
    }

    fn to_limbs(self) -> [u64; 4] {
        let mut out = [0u64; 4];
        // SAFETY: storing to a correctly sized and aligned local buffer.
        unsafe { _mm256_storeu_si256(out.as_mut_ptr().cast(), self.0) };
        out
    }
}

impl Lane for Avx2Lane {
    const LANE_BITS: u32 = 8;

    fn zero() -> Self {
        // SAFETY: AVX2 support guaranteed by caller.
        unsafe { Self(_mm256_setzero_si256()) }
    }

    fn splat(bit: bool) -> Self {
        let word = if bit { u64::MAX } else { 0 };
        Self::from_limbs([word; 4])
    }

    fn counter_bit(k: u32) -> Self {
        const LIMB_BITS: u32 = 2;
        if k < LIMB_BITS {
            let mut limbs = [0u64; 4];
            for (limb, slot) in limbs.iter_mut().enumerate() {
                let bit = (limb as u32 >> (LIMB_BITS - 1 - k)) & 1;
                *slot = if bit == 1 { u64::MAX } else { 0 };
            }
            Self::from_limbs(limbs)
        } else {
            // The remaining 6 bits vary within a limb exactly like the
            // portable 64-lane backend's counting pattern.
            Self::from_limbs([counter_mask_u64(k - LIMB_BITS, 6); 4])
        }
    }

    fn xor(self, other: Self) -> Self {
        // SAFETY: AVX2 support guaranteed by caller.
        unsafe { Self(_mm256_xor_si256(self.0, other.0)) }
    }

    fn and(self, other: Self) -> Self {
        // SAFETY: AVX2 support guaranteed by caller.
        unsafe { Self(_mm256_and_si256(self.0, other.0)) }
    }

    fn or(self, other: Self) -> Self {
        // SAFETY: AVX2 support guaranteed by caller.
        unsafe { Self(_mm256_or_si256(self.0, other.0)) }
    }

    fn not(self) -> Self {
        let all_ones = Self::splat(true);
        self.xor(all_ones)
    }

    fn set_lane_indices(self) -> Vec<u32> {
        let limbs = self.to_limbs();
        let mut out = Vec::new();
        for (limb_index, mut word) in limbs.into_iter().enumerate() {
            while word != 0 {
                let bit = word.trailing_zeros();
                out.push((limb_index as u32) * 64 + bit);
                word &= word - 1;
            }
        }
        out
    }
}

/// Runs the bit-sliced search using AVX2's 256-bit vectors.
///
/// # Safety
/// The caller must have confirmed `is_x86_feature_detected!("avx2")` — this
/// function performs no runtime check of its own.
#[target_feature(enable = "avx2")]
pub unsafe fn search(pt: u32, target_ct: u32, pkey: u128) -> Vec<u32> {
    search_generic::<Avx2Lane>(pt, target_ct, pkey)
}
