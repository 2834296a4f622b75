//! Runtime kernel selection: AVX2 when the host supports it, the portable
//! 64-lane fallback otherwise.

use super::{avx2, portable};

/// Enumerates every `rk56` consistent with `pt`, `target_ct`, and `pkey`,
/// using the fastest bit-slicing kernel available on this CPU.
#[must_use]
pub fn search(pt: u32, target_ct: u32, pkey: u128) -> Vec<u32> {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            // SAFETY: avx2 support was just confirmed.
            return unsafe { avx2::search(pt, target_ct, pkey) };
        }
    }
    portable::search(pt, target_ct, pkey)
}
