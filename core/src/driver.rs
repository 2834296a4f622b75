//! Brute-force completion of the final 48 key bits (stage K).
//!
//! Each 80-bit candidate key leaves round key 7 (16 bits) and the pair
//! (round key 5's low byte, round key 6) unknown. This module walks round
//! key 7 across a worker pool, farming each value out to the bit-sliced
//! search in [`crate::bitslice`] for the remaining 32 bits and verifying any
//! match against the other two good pairs with a plain scalar encryption.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use crate::attack::CandidateKey;
use crate::bitslice;
use crate::cipher::{key_schedule, key_schedule_g, mix_columns, rotate_rows, sub_bytes};
use crate::logging::{log_status, Level};
use crate::pairs::TuplePair;

/// Encrypts `pt` seven rounds under `key`/`tweak` (the scalar equivalent of
/// [`crate::cipher::encrypt`]'s first eight round-key additions, ending one
/// `MixColumns` short of a ninth) and checks the result against
/// `target_state`, the pre-rk8 state recorded by left-state enumeration.
fn test_key(key: u128, pt: u32, tweak: u64, target_state: u32) -> bool {
    let rk = key_schedule(key, tweak);
    let mut state = pt ^ rk[0];
    for rk_i in &rk[1..8] {
        state = mix_columns(rotate_rows(sub_bytes(state))) ^ rk_i;
    }
    state = mix_columns(rotate_rows(sub_bytes(state)));
    state == target_state
}

fn try_rk7(rk7: u32, candidate: &CandidateKey, tp1: &TuplePair, tp2: &TuplePair, tp3: &TuplePair) -> Option<u128> {
    let mut key2: u128 = u128::from(candidate.rk8910) | (u128::from(candidate.rk5b) << 120);
    key2 |= u128::from(mix_columns(rotate_rows(rk7 | (u32::from(candidate.left.key) << 16)))) << 64;

    let seed = tp1.a.tweak;
    let mut pkey = key2 ^ u128::from(seed);
    pkey ^= u128::from(seed) << 32;
    pkey ^= u128::from(seed) << 64;
    pkey ^= u128::from(seed) >> 32;

    let found = bitslice::search(tp1.a.pt, candidate.left.sx, pkey);
    let rk56_diff = ((seed >> 24) ^ (seed >> 56)) as u32;

    for rk56 in found {
        key2 &= !(0x00ff_ffff_ff00_0000u128 << 64);
        key2 |= u128::from(rk56 ^ rk56_diff) << 88;

        let mut key1 = (key2 ^ (key2 >> 32)) & ((u128::from(0xffff_ffffu32) << 64) | u128::from(u64::MAX));
        key1 |= (u128::from(key_schedule_g((key1 & 0xffff_ffff) as u32, 1)) << 96) ^ (key2 & (u128::from(0xffff_ffffu32) << 96));

        if !test_key(key1, tp2.a.pt, tp2.a.tweak, candidate.left.sy) {
            continue;
        }
        if !test_key(key1, tp3.a.pt, tp3.a.tweak, candidate.left.sz) {
            continue;
        }
        return Some(key1);
    }
    None
}

/// Brute-forces the remaining 48 key bits for one 80-bit candidate,
/// splitting round key 7's 16-bit value across `num_threads` workers.
/// Returns the recovered 128-bit key, or `None` if this candidate turns out
/// not to match.
#[must_use]
pub fn brute_force_48(tp1: &TuplePair, tp2: &TuplePair, tp3: &TuplePair, candidate: &CandidateKey, num_threads: usize) -> Option<u128> {
    let next_rk7 = AtomicU32::new(0);
    let last_pct = AtomicU32::new(0);
    let success = AtomicBool::new(false);
    let result: Mutex<Option<u128>> = Mutex::new(None);

    log_status(Level::White, &format!("Spawning {num_threads} threads."));

    std::thread::scope(|scope| {
        for _ in 0..num_threads.max(1) {
            scope.spawn(|| loop {
                if success.load(Ordering::Relaxed) {
                    return;
                }
                let rk7 = next_rk7.fetch_add(1, Ordering::Relaxed);
                if rk7 >= 0x1_0000 {
                    return;
                }
                let pct = 100 * rk7 / 0x1_0000;
                if pct > last_pct.load(Ordering::Relaxed) {
                    last_pct.store(pct, Ordering::Relaxed);
                    log_status(Level::White, &format!("{pct}% done."));
                }
                if let Some(key) = try_rk7(rk7, candidate, tp1, tp2, tp3) {
                    log_status(Level::Green, &format!("Found key: {key:032x}"));
                    *result.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(key);
                    success.store(true, Ordering::Relaxed);
                    return;
                }
            });
        }
    });

    result.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Tries every candidate in turn, returning the first recovered key.
#[must_use]
pub fn search_candidates(
    tp1: &TuplePair,
    tp2: &TuplePair,
    tp3: &TuplePair,
    candidates: &[CandidateKey],
    num_threads: usize,
) -> Option<u128> {
    for (index, candidate) in candidates.iter().enumerate() {
        log_status(
            Level::White,
            &format!(
                "Searching for remaining 48 bits for key {:02x} {:02x} {:016x} ({}/{}).",
                candidate.rk5b,
                candidate.left.key,
                candidate.rk8910,
                index + 1,
                candidates.len()
            ),
        );
        if let Some(key) = brute_force_48(tp1, tp2, tp3, candidate, num_threads) {
            return Some(key);
        }
    }
    None
}
