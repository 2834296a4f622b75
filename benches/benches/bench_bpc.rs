//! Keys-per-Cycle Benchmark: HALFLOOP-24 Bitslice Search
//!
//! Measures true algorithmic efficiency using hardware cycle counters
//! (RDTSC), the way bytes-per-cycle is measured for a bulk hash.

#![allow(unsafe_code)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::unwrap_used)]

use halfloop_core::bitslice;
use halfloop_core::cipher::{key_schedule, mix_columns, rotate_rows, sub_bytes};
use std::arch::x86_64::_rdtsc;
use std::hint::black_box;

const KEY: u128 = (0x2b7e_1516_28ae_d2a6_u128 << 64) | 0xabf7_1588_09cf_4f3c_u128;
const TWEAK: u64 = 0x543b_d880_0001_7550;
const PT: u32 = 0x0102_03;
const KEYS_SWEPT: f64 = 4_294_967_296.0; // 2^32

// =============================================================================
// UTILITIES
// =============================================================================

/// Measure RDTSC overhead to subtract from measurements.
fn measure_overhead(iterations: u64) -> f64 {
    let start = unsafe { _rdtsc() };
    for _ in 0..iterations {
        black_box(0);
    }
    let end = unsafe { _rdtsc() };
    (end - start) as f64 / iterations as f64
}

/// Runs `f` once and returns elapsed cycles.
fn measure_once(f: impl FnOnce()) -> f64 {
    let start = unsafe { _rdtsc() };
    f();
    let end = unsafe { _rdtsc() };
    (end - start) as f64
}

// =============================================================================
// MAIN BENCHMARK
// =============================================================================

fn main() {
    println!("BENCHMARK: Keys/Cycle for the full 2^32 bit-sliced search");
    println!("===========================================================================");
    println!("{:<25} | {:<15} | {:<15}", "Backend", "Cycles", "Keys/Cycle");
    println!("{:-<25}-+-{:-<15}-+-{:-<15}", "", "", "");

    let overhead = measure_overhead(1_000_000);

    let rk = key_schedule(KEY, TWEAK);
    let pkey = (u128::from(rk[5] & 0x00ff00) << 112)
        | (u128::from(rk[7]) << 64)
        | (u128::from(rk[8]) << 40)
        | (u128::from(rk[9]) << 16)
        | u128::from(rk[10] >> 8);

    let mut target = PT;
    for rk_i in &rk[0..8] {
        target = mix_columns(rotate_rows(sub_bytes(target ^ rk_i)));
    }

    let dispatch_cycles = (measure_once(|| {
        black_box(bitslice::search(black_box(PT), black_box(target), black_box(pkey)));
    }) - overhead)
        .max(1.0);
    println!("{:<25} | {:<15.0} | {:<15.6}", "Dispatcher", dispatch_cycles, KEYS_SWEPT / dispatch_cycles);

    if is_x86_feature_detected!("avx2") {
        let avx2_cycles = (measure_once(|| {
            // SAFETY: avx2 support confirmed by is_x86_feature_detected! above.
            black_box(unsafe { bitslice::avx2::search(black_box(PT), black_box(target), black_box(pkey)) });
        }) - overhead)
            .max(1.0);
        println!("{:<25} | {:<15.0} | {:<15.6}", "AVX2 (explicit)", avx2_cycles, KEYS_SWEPT / avx2_cycles);
    }

    let portable_cycles = (measure_once(|| {
        black_box(bitslice::portable::search(black_box(PT), black_box(target), black_box(pkey)));
    }) - overhead)
        .max(1.0);
    println!("{:<25} | {:<15.0} | {:<15.6}", "Portable (baseline)", portable_cycles, KEYS_SWEPT / portable_cycles);

    println!("===========================================================================");
    println!("* Values in keys swept per CPU cycle across the full 2^32 search (higher is better).");
}
