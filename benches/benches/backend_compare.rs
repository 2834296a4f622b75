//! Backend Comparison Benchmark
//!
//! Compares the runtime-dispatched bit-slicing kernel against its two
//! explicit backends (portable 64-lane, AVX2 256-lane), to quantify the
//! cost of the dispatch check and the speedup AVX2 buys when available.

#![allow(clippy::unwrap_used)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use halfloop_core::bitslice;
use halfloop_core::cipher::{key_schedule, mix_columns, rotate_rows, sub_bytes};
use std::hint::black_box;

const KEY: u128 = (0x2b7e_1516_28ae_d2a6_u128 << 64) | 0xabf7_1588_09cf_4f3c_u128;
const TWEAK: u64 = 0x543b_d880_0001_7550;
const PT: u32 = 0x0102_03;

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bitslice Backends");
    group.sample_size(10);
    group.throughput(Throughput::Elements(1u64 << 32));

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

    // 1. Dispatcher (production path): picks AVX2 when available, else portable.
    group.bench_function("Dispatcher (default)", |b| {
        b.iter(|| bitslice::search(black_box(PT), black_box(target), black_box(pkey)));
    });

    // 2. AVX2 — explicit kernel, bypasses the dispatcher's feature check.
    if is_x86_feature_detected!("avx2") {
        group.bench_function("AVX2 (explicit)", |b| {
            // SAFETY: avx2 support confirmed by is_x86_feature_detected! above.
            b.iter(|| unsafe { bitslice::avx2::search(black_box(PT), black_box(target), black_box(pkey)) });
        });
    }

    // 3. Portable — the 64-lane fallback, used as the baseline.
    group.bench_function("Portable (baseline)", |b| {
        b.iter(|| bitslice::portable::search(black_box(PT), black_box(target), black_box(pkey)));
    });

    group.finish();
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
