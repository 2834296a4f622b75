//! HALFLOOP-24 Attack Pipeline Criterion Benchmark
//!
//! Statistically rigorous performance measurements for each stage of the
//! differential meet-in-the-middle pipeline, plus the bit-sliced brute-force
//! completion.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use halfloop_core::attack::{build_left_table, build_right_table, find_candidate_keys, left_states};
use halfloop_core::cipher::key_schedule;
use halfloop_core::generator::generate_good_pairs;
use halfloop_core::pairs::{good_pairs, TuplePair};
use rand::prelude::*;
use std::hint::black_box;

const FIXED_KEY: u128 = (0x2b7e_1516_28ae_d2a6_u128 << 64) | 0xabf7_1588_09cf_4f3c_u128;
const FIXED_TWEAK: u64 = 0x543b_d880_0001_7550;

/// Draws three good pairs under a fixed key/tweak for the stages below: real
/// output from the attack's own good-pair filter, not synthetic data.
fn fixture_pairs() -> [TuplePair; 3] {
    let mut rng = rand::rng();
    let (tuples, _) = generate_good_pairs(FIXED_KEY, FIXED_TWEAK, 3, || {
        let mut buf = [0u8; 4];
        rng.fill(&mut buf);
        u32::from_ne_bytes(buf) & 0x00ff_ff00
    })
    .unwrap();
    let pairs = good_pairs(&tuples);
    assert!(pairs.len() >= 3, "fixture produced too few good pairs to benchmark");
    [pairs[0], pairs[1], pairs[2]]
}

// =============================================================================
// STAGE E: LEFT-STATE ENUMERATION
// =============================================================================

/// Enumerating every pre-rk8 state consistent with one good pair's
/// differential is the single most expensive stage in the pipeline (a `2^24`
/// sweep with an inner `2^8` scan), so it gets its own group with a reduced
/// sample size.
fn bench_left_states(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Left-State-Enumeration");
    group.sample_size(10);

    let [tp1, _, _] = fixture_pairs();
    group.bench_function("single-good-pair", |b| b.iter(|| left_states(black_box(&tp1))));
    group.finish();
}

// =============================================================================
// STAGE F: LEFT-TABLE JOIN
// =============================================================================

/// Joining three left-state lists on their shared key byte, at realistic
/// list sizes drawn from the fixture pairs.
fn bench_left_table_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Left-Table-Join");

    let [tp1, tp2, tp3] = fixture_pairs();
    let list1 = left_states(&tp1);
    let list2 = left_states(&tp2);
    let list3 = left_states(&tp3);
    group.throughput(Throughput::Elements(list1.len() as u64));

    group.bench_function("three-good-pairs", |b| b.iter(|| build_left_table(black_box(&list1), black_box(&list2), black_box(&list3))));
    group.finish();
}

// =============================================================================
// STAGE G: RIGHT-TABLE CONSTRUCTION
// =============================================================================

/// Always exactly 256 entries per table; cheap, but run on both the
/// msb and mid projections since they differ by a rotate.
fn bench_right_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Right-Table-Construction");

    let [tp1, tp2, tp3] = fixture_pairs();
    group.bench_function("msb-byte", |b| b.iter(|| build_right_table(black_box(&tp1), black_box(&tp2), black_box(&tp3), false)));
    group.bench_function("mid-byte", |b| b.iter(|| build_right_table(black_box(&tp1), black_box(&tp2), black_box(&tp3), true)));
    group.finish();
}

// =============================================================================
// STAGE H: CANDIDATE-KEY ENUMERATION
// =============================================================================

/// The meet-in-the-middle join between the left table and the two right
/// tables, at the table sizes the earlier stages actually produce.
fn bench_candidate_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Candidate-Key-Enumeration");
    group.sample_size(10);

    let [tp1, tp2, tp3] = fixture_pairs();
    let left_table = build_left_table(&left_states(&tp1), &left_states(&tp2), &left_states(&tp3));
    let right_msb = build_right_table(&tp1, &tp2, &tp3, false);
    let right_mid = build_right_table(&tp1, &tp2, &tp3, true);
    group.throughput(Throughput::Elements(left_table.len() as u64));

    group.bench_function("one-triple", |b| {
        b.iter(|| find_candidate_keys(black_box(&tp1), black_box(&tp2), black_box(&tp3), black_box(&left_table), black_box(&right_msb), black_box(&right_mid)))
    });
    group.finish();
}

// =============================================================================
// STAGE J: BIT-SLICED BRUTE FORCE
// =============================================================================

/// The full `2^32` bit-sliced search, keyed by a known key so it always
/// succeeds. This is the single most compute-heavy call in the toolkit, so
/// the sample size is cut to the minimum criterion allows.
fn bench_bitslice_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("5-Bitslice-Search");
    group.sample_size(10);
    group.throughput(Throughput::Elements(1u64 << 32));

    let rk = key_schedule(FIXED_KEY, FIXED_TWEAK);
    let pkey = (u128::from(rk[5] & 0x00ff00) << 112)
        | (u128::from(rk[7]) << 64)
        | (u128::from(rk[8]) << 40)
        | (u128::from(rk[9]) << 16)
        | u128::from(rk[10] >> 8);

    let pt = 0x0102_03u32;
    let mut state = pt;
    for rk_i in &rk[0..8] {
        use halfloop_core::cipher::{mix_columns, rotate_rows, sub_bytes};
        state = mix_columns(rotate_rows(sub_bytes(state ^ rk_i)));
    }

    group.bench_function("full-2-32-sweep", |b| b.iter(|| halfloop_core::bitslice::search(black_box(pt), black_box(state), black_box(pkey))));
    group.finish();
}

criterion_group!(
    benches,
    bench_left_states,
    bench_left_table_join,
    bench_right_table,
    bench_candidate_keys,
    bench_bitslice_search,
);
criterion_main!(benches);
