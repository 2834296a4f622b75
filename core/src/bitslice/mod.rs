//! Bit-sliced brute force of the final 48 key bits (stage J): given a
//! plaintext, a meet-in-the-middle-narrowed partial key, and an intermediate
//! target state, enumerates every 32-bit `rk56` (the concatenation of round
//! key 5's low byte and round key 6) consistent with it.
//!
//! The gate network in [`gates`] is written once, generic over the [`Lane`]
//! abstraction in [`lane`], and instantiated by both the portable 64-lane
//! backend and (on `x86_64` with runtime AVX2 support) the 256-lane vector
//! backend. [`dispatcher::search`] picks whichever is available.

pub mod avx2;
mod dispatcher;
mod gates;
mod lane;
pub mod portable;

pub use dispatcher::search;

use gates::{mix_columns_bitsliced, rotate_rows_4, rotate_rows_6, sub_bytes_bitsliced, EightBits, TwentyFourBits};
use lane::Lane;

fn bit_msb(value: u32, width: u32, n: u32) -> bool {
    ((value >> (width - 1 - n)) & 1) != 0
}

fn bit_msb_u128(value: u128, n: u32) -> bool {
    ((value >> (127 - n)) & 1) != 0
}

fn byte_bits<L: Lane>(value: u32, width: u32, start: u32) -> EightBits<L> {
    std::array::from_fn(|i| L::splat(bit_msb(value, width, start + i as u32)))
}

fn key_byte<L: Lane>(pkey: u128, start: u32) -> EightBits<L> {
    std::array::from_fn(|i| L::splat(bit_msb_u128(pkey, start + i as u32)))
}

/// Reads a byte of the outer/lane-split `rk56` value at absolute bit offset
/// `start` (`start` is in `0..32`, MSB-first): bits below `32 - LANE_BITS`
/// come from the fixed outer counter, the rest vary per lane.
fn rk56_byte<L: Lane>(rk56_fixed: u32, start: u32) -> EightBits<L> {
    let fixed_width = 32 - L::LANE_BITS;
    std::array::from_fn(|i| {
        let n = start + i as u32;
        if n < fixed_width {
            L::splat(bit_msb(rk56_fixed, 32, n))
        } else {
            L::counter_bit(n - fixed_width)
        }
    })
}

fn xor_byte<L: Lane>(a: EightBits<L>, b: EightBits<L>) -> EightBits<L> {
    std::array::from_fn(|i| a[i].xor(b[i]))
}

fn full_round<L: Lane>(state: TwentyFourBits<L>) -> TwentyFourBits<L> {
    let msb = sub_bytes_bitsliced(state.msb);
    let mid = rotate_rows_6(sub_bytes_bitsliced(state.mid));
    let lsb = rotate_rows_4(sub_bytes_bitsliced(state.lsb));
    mix_columns_bitsliced(TwentyFourBits { msb, mid, lsb })
}

/// Enumerates `rk56` values that carry `pt` (the 24-bit plaintext) through
/// seven round-key additions (with a full round transform after the first
/// six) to the state produced by backward-transforming `target_ct` through
/// two inverse rounds keyed by `pkey`. Returns every matching `rk56` found.
pub(crate) fn search_generic<L: Lane>(pt: u32, target_ct: u32, pkey: u128) -> Vec<u32> {
    use crate::cipher::{inv_mix_columns, inv_rotate_rows, inv_sub_bytes, key_schedule_g};

    let pt_bits = TwentyFourBits {
        msb: byte_bits::<L>(pt, 32, 8),
        mid: byte_bits::<L>(pt, 32, 16),
        lsb: byte_bits::<L>(pt, 32, 24),
    };

    let mut target = target_ct;
    target = (inv_sub_bytes(inv_rotate_rows(inv_mix_columns(target))) ^ ((pkey >> 64) as u32)) & 0x00ff_ffff;
    target = inv_sub_bytes(inv_rotate_rows(inv_mix_columns(target)));
    let target_bits = TwentyFourBits::<L> {
        msb: byte_bits::<L>(target, 32, 8),
        mid: byte_bits::<L>(target, 32, 16),
        lsb: byte_bits::<L>(target, 32, 24),
    };

    let g_value = key_schedule_g(((pkey ^ (pkey >> 32)) & 0xffff_ffff) as u32, 1);

    let mut found = Vec::new();
    let step = 1u64 << L::LANE_BITS;
    let mut rk56: u64 = 0;
    while rk56 < 0x1_0000_0000 {
        let rk56_fixed = rk56 as u32;
        let mut state = pt_bits;

        state.msb = xor_byte(state.msb, xor_byte(key_byte(pkey, 0), byte_bits(g_value, 32, 0)));
        state.mid = xor_byte(state.mid, xor_byte(rk56_byte(rk56_fixed, 0), byte_bits(g_value, 32, 8)));
        state.lsb = xor_byte(state.lsb, xor_byte(rk56_byte(rk56_fixed, 8), byte_bits(g_value, 32, 16)));
        state = full_round(state);

        state.msb = xor_byte(state.msb, xor_byte(rk56_byte(rk56_fixed, 16), byte_bits(g_value, 32, 24)));
        state.mid = xor_byte(state.mid, xor_byte(rk56_byte(rk56_fixed, 24), key_byte(pkey, 0)));
        state.lsb = xor_byte(state.lsb, xor_byte(key_byte(pkey, 40), rk56_byte(rk56_fixed, 0)));
        state = full_round(state);

        state.msb = xor_byte(state.msb, xor_byte(key_byte(pkey, 48), rk56_byte(rk56_fixed, 8)));
        state.mid = xor_byte(state.mid, xor_byte(key_byte(pkey, 56), rk56_byte(rk56_fixed, 16)));
        state.lsb = xor_byte(state.lsb, xor_byte(key_byte(pkey, 64), rk56_byte(rk56_fixed, 24)));
        state = full_round(state);

        state.msb = xor_byte(state.msb, xor_byte(key_byte(pkey, 72), key_byte(pkey, 40)));
        state.mid = xor_byte(state.mid, xor_byte(key_byte(pkey, 80), key_byte(pkey, 48)));
        state.lsb = xor_byte(state.lsb, xor_byte(key_byte(pkey, 88), key_byte(pkey, 56)));
        state = full_round(state);

        state.msb = xor_byte(state.msb, xor_byte(key_byte(pkey, 96), key_byte(pkey, 64)));
        state.mid = xor_byte(state.mid, xor_byte(key_byte(pkey, 104), key_byte(pkey, 72)));
        state.lsb = xor_byte(state.lsb, xor_byte(key_byte(pkey, 112), key_byte(pkey, 80)));
        state = full_round(state);

        state.msb = xor_byte(state.msb, xor_byte(key_byte(pkey, 120), key_byte(pkey, 88)));
        state.mid = xor_byte(state.mid, key_byte(pkey, 0));
        state.lsb = xor_byte(state.lsb, rk56_byte(rk56_fixed, 0));
        state = full_round(state);

        state.msb = xor_byte(state.msb, rk56_byte(rk56_fixed, 8));
        state.mid = xor_byte(state.mid, rk56_byte(rk56_fixed, 16));
        state.lsb = xor_byte(state.lsb, rk56_byte(rk56_fixed, 24));

        let mut mismatch = L::zero();
        for i in 0..8 {
            mismatch = mismatch.or(state.msb[i].xor(target_bits.msb[i]));
            mismatch = mismatch.or(state.mid[i].xor(target_bits.mid[i]));
            mismatch = mismatch.or(state.lsb[i].xor(target_bits.lsb[i]));
        }
        let matches = mismatch.not();
        for lane in matches.set_lane_indices() {
            found.push(rk56_fixed | lane);
        }

        rk56 += step;
    }
    found
}

fn byte_to_bits(byte: u8) -> EightBits<u64> {
    std::array::from_fn(|i| u64::splat((byte >> (7 - i)) & 1 != 0))
}

fn bits_to_byte(bits: EightBits<u64>) -> u8 {
    let mut out = 0u8;
    for (i, bit) in bits.iter().enumerate() {
        if *bit == u64::MAX {
            out |= 1 << (7 - i);
        }
    }
    out
}

fn state_to_bits(state: u32) -> TwentyFourBits<u64> {
    TwentyFourBits {
        msb: byte_to_bits((state >> 16) as u8),
        mid: byte_to_bits((state >> 8) as u8),
        lsb: byte_to_bits(state as u8),
    }
}

fn bits_to_state(bits: TwentyFourBits<u64>) -> u32 {
    (u32::from(bits_to_byte(bits.msb)) << 16) | (u32::from(bits_to_byte(bits.mid)) << 8) | u32::from(bits_to_byte(bits.lsb))
}

/// Validates the bit-sliced gate networks against their scalar counterparts:
/// the S-box over all 256 byte values, the two byte rotates over all 256
/// byte values each, and `MixColumns` over every 24-bit state. All four
/// checks are exhaustive but cheap (the most expensive, `MixColumns`, is
/// `2^24` XOR-only evaluations).
///
/// # Errors
/// Returns [`crate::HalfloopError::Failure`] naming the stage that disagreed
/// with its scalar reference.
pub fn self_test() -> crate::Result<()> {
    use crate::cipher::{mix_columns, rotate_rows, sub_bytes, SBOX};
    use crate::error::HalfloopError;

    for byte in 0u32..256 {
        let byte = byte as u8;
        if bits_to_byte(sub_bytes_bitsliced(byte_to_bits(byte))) != SBOX[byte as usize] {
            return Err(HalfloopError::Failure(format!("bit-sliced s-box disagrees with scalar at byte {byte:#04x}")));
        }
        if bits_to_byte(rotate_rows_6(byte_to_bits(byte))) != byte.rotate_left(6) {
            return Err(HalfloopError::Failure(format!("bit-sliced rotate_rows_6 disagrees with scalar at byte {byte:#04x}")));
        }
        if bits_to_byte(rotate_rows_4(byte_to_bits(byte))) != byte.rotate_left(4) {
            return Err(HalfloopError::Failure(format!("bit-sliced rotate_rows_4 disagrees with scalar at byte {byte:#04x}")));
        }
    }

    // rotate_rows only touches the middle and low bytes; check MixColumns
    // against every 24-bit state (the high byte stands in for all possible
    // msb values since the scalar reference treats each byte symmetrically).
    for state in 0u32..(1 << 24) {
        let scalar = mix_columns(state);
        let bitsliced = bits_to_state(mix_columns_bitsliced(state_to_bits(state)));
        if bitsliced != scalar {
            return Err(HalfloopError::Failure(format!("bit-sliced mix_columns disagrees with scalar at state {state:#08x}")));
        }
    }

    // rotate_rows combines the two byte rotates; spot-check the composed
    // transform once more against the scalar reference for good measure.
    if rotate_rows(0x0102_03) != ((0x01u32) << 16) | (u32::from(0x02u8.rotate_left(6)) << 8) | u32::from(0x03u8.rotate_left(4)) {
        return Err(HalfloopError::Failure("rotate_rows composed check failed".to_string()));
    }

    Ok(())
}

/// Runs the full `2^32` bit-sliced search against a known `(key, tweak, pt)`
/// triple and confirms the true `rk56` is among the matches. Exercises the
/// same round-key injection schedule as [`search`], so a pass here is strong
/// evidence the dispatcher's chosen backend (portable or AVX2) is correct.
///
/// # Errors
/// Returns [`crate::HalfloopError::Failure`] if the true `rk56` was not
/// found, and forwards any cipher error encountered while encrypting.
pub fn self_test_search(key: u128, tweak: u64, pt: u32) -> crate::Result<()> {
    use crate::cipher::{key_schedule, mix_columns, rotate_rows, sub_bytes};
    use crate::error::HalfloopError;

    let rk = key_schedule(key, tweak);
    let true_rk56 = ((rk[5] & 0xff) << 24) | rk[6];

    let mut state = pt;
    for rk_i in &rk[0..8] {
        state = mix_columns(rotate_rows(sub_bytes(state ^ rk_i)));
    }

    let pkey = (u128::from(rk[5] & 0x00ff00) << 112)
        | (u128::from(rk[7]) << 64)
        | (u128::from(rk[8]) << 40)
        | (u128::from(rk[9]) << 16)
        | u128::from(rk[10] >> 8);

    if search(pt, state, pkey).contains(&true_rk56) {
        Ok(())
    } else {
        Err(HalfloopError::Failure("full search did not recover the true rk56".to_string()))
    }
}
