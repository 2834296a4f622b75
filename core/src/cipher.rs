//! HALFLOOP-24 cipher primitives.
//!
//! A HALFLOOP-24 block is 24 bits, carried here in the low 24 bits of a
//! `u32` and viewed as three bytes `(a0 msb, a1, a2 lsb)`. Every function in
//! this module is a direct, bit-for-bit port of the reference C
//! implementation's `sub_bytes`/`rotate_rows`/`mix_columns`/key schedule.

use std::sync::OnceLock;

use crate::error::{HalfloopError, Result};

/// The Rijndael S-box.
pub const SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

/// Inverse of [`SBOX`].
pub const INV_SBOX: [u8; 256] = [
    0x52, 0x09, 0x6a, 0xd5, 0x30, 0x36, 0xa5, 0x38, 0xbf, 0x40, 0xa3, 0x9e, 0x81, 0xf3, 0xd7, 0xfb,
    0x7c, 0xe3, 0x39, 0x82, 0x9b, 0x2f, 0xff, 0x87, 0x34, 0x8e, 0x43, 0x44, 0xc4, 0xde, 0xe9, 0xcb,
    0x54, 0x7b, 0x94, 0x32, 0xa6, 0xc2, 0x23, 0x3d, 0xee, 0x4c, 0x95, 0x0b, 0x42, 0xfa, 0xc3, 0x4e,
    0x08, 0x2e, 0xa1, 0x66, 0x28, 0xd9, 0x24, 0xb2, 0x76, 0x5b, 0xa2, 0x49, 0x6d, 0x8b, 0xd1, 0x25,
    0x72, 0xf8, 0xf6, 0x64, 0x86, 0x68, 0x98, 0x16, 0xd4, 0xa4, 0x5c, 0xcc, 0x5d, 0x65, 0xb6, 0x92,
    0x6c, 0x70, 0x48, 0x50, 0xfd, 0xed, 0xb9, 0xda, 0x5e, 0x15, 0x46, 0x57, 0xa7, 0x8d, 0x9d, 0x84,
    0x90, 0xd8, 0xab, 0x00, 0x8c, 0xbc, 0xd3, 0x0a, 0xf7, 0xe4, 0x58, 0x05, 0xb8, 0xb3, 0x45, 0x06,
    0xd0, 0x2c, 0x1e, 0x8f, 0xca, 0x3f, 0x0f, 0x02, 0xc1, 0xaf, 0xbd, 0x03, 0x01, 0x13, 0x8a, 0x6b,
    0x3a, 0x91, 0x11, 0x41, 0x4f, 0x67, 0xdc, 0xea, 0x97, 0xf2, 0xcf, 0xce, 0xf0, 0xb4, 0xe6, 0x73,
    0x96, 0xac, 0x74, 0x22, 0xe7, 0xad, 0x35, 0x85, 0xe2, 0xf9, 0x37, 0xe8, 0x1c, 0x75, 0xdf, 0x6e,
    0x47, 0xf1, 0x1a, 0x71, 0x1d, 0x29, 0xc5, 0x89, 0x6f, 0xb7, 0x62, 0x0e, 0xaa, 0x18, 0xbe, 0x1b,
    0xfc, 0x56, 0x3e, 0x4b, 0xc6, 0xd2, 0x79, 0x20, 0x9a, 0xdb, 0xc0, 0xfe, 0x78, 0xcd, 0x5a, 0xf4,
    0x1f, 0xdd, 0xa8, 0x33, 0x88, 0x07, 0xc7, 0x31, 0xb1, 0x12, 0x10, 0x59, 0x27, 0x80, 0xec, 0x5f,
    0x60, 0x51, 0x7f, 0xa9, 0x19, 0xb5, 0x4a, 0x0d, 0x2d, 0xe5, 0x7a, 0x9f, 0x93, 0xc9, 0x9c, 0xef,
    0xa0, 0xe0, 0x3b, 0x4d, 0xae, 0x2a, 0xf5, 0xb0, 0xc8, 0xeb, 0xbb, 0x3c, 0x83, 0x53, 0x99, 0x61,
    0x17, 0x2b, 0x04, 0x7e, 0xba, 0x77, 0xd6, 0x26, 0xe1, 0x69, 0x14, 0x63, 0x55, 0x21, 0x0c, 0x7d,
];

/// GF(2^8) multiplication tables for the `MixColumns`/`InvMixColumns` constants, built once on
/// first use. Reduction polynomial is `0x11b`.
struct MulTables {
    t2: [u8; 256],
    t6: [u8; 256],
    t8: [u8; 256],
    t9: [u8; 256],
    t39: [u8; 256],
}

fn ffmul(a: u8, b: u8) -> u8 {
    let mut c: u32 = 0;
    for x in 0..8 {
        for y in 0..8 {
            if ((a >> x) & (b >> y) & 1) != 0 {
                c ^= 1 << (x + y);
            }
        }
    }
    while c > 0xff {
        let shift = 23 - c.leading_zeros();
        c ^= 0x11b << shift;
    }
    c as u8
}

fn mul_tables() -> &'static MulTables {
    static TABLES: OnceLock<MulTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut t2 = [0u8; 256];
        let mut t6 = [0u8; 256];
        let mut t8 = [0u8; 256];
        let mut t9 = [0u8; 256];
        let mut t39 = [0u8; 256];
        for i in 0..256u16 {
            let i = i as u8;
            t2[i as usize] = ffmul(2, i);
            t6[i as usize] = ffmul(6, i);
            t8[i as usize] = ffmul(8, i);
            t9[i as usize] = ffmul(9, i);
            t39[i as usize] = ffmul(39, i);
        }
        MulTables { t2, t6, t8, t9, t39 }
    })
}

/// Applies the Rijndael S-box to each of the three bytes of a 24-bit state.
#[must_use]
pub fn sub_bytes(state: u32) -> u32 {
    let a0 = (state >> 16) as u8;
    let a1 = (state >> 8) as u8;
    let a2 = state as u8;
    (u32::from(SBOX[a0 as usize]) << 16)
        | (u32::from(SBOX[a1 as usize]) << 8)
        | u32::from(SBOX[a2 as usize])
}

/// Inverse of [`sub_bytes`].
#[must_use]
pub fn inv_sub_bytes(state: u32) -> u32 {
    let a0 = (state >> 16) as u8;
    let a1 = (state >> 8) as u8;
    let a2 = state as u8;
    (u32::from(INV_SBOX[a0 as usize]) << 16)
        | (u32::from(INV_SBOX[a1 as usize]) << 8)
        | u32::from(INV_SBOX[a2 as usize])
}

/// Rotates the middle byte right by 2 and the low byte right by 4 (within a byte).
#[must_use]
pub fn rotate_rows(state: u32) -> u32 {
    let a0 = (state >> 16) as u8;
    let mut a1 = (state >> 8) as u8;
    let mut a2 = state as u8;
    a1 = a1.rotate_left(6);
    a2 = a2.rotate_left(4);
    (u32::from(a0) << 16) | (u32::from(a1) << 8) | u32::from(a2)
}

/// Inverse of [`rotate_rows`].
#[must_use]
pub fn inv_rotate_rows(state: u32) -> u32 {
    let a0 = (state >> 16) as u8;
    let mut a1 = (state >> 8) as u8;
    let mut a2 = state as u8;
    a1 = a1.rotate_right(6);
    a2 = a2.rotate_right(4);
    (u32::from(a0) << 16) | (u32::from(a1) << 8) | u32::from(a2)
}

/// Linear mixing layer over GF(2^8), reduction polynomial `0x11b`.
#[must_use]
pub fn mix_columns(state: u32) -> u32 {
    let t = mul_tables();
    let a = (state >> 16) as usize;
    let b = ((state >> 8) & 0xff) as usize;
    let c = (state & 0xff) as usize;
    let out_msb = u32::from(t.t9[a]) ^ (b as u32) ^ u32::from(t.t2[c]);
    let out_mid = u32::from(t.t2[a]) ^ u32::from(t.t9[b]) ^ (c as u32);
    let out_lsb = (a as u32) ^ u32::from(t.t2[b]) ^ u32::from(t.t9[c]);
    (out_msb << 16) | (out_mid << 8) | out_lsb
}

/// Inverse of [`mix_columns`].
#[must_use]
pub fn inv_mix_columns(state: u32) -> u32 {
    let t = mul_tables();
    let a = (state >> 16) as usize;
    let b = ((state >> 8) & 0xff) as usize;
    let c = (state & 0xff) as usize;
    let out_msb = u32::from(t.t6[a]) ^ u32::from(t.t8[b]) ^ u32::from(t.t39[c]);
    let out_mid = u32::from(t.t39[a]) ^ u32::from(t.t6[b]) ^ u32::from(t.t8[c]);
    let out_lsb = u32::from(t.t8[a]) ^ u32::from(t.t39[b]) ^ u32::from(t.t6[c]);
    (out_msb << 16) | (out_mid << 8) | out_lsb
}

/// The `g` function used in the HALFLOOP-24 key schedule: byte rotate + S-box + round constant
/// injected into the top byte.
#[must_use]
pub fn key_schedule_g(key_word: u32, rc: u32) -> u32 {
    let b0 = (key_word >> 24) as u8;
    let b1 = (key_word >> 16) as u8;
    let b2 = (key_word >> 8) as u8;
    let b3 = key_word as u8;
    ((u32::from(SBOX[b1 as usize]) ^ rc) << 24)
        ^ (u32::from(SBOX[b2 as usize]) << 16)
        ^ (u32::from(SBOX[b3 as usize]) << 8)
        ^ u32::from(SBOX[b0 as usize])
}

/// Expands a 128-bit key and 64-bit tweak into the 11 round keys (24 bits each).
#[must_use]
pub fn key_schedule(key: u128, tweak: u64) -> [u32; 11] {
    let mut rk = [0u32; 11];
    let mut key = key ^ (u128::from(tweak) << 64);
    rk[0] = ((key >> 104) & 0xffffff) as u32;
    rk[1] = ((key >> 80) & 0xffffff) as u32;
    rk[2] = ((key >> 56) & 0xffffff) as u32;
    rk[3] = ((key >> 32) & 0xffffff) as u32;
    rk[4] = ((key >> 8) & 0xffffff) as u32;
    rk[5] = (((key & 0xff) as u32) << 16) & 0xffffff;

    key ^= u128::from(key_schedule_g((key & 0xffff_ffff) as u32, 1)) << 96;
    key ^= ((key >> 96) & 0xffff_ffff) << 64;
    key ^= ((key >> 64) & 0xffff_ffff) << 32;
    key ^= (key >> 32) & 0xffff_ffff;

    rk[5] |= ((key >> 112) & 0xffff) as u32;
    rk[6] = ((key >> 88) & 0xffffff) as u32;
    rk[7] = ((key >> 64) & 0xffffff) as u32;
    rk[8] = ((key >> 40) & 0xffffff) as u32;
    rk[9] = ((key >> 16) & 0xffffff) as u32;
    rk[10] = (((key & 0xffff) as u32) << 8) & 0xffffff;

    key ^= u128::from(key_schedule_g((key & 0xffff_ffff) as u32, 2)) << 96;
    rk[10] |= ((key >> 120) & 0xff) as u32;

    rk
}

fn encrypt_round(state: u32, round_key: u32, last_round: bool) -> u32 {
    let state = sub_bytes(state);
    let state = rotate_rows(state);
    let state = if last_round { state } else { mix_columns(state) };
    state ^ round_key
}

fn decrypt_round(state: u32, round_key: u32, last_round: bool) -> u32 {
    let state = state ^ round_key;
    let state = if last_round { state } else { inv_mix_columns(state) };
    let state = inv_rotate_rows(state);
    inv_sub_bytes(state)
}

/// Encrypts a 24-bit plaintext under `key`/`tweak`. The top byte of `pt` must be zero.
pub fn encrypt(pt: u32, key: u128, tweak: u64) -> Result<u32> {
    if (pt & 0xff00_0000) != 0 {
        return Err(HalfloopError::BadArgument(format!(
            "plaintext {pt:#x} has a non-zero top byte"
        )));
    }
    let rk = key_schedule(key, tweak);
    let mut ct = pt ^ rk[0];
    for rk_i in &rk[1..10] {
        ct = encrypt_round(ct, *rk_i, false);
    }
    ct = encrypt_round(ct, rk[10], true);
    Ok(ct)
}

/// Decrypts a 24-bit ciphertext under `key`/`tweak`. The top byte of `ct` must be zero.
pub fn decrypt(ct: u32, key: u128, tweak: u64) -> Result<u32> {
    if (ct & 0xff00_0000) != 0 {
        return Err(HalfloopError::BadArgument(format!(
            "ciphertext {ct:#x} has a non-zero top byte"
        )));
    }
    let rk = key_schedule(key, tweak);
    let mut pt = decrypt_round(ct, rk[10], true);
    for rk_i in rk[1..10].iter().rev() {
        pt = decrypt_round(pt, *rk_i, false);
    }
    pt ^= rk[0];
    Ok(pt)
}

/// Runs the MIL-STD-188-141D test vector and the S-box inverse self-check. Mirrors the original
/// `test_halfloop`.
pub fn self_test() -> Result<()> {
    for i in 0..256 {
        if INV_SBOX[SBOX[i] as usize] as usize != i {
            return Err(HalfloopError::InternalError(
                "S-box/inverse S-box mismatch".into(),
            ));
        }
    }
    let key = (0x2b7e_1516_28ae_d2a6_u128 << 64) | 0xabf7_1588_09cf_4f3c_u128;
    let tweak = 0x543b_d880_0001_7550_u64;
    let pt = 0x0102_03_u32;
    let ct = 0xf28c_1e_u32;
    if encrypt(pt, key, tweak)? != ct {
        return Err(HalfloopError::InternalError(
            "encrypt test vector mismatch".into(),
        ));
    }
    if decrypt(ct, key, tweak)? != pt {
        return Err(HalfloopError::InternalError(
            "decrypt test vector mismatch".into(),
        ));
    }
    Ok(())
}
