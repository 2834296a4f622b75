//! Boomerang distinguisher byte-recovery attack (stage L).
//!
//! Recovers one byte of key material at a time from a boomerang quartet
//! built around an arbitrary base plaintext/tweak pair, independent of the
//! differential pipeline in [`crate::attack`].

use crate::cipher::{decrypt, encrypt, mix_columns, rotate_rows, SBOX};
use crate::error::{HalfloopError, Result};
use crate::logging::{log_status, Level};
use crate::random::{random_bytes, random_nonzero_u8, random_u128, random_u32, random_u64};

/// A recovered key byte, together with the delta/d' values that produced
/// the boomerang quartet matching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoredByte {
    /// The recovered key byte, already XORed back with the relevant tweak
    /// byte.
    pub key_byte: u8,
    /// The `delta` value that completed the boomerang quartet.
    pub delta: u8,
    /// The derived `d'` value, reported alongside the key byte.
    pub d_prime: u8,
}

/// Recovers key byte `n` (0, 1, or 2) using a boomerang attack.
///
/// `tweak0`/`pt0` can be arbitrary; `ct0` must be `pt0` encrypted under
/// `key`/`tweak0`, and `pt0x` must be `ct0` decrypted under `key` and
/// `tweak0` XORed with `gamma` shifted into bytes 5 and 1. `operations` is
/// incremented by one for every encryption/decryption pair performed.
///
/// # Errors
/// Returns [`HalfloopError::BadArgument`] if `pt0`/`ct0` has a non-zero top
/// byte, `beta`/`gamma` is zero, or `n >= 3`. Returns
/// [`HalfloopError::Failure`] if no matching quartet is found across the
/// full delta range.
pub fn restore_byte(
    key: u128,
    tweak0: u64,
    pt0: u32,
    ct0: u32,
    pt0x: u32,
    beta: u8,
    gamma: u8,
    n: u8,
    operations: &mut u64,
) -> Result<RestoredByte> {
    if pt0 & 0xff00_0000 != 0 || ct0 & 0xff00_0000 != 0 || beta == 0 || gamma == 0 || n >= 3 {
        return Err(HalfloopError::BadArgument(format!(
            "invalid restore_byte arguments: pt0={pt0:#x} ct0={ct0:#x} beta={beta:#x} gamma={gamma:#x} n={n}"
        )));
    }

    let shift = 16 - u32::from(n) * 8;
    let tweak1 = tweak0 ^ (u64::from(mix_columns(rotate_rows(u32::from(beta) << shift))) << 16);
    let gamma_shift = (u64::from(gamma) << 8) ^ (u64::from(gamma) << 40);

    for delta in 1u32..0x100 {
        let pt1 = pt0 ^ (delta << shift);
        let ct1 = encrypt(pt1, key, tweak1)?;
        let pt1x = decrypt(ct1, key, tweak1 ^ gamma_shift)?;
        *operations += 1;

        if (pt0x ^ pt1x) & (0x00ff_ffff ^ (0xff << shift)) != 0 {
            continue;
        }

        let pt0b = (pt0 >> shift) as u8;
        let mut pt0xb = (pt0x >> shift) as u8;
        let pt1b = (pt1 >> shift) as u8;
        let mut pt1xb = (pt1x >> shift) as u8;

        if n == 2 {
            pt0xb ^= gamma;
            pt1xb ^= gamma;
        }

        for k0 in 0u32..=0xff {
            let k0 = k0 as u8;
            if SBOX[(k0 ^ pt0b) as usize] ^ SBOX[(k0 ^ pt1b) as usize] == beta
                && SBOX[(k0 ^ pt0xb) as usize] ^ SBOX[(k0 ^ pt1xb) as usize] == beta
            {
                let key_byte = k0 ^ ((tweak0 >> (56 - u32::from(n) * 8)) as u8);
                let d_prime = ((ct0 ^ pt1x) >> shift) as u8;
                log_status(
                    Level::Green,
                    &format!("Key byte {n}: {key_byte:02x} (d = {delta:02x} d' = {d_prime:02x})."),
                );
                return Ok(RestoredByte {
                    key_byte,
                    delta: delta as u8,
                    d_prime,
                });
            }
        }
    }

    log_status(Level::Red, "No key byte found.");
    Err(HalfloopError::Failure(format!(
        "no matching boomerang quartet for key byte {n}"
    )))
}

/// Outcome of [`run_demo`]: the random material drawn, and the three
/// recovered key bytes (corresponding to bytes 0, 1, and 2 of round key 0
/// XORed with the top three tweak bytes).
#[derive(Debug, Clone, Copy)]
pub struct BoomerangDemo {
    pub key: u128,
    pub tweak0: u64,
    pub pt0: u32,
    pub ct0: u32,
    pub beta: u8,
    pub gamma: u8,
    pub restored: [RestoredByte; 3],
    pub operations: u64,
}

/// Draws a random key, tweak, and plaintext, then recovers all three key
/// bytes [`restore_byte`] can reach via boomerang quartets built around
/// them.
///
/// # Errors
/// Returns [`HalfloopError::NetworkError`] if the entropy source cannot be
/// read, or any error [`restore_byte`] can return.
pub fn run_demo() -> Result<BoomerangDemo> {
    let beta = random_nonzero_u8()?;
    let gamma = random_nonzero_u8()?;
    let mut pt0 = random_u32()?;
    pt0 &= 0x00ff_ffff;
    let tweak0 = random_u64()?;
    let key = random_u128()?;

    let ct0 = encrypt(pt0, key, tweak0)?;
    let gamma_shift = (u64::from(gamma) << 8) ^ (u64::from(gamma) << 40);
    let pt0x = decrypt(ct0, key, tweak0 ^ gamma_shift)?;
    let mut operations = 1u64;

    let mut restored = [RestoredByte {
        key_byte: 0,
        delta: 0,
        d_prime: 0,
    }; 3];
    for (n, slot) in restored.iter_mut().enumerate() {
        *slot = restore_byte(key, tweak0, pt0, ct0, pt0x, beta, gamma, n as u8, &mut operations)?;
    }

    Ok(BoomerangDemo {
        key,
        tweak0,
        pt0,
        ct0,
        beta,
        gamma,
        restored,
        operations,
    })
}
