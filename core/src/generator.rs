//! Chosen-plaintext data generator (stage Q, supplemental).
//!
//! Synthesizes `(plaintext, ciphertext, tweak)` tuples for a known key that
//! are already good pairs, the way the original research tooling produced
//! attack inputs for testing: encrypt a batch of 256 chosen plaintexts that
//! only differ in their low byte, then scan the batch for the ciphertext
//! collision the attack's differential template predicts.

use crate::cipher::encrypt;
use crate::error::Result;
use crate::tuple::Tuple;

/// Encrypts the 256 plaintexts `pt0 ^ 0, pt0 ^ 1, .. pt0 ^ 0xff` under
/// `key`/`tweak0 ^ (delta << 40)` and returns every pair `(i, j)` whose
/// ciphertexts collide the way the attack's good-pair template requires,
/// together with the tuples it would emit for each.
fn scan_batch(key: u128, tweak0: u64, pt0: u32) -> Result<Vec<[Tuple; 2]>> {
    let mut ct = [0u32; 256];
    for (delta, slot) in ct.iter_mut().enumerate() {
        let tweak = tweak0 ^ ((delta as u64) << 40);
        *slot = encrypt(pt0 ^ delta as u32, key, tweak)?;
    }

    let mut found = Vec::new();
    for i in 0..0x100u32 {
        for j in (i + 1)..0x100u32 {
            let out_diff = (i ^ j) << 16;
            if (ct[i as usize] ^ ct[j as usize]) == out_diff {
                let a = Tuple {
                    pt: pt0 ^ i,
                    ct: ct[i as usize],
                    tweak: tweak0 ^ (u64::from(i) << 40),
                };
                let b = Tuple {
                    pt: pt0 ^ j,
                    ct: ct[j as usize],
                    tweak: tweak0 ^ (u64::from(j) << 40),
                };
                found.push([a, b]);
            }
        }
    }
    Ok(found)
}

/// Generates `num_pairs` good pairs of tuples under `key`/`tweak0`, drawing
/// chosen plaintexts from `draw_pt0` (a `u32` already masked to 24 bits is
/// expected; the low byte is varied internally, so only the high two bytes
/// need to be random).
///
/// Returns the flat list of `2 * num_pairs` tuples, two per good pair, in
/// generation order. Also returns the number of chosen-plaintext queries
/// performed, matching the original tool's reported query count.
///
/// # Errors
/// Forwards any error from the underlying cipher calls (only reachable if
/// `draw_pt0` ever yields a value with a non-zero top byte, which callers
/// must not do).
pub fn generate_good_pairs<F>(key: u128, tweak0: u64, num_pairs: usize, mut draw_pt0: F) -> Result<(Vec<Tuple>, u64)>
where
    F: FnMut() -> u32,
{
    let mut tuples = Vec::with_capacity(num_pairs * 2);
    let mut queries = 0u64;
    while tuples.len() < num_pairs * 2 {
        let pt0 = draw_pt0() & 0x00ff_ffff;
        let batch = scan_batch(key, tweak0, pt0)?;
        queries += 256;
        for pair in batch {
            if tuples.len() >= num_pairs * 2 {
                break;
            }
            tuples.push(pair[0]);
            tuples.push(pair[1]);
        }
    }
    Ok((tuples, queries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairs::good_pairs;

    #[test]
    fn generated_tuples_form_good_pairs() {
        let key = 0x0011_2233_4455_6677_8899_aabb_ccdd_eeff_u128;
        let tweak0 = 0x1234_5678_9abc_def0_u64;
        let mut counter = 0xabcdu32;
        let (tuples, queries) = generate_good_pairs(key, tweak0, 10, || {
            counter = counter.wrapping_add(0x0001_0000);
            counter
        })
        .unwrap();
        assert_eq!(tuples.len(), 20);
        assert!(queries > 0);
        let pairs = good_pairs(&tuples);
        assert!(pairs.len() >= 10);
    }
}
