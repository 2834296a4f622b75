//! Candidate-key enumeration (stage H): the meet-in-the-middle join between
//! the left table and the two right tables.

use crate::cipher::{mix_columns, rotate_rows, sub_bytes, SBOX};
use crate::pairs::TuplePair;

use super::left_table::LeftTableEntry;
use super::right_table::{right_table_lookup, RightTableEntry};

/// An 80-bit partial-key guess emitted by the meet-in-the-middle join.
///
/// Ordered by `(rk5b, left.key, rk8910)` only — `left.sx`/`sy`/`sz` do not
/// participate in comparison, matching the original candidate-key
/// comparator.
#[derive(Debug, Clone, Copy)]
pub struct CandidateKey {
    /// Middle byte of round key 5 — the primary sort key.
    pub rk5b: u8,
    /// The left-table entry (and its shared key byte) this candidate extends.
    pub left: LeftTableEntry,
    /// Round keys 8 and 9 (24 bits each) plus the top two bytes of round key
    /// 10, packed as `(rk8<<40)|(rk9<<16)|(rk9c<<16)|(rk10>>8)`.
    pub rk8910: u64,
}

impl CandidateKey {
    fn sort_key(&self) -> (u8, u8, u64) {
        (self.rk5b, self.left.key, self.rk8910)
    }
}

impl PartialEq for CandidateKey {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for CandidateKey {}

impl PartialOrd for CandidateKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

struct TweakProjections {
    ctc: u8,
    tw5: u8,
    tw8: u32,
    tw9: u32,
}

fn project(pair: &TuplePair) -> TweakProjections {
    let tweak = pair.a.tweak;
    TweakProjections {
        ctc: (pair.a.ct & 0xff) as u8,
        tw5: (tweak >> 56) as u8,
        tw8: (((tweak >> 8) ^ (tweak >> 40)) & 0xff_ffff) as u32,
        tw9: (((tweak >> 16) ^ (tweak >> 48) ^ (tweak << 16)) & 0xff_ffff) as u32,
    }
}

/// Enumerates every `CandidateKey` consistent with `left_table` and the two
/// right tables built for the same triple of good pairs (`tp1`, `tp2`,
/// `tp3`, in the same order used to build `left_table`).
#[must_use]
pub fn find_candidate_keys(
    tp1: &TuplePair,
    tp2: &TuplePair,
    tp3: &TuplePair,
    left_table: &[LeftTableEntry],
    right_table_msb: &[RightTableEntry],
    right_table_mid: &[RightTableEntry],
) -> Vec<CandidateKey> {
    let x = project(tp1);
    let y = project(tp2);
    let z = project(tp3);

    let mut candidates = Vec::new();
    for lp in left_table {
        let sx = lp.sx ^ x.tw8;
        let sy = lp.sy ^ y.tw8;
        let sz = lp.sz ^ z.tw8;
        for rk8 in 0..0x0100_0000u32 {
            let qx = mix_columns(rotate_rows(sub_bytes(sx ^ rk8))) ^ x.tw9;
            let qy = mix_columns(rotate_rows(sub_bytes(sy ^ rk8))) ^ y.tw9;
            let qz = mix_columns(rotate_rows(sub_bytes(sz ^ rk8))) ^ z.tw9;

            let xyyz_msb = ((((qx ^ qy) >> 8) & 0xff00) | ((qy ^ qz) >> 16)) as u16;
            let Some(mut msb_match) = right_table_lookup(right_table_msb, xyyz_msb) else {
                continue;
            };
            let xyyz_mid = (((qx ^ qy) & 0xff00) | (((qy ^ qz) & 0xff00) >> 8)) as u16;
            let Some(mid_match_start) = right_table_lookup(right_table_mid, xyyz_mid) else {
                continue;
            };

            while msb_match < right_table_msb.len() && right_table_msb[msb_match].xyyz == xyyz_msb {
                let mut mid_match = mid_match_start;
                while mid_match < right_table_mid.len() && right_table_mid[mid_match].xyyz == xyyz_mid {
                    let msb = right_table_msb[msb_match];
                    let mid = right_table_mid[mid_match];
                    let rk10 = (u32::from(msb.rk10) << 16) | (u32::from(mid.rk10) << 8);
                    let rk9 = (qx ^ (u32::from(msb.x) << 16) ^ (u32::from(mid.x) << 8)) & 0xffff00;

                    for rk9c in 0..=255u32 {
                        let delta_xy = SBOX[(rk9c ^ (x.tw9 & 0xff)) as usize]
                            ^ SBOX[(rk9c ^ (y.tw9 & 0xff)) as usize]
                            ^ x.tw5
                            ^ y.tw5;
                        let delta_yz = SBOX[(rk9c ^ (z.tw9 & 0xff)) as usize]
                            ^ SBOX[(rk9c ^ (y.tw9 & 0xff)) as usize]
                            ^ z.tw5
                            ^ y.tw5;
                        let wx = SBOX[((qx & 0xff) ^ rk9c) as usize].rotate_left(4);
                        let wy = SBOX[((qy & 0xff) ^ rk9c) as usize].rotate_left(4);
                        let wz = SBOX[((qz & 0xff) ^ rk9c) as usize].rotate_left(4);

                        if (wx ^ wy) == (x.ctc ^ y.ctc ^ delta_xy) && (wz ^ wy) == (z.ctc ^ y.ctc ^ delta_yz) {
                            let rk8910 = (u64::from(rk8) << 40)
                                | (u64::from(rk9) << 16)
                                | (u64::from(rk9c) << 16)
                                | u64::from(rk10 >> 8);
                            let rk5b = SBOX[(rk9c ^ (x.tw9 & 0xff)) as usize] ^ x.ctc ^ wx ^ x.tw5 ^ 2;
                            candidates.push(CandidateKey {
                                rk5b,
                                left: *lp,
                                rk8910,
                            });
                        }
                    }
                    mid_match += 1;
                }
                msb_match += 1;
            }
        }
    }
    candidates.sort_unstable();
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(rk5b: u8, left_key: u8, rk8910: u64) -> CandidateKey {
        CandidateKey {
            rk5b,
            left: LeftTableEntry {
                sx: 0xffff_ff,
                sy: 0,
                sz: 0,
                key: left_key,
            },
            rk8910,
        }
    }

    #[test]
    fn ordering_ignores_sx_sy_sz() {
        let a = key(1, 2, 3);
        let mut b = a;
        b.left.sx = 0;
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
    }

    #[test]
    fn ordering_is_rk5b_then_key_then_rk8910() {
        let mut keys = vec![key(2, 0, 0), key(1, 5, 0), key(1, 0, 9), key(1, 0, 1)];
        keys.sort();
        assert_eq!(
            keys,
            vec![key(1, 0, 1), key(1, 0, 9), key(1, 5, 0), key(2, 0, 0)]
        );
    }
}
