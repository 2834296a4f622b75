//! Right-table construction (stage G): 256-entry tables of rk10-byte
//! candidates indexed by a ciphertext-projection signature, for a fixed
//! triple of good pairs.

use crate::cipher::INV_SBOX;
use crate::pairs::TuplePair;

/// One entry in a right table: a candidate rk10 byte plus the signature it
/// produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RightTableEntry {
    /// Composite 16-bit signature `((vx XOR vy) << 8) | (vy XOR vz)`.
    pub xyyz: u16,
    /// The x-pair's projected value under this rk10 guess.
    pub x: u8,
    /// The candidate rk10 byte.
    pub rk10: u8,
}

fn project(pair: &TuplePair, middle: bool) -> u8 {
    if middle {
        (((pair.a.ct >> 8) as u64) ^ pair.a.tweak ^ (pair.a.tweak >> 32)) as u8
    } else {
        (((pair.a.ct >> 16) as u64) ^ (pair.a.tweak >> 8) ^ (pair.a.tweak >> 40)) as u8
    }
}

/// Builds one of the two right tables (`middle = true` for the middle rk10
/// byte, `false` for the most significant byte) for the given triple of
/// good pairs. Always exactly 256 entries, sorted by `(xyyz, x, rk10)`.
#[must_use]
pub fn build_right_table(x: &TuplePair, y: &TuplePair, z: &TuplePair, middle: bool) -> Vec<RightTableEntry> {
    let cx = project(x, middle);
    let cy = project(y, middle);
    let cz = project(z, middle);

    let mut table = Vec::with_capacity(256);
    for rk10 in 0..=255u8 {
        let mut vx = cx ^ rk10;
        let mut vy = cy ^ rk10;
        let mut vz = cz ^ rk10;
        if middle {
            vx = vx.rotate_right(6);
            vy = vy.rotate_right(6);
            vz = vz.rotate_right(6);
        }
        let vx = INV_SBOX[vx as usize];
        let vy = INV_SBOX[vy as usize];
        let vz = INV_SBOX[vz as usize];
        let xyyz = (u16::from(vx ^ vy) << 8) | u16::from(vy ^ vz);
        table.push(RightTableEntry { xyyz, x: vx, rk10 });
    }
    table.sort_unstable();
    table
}

/// Finds the first index in a sorted right table whose `xyyz` equals
/// `xyyz`. Returns `None` if absent.
#[must_use]
pub fn right_table_lookup(table: &[RightTableEntry], xyyz: u16) -> Option<usize> {
    let idx = table.partition_point(|e| e.xyyz < xyyz);
    if table.get(idx).map(|e| e.xyyz) == Some(xyyz) {
        Some(idx)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple::Tuple;

    fn pair(ct: u32, tweak: u64) -> TuplePair {
        let a = Tuple { pt: 0, ct, tweak };
        TuplePair { a, b: a }
    }

    #[test]
    fn table_has_exactly_256_entries() {
        let x = pair(0x0102_03, 0);
        let y = pair(0x0304_05, 1);
        let z = pair(0x0506_07, 2);
        assert_eq!(build_right_table(&x, &y, &z, true).len(), 256);
        assert_eq!(build_right_table(&x, &y, &z, false).len(), 256);
    }

    #[test]
    fn lookup_finds_the_leftmost_matching_entry() {
        let x = pair(0x0102_03, 0);
        let y = pair(0x0304_05, 1);
        let z = pair(0x0506_07, 2);
        let table = build_right_table(&x, &y, &z, false);
        let first = table[0];
        let idx = right_table_lookup(&table, first.xyyz).unwrap();
        assert_eq!(table[idx].xyyz, first.xyyz);
        assert!(idx == 0 || table[idx - 1].xyyz != first.xyyz);
    }

    #[test]
    fn lookup_returns_none_for_absent_signature() {
        let x = pair(0x0102_03, 0);
        let y = pair(0x0304_05, 1);
        let z = pair(0x0506_07, 2);
        let table = build_right_table(&x, &y, &z, true);
        let present: std::collections::HashSet<_> = table.iter().map(|e| e.xyyz).collect();
        if let Some(missing) = (0..=u16::MAX).find(|v| !present.contains(v)) {
            assert!(right_table_lookup(&table, missing).is_none());
        }
    }
}
