//! Left-table join (stage F): combine three left-state lists from distinct
//! good pairs that share a cipher key into one joined table.

use super::left::LeftState;

/// A triple of pre-rk8 states sharing the same inferred round-key byte
/// across three good pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LeftTableEntry {
    /// State implied by the first good pair.
    pub sx: u32,
    /// State implied by the second good pair.
    pub sy: u32,
    /// State implied by the third good pair.
    pub sz: u32,
    /// The shared round-key byte.
    pub key: u8,
}

/// Joins three sorted [`LeftState`] lists on shared `key`, emitting the
/// Cartesian product within each equal-key group. The three lists must come
/// from three distinct good pairs under the same cipher key. Result is
/// sorted by `(sx, sy, sz, key)`.
#[must_use]
pub fn build_left_table(list1: &[LeftState], list2: &[LeftState], list3: &[LeftState]) -> Vec<LeftTableEntry> {
    let mut table = Vec::new();
    let mut j0 = 0usize;
    let mut k0 = 0usize;
    for entry in list1 {
        while j0 < list2.len() && list2[j0].key < entry.key {
            j0 += 1;
        }
        while k0 < list3.len() && list3[k0].key < entry.key {
            k0 += 1;
        }
        let mut j = j0;
        while j < list2.len() && list2[j].key == entry.key {
            let mut k = k0;
            while k < list3.len() && list3[k].key == entry.key {
                table.push(LeftTableEntry {
                    sx: entry.state,
                    sy: list2[j].state,
                    sz: list3[k].state,
                    key: entry.key,
                });
                k += 1;
            }
            j += 1;
        }
    }
    table.sort_unstable();
    table
}
