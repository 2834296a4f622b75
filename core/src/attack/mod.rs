//! Differential key-recovery pipeline: good pairs feed a meet-in-the-middle
//! join that narrows an 80-bit candidate-key set, which the brute-force
//! driver then completes to the full 128-bit key.

pub mod candidates;
pub mod intersect;
pub mod left;
pub mod left_table;
pub mod pipeline;
pub mod right_table;

pub use candidates::{find_candidate_keys, CandidateKey};
pub use intersect::candidate_keys_intersection;
pub use left::{left_states, LeftState};
pub use left_table::{build_left_table, LeftTableEntry};
pub use pipeline::{run_attack, AttackResult};
pub use right_table::{build_right_table, right_table_lookup, RightTableEntry};
