//! Stage orchestration (C through I): good pairs feed an increasing
//! meet-in-the-middle join that narrows the 80-bit candidate-key set down to
//! at most one, stopping as soon as that happens.

use crate::error::{HalfloopError, Result};
use crate::logging::{log_status, Level};
use crate::pairs::TuplePair;

use super::candidates::{find_candidate_keys, CandidateKey};
use super::intersect::candidate_keys_intersection;
use super::left::left_states;
use super::left_table::build_left_table;
use super::right_table::build_right_table;

/// The outcome of [`run_attack`]: the three good pairs the surviving
/// candidates were narrowed against, and the candidates themselves.
pub struct AttackResult {
    pub tp1: TuplePair,
    pub tp2: TuplePair,
    pub tp3: TuplePair,
    pub candidates: Vec<CandidateKey>,
}

/// Narrows `pairs` down to a set of 80-bit candidate keys consistent with
/// every triple of good pairs examined, stopping early once at most one
/// candidate remains. Requires at least three good pairs.
pub fn run_attack(pairs: &[TuplePair]) -> Result<AttackResult> {
    if pairs.len() < 3 {
        return Err(HalfloopError::Failure(format!(
            "found {} good pairs, at least 3 are needed",
            pairs.len()
        )));
    }

    let mut candidate_set: Option<Vec<CandidateKey>> = None;

    'outer: for i in 0..pairs.len() {
        if candidate_set.as_ref().is_some_and(|s| s.len() <= 1) {
            break;
        }
        let left1 = left_states(&pairs[i]);
        for j in (i + 1)..pairs.len() {
            if candidate_set.as_ref().is_some_and(|s| s.len() <= 1) {
                break 'outer;
            }
            let left2 = left_states(&pairs[j]);
            for k in (j + 1)..pairs.len() {
                if candidate_set.as_ref().is_some_and(|s| s.len() <= 1) {
                    break 'outer;
                }
                let left3 = left_states(&pairs[k]);
                let left_table = build_left_table(&left1, &left2, &left3);
                log_status(Level::White, &format!("Left table size: {}", left_table.len()));

                let right_msb = build_right_table(&pairs[i], &pairs[j], &pairs[k], false);
                let right_mid = build_right_table(&pairs[i], &pairs[j], &pairs[k], true);

                let found = find_candidate_keys(&pairs[i], &pairs[j], &pairs[k], &left_table, &right_msb, &right_mid);

                log_status(
                    if found.is_empty() { Level::Red } else { Level::Green },
                    &format!("Found {} candidate keys.", found.len()),
                );

                match candidate_set.as_mut() {
                    None => candidate_set = Some(found),
                    Some(set) => {
                        candidate_keys_intersection(set, &found);
                        log_status(
                            if set.is_empty() { Level::Red } else { Level::Green },
                            &format!(
                                "{} candidate key{} remaining.",
                                set.len(),
                                if set.len() == 1 { "" } else { "s" }
                            ),
                        );
                        if set.is_empty() {
                            return Err(HalfloopError::Failure(
                                "no keys found: the good pairs do not have a common key".into(),
                            ));
                        }
                    }
                }
            }
        }
    }

    Ok(AttackResult {
        tp1: pairs[0],
        tp2: pairs[1],
        tp3: pairs[2],
        candidates: candidate_set.unwrap_or_default(),
    })
}
