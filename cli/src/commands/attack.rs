//! Attack Command
//!
//! Runs the full differential meet-in-the-middle pipeline followed by the
//! bit-sliced brute-force completion, against a file of observed tuples.

use std::fs::File;
use std::path::Path;

use halfloop_core::attack::run_attack;
use halfloop_core::driver::search_candidates;
use halfloop_core::error::{HalfloopError, Result};
use halfloop_core::logging::{log_status, Level};
use halfloop_core::pairs::good_pairs;
use halfloop_core::tuple::read_tuples;

/// Reads `tuples_file`, runs the key-recovery pipeline over its good pairs,
/// and prints the recovered key on success.
///
/// `threads` selects the worker-pool size for the final brute-force stage;
/// `None` defaults to the number of available processors.
pub fn run(tuples_file: &Path, threads: Option<usize>) -> Result<()> {
    let file = File::open(tuples_file)?;
    let tuples = read_tuples(file)?;
    log_status(Level::White, &format!("Read {} tuples.", tuples.len()));

    let pairs = good_pairs(&tuples);
    log_status(Level::White, &format!("Found {} good pairs.", pairs.len()));

    let result = run_attack(&pairs)?;
    log_status(
        Level::White,
        &format!("Narrowed to {} candidate key(s), starting brute force.", result.candidates.len()),
    );

    let num_threads = threads.unwrap_or_else(|| std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get));
    match search_candidates(&result.tp1, &result.tp2, &result.tp3, &result.candidates, num_threads) {
        Some(key) => {
            println!("Found key: {key:032x}");
            Ok(())
        }
        None => Err(HalfloopError::Failure("no common key found among the candidates".to_string())),
    }
}
