//! Generate Command
//!
//! Demo binary, not part of the externally-specified interface: synthesizes
//! a random key and base tweak, then emits chosen-plaintext good pairs in
//! the tuple-file format the attack command reads.

use halfloop_core::error::Result;
use halfloop_core::generator::generate_good_pairs;
use halfloop_core::logging::{log_status, Level};
use halfloop_core::random::{random_u128, random_u32, random_u64};

/// Generates `num_pairs` good pairs under a freshly drawn key/tweak and
/// prints them to stdout in tuple-file format, one pair per two lines.
pub fn run(num_pairs: usize) -> Result<()> {
    let key = random_u128()?;
    let tweak0 = random_u64()?;

    log_status(Level::White, &format!("Key: {key:032x}."));
    log_status(Level::White, &format!("Base tweak: {tweak0:016x}."));

    let (tuples, queries) = generate_good_pairs(key, tweak0, num_pairs, || random_u32().unwrap_or(0))?;
    log_status(Level::White, &format!("Performed {queries} chosen-plaintext queries."));

    for tuple in tuples {
        println!("{:06x} {:06x} {:016x}", tuple.pt, tuple.ct, tuple.tweak);
    }

    Ok(())
}
