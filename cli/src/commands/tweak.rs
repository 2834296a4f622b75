//! Tweak Command
//!
//! Parses a 64-bit hex tweak and prints its structured ALE fields.

use halfloop_core::error::{HalfloopError, Result};
use halfloop_core::tweak::parse_tweak;

/// Parses `hex64` as a HALFLOOP-24 tweak and prints its fields.
pub fn run(hex64: &str) -> Result<()> {
    let raw = u64::from_str_radix(hex64, 16).map_err(|_| HalfloopError::FormatError(format!("not a 64-bit hex value: {hex64}")))?;
    let fields = parse_tweak(raw)?;

    println!("month: {}", fields.month);
    println!("day: {}", fields.day);
    println!("coarse_time: {}", fields.coarse_time);
    println!("fine_time: {}", fields.fine_time);
    println!("word: {}", fields.word);
    println!("frequency_hz: {}", fields.frequency_hz);

    Ok(())
}
