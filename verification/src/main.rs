//! `halfloop-verify` — runs the toolkit's self-tests and reports pass/fail
//! the way the reference implementation's own test binary does.
//!
//! Always checks the scalar cipher against the canonical test vector and
//! the bit-sliced gate networks against their scalar counterparts. With
//! `--full`, additionally runs a full `2^32` bit-sliced search against a
//! known key and reports its throughput.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use halfloop_core::cipher::self_test as cipher_self_test;
use halfloop_core::error::HalfloopError;
use halfloop_core::logging::{log_status, Level};
use halfloop_core::tweak::{create_tweak, parse_tweak, TweakFields};
use halfloop_core::bitslice;

#[derive(Parser)]
#[command(name = "halfloop-verify")]
#[command(about = "Run the HALFLOOP-24 toolkit's self-tests", long_about = None)]
#[command(version)]
struct Cli {
    /// Also run the full 2^32 bit-sliced search self-test and report
    /// keys-per-second throughput.
    #[arg(long)]
    full: bool,
}

const TEST_KEY: u128 = (0x2b7e_1516_28ae_d2a6_u128 << 64) | 0xabf7_1588_09cf_4f3c_u128;
const TEST_TWEAK: u64 = 0x543b_d880_0001_7550;
const TEST_PT: u32 = 0x0102_03;

fn run(full: bool) -> halfloop_core::Result<()> {
    log_status(Level::White, "Testing standard implementation.");
    cipher_self_test()?;
    log_status(Level::White, "Standard implementation ok.");

    log_status(Level::White, "Testing bit-sliced gate networks.");
    bitslice::self_test()?;
    log_status(Level::White, "Bit-sliced gate networks ok.");

    log_status(Level::White, "Testing tweak codec round-trip.");
    let fields = TweakFields {
        month: 6,
        day: 15,
        coarse_time: 720,
        fine_time: 30,
        word: 42,
        zero: 0,
        frequency_hz: 14_250_000,
    };
    let packed = create_tweak(fields)?;
    if parse_tweak(packed)? != fields {
        return Err(HalfloopError::InternalError("tweak codec did not round-trip".to_string()));
    }
    log_status(Level::White, "Tweak codec ok.");

    if full {
        log_status(Level::White, "Running full 2^32 bit-sliced search self-test.");
        let start = Instant::now();
        bitslice::self_test_search(TEST_KEY, TEST_TWEAK, TEST_PT)?;
        let elapsed = start.elapsed();
        let keys_per_sec = f64::from(u32::MAX) / elapsed.as_secs_f64().max(f64::EPSILON);
        log_status(
            Level::White,
            &format!("Full search ok: {elapsed:.2?} elapsed, {keys_per_sec:.0} keys/sec."),
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome: anyhow::Result<()> = run(cli.full).map_err(Into::into);
    match outcome {
        Ok(()) => {
            log_status(Level::Green, "All tests successful.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log_status(Level::Red, "Halfloop test failed.");
            let code = err.downcast_ref::<HalfloopError>().map_or(1, HalfloopError::exit_code);
            ExitCode::from(code as u8)
        }
    }
}
