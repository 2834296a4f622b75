//! `halfloop-boomerang` — recovers the top three key bytes via a boomerang
//! sandwich-differential attack, against an internally synthesized key.

use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "halfloop-boomerang")]
#[command(about = "Recover three HALFLOOP-24 key bytes via a boomerang attack", long_about = None)]
#[command(version)]
struct Cli;

fn main() -> ExitCode {
    Cli::parse();
    let outcome: anyhow::Result<()> = halfloop_cli::commands::boomerang::run().map_err(Into::into);
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            let code = err
                .downcast_ref::<halfloop_core::HalfloopError>()
                .map_or(1, halfloop_core::HalfloopError::exit_code);
            ExitCode::from(code as u8)
        }
    }
}
