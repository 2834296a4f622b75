//! `halfloop-tweak` — parses a 64-bit hex tweak and prints its fields.

use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "halfloop-tweak")]
#[command(about = "Parse a HALFLOOP-24 tweak into its structured fields", long_about = None)]
#[command(version)]
struct Cli {
    /// The tweak as 16 hex characters.
    #[arg(value_name = "HEX64")]
    hex64: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome: anyhow::Result<()> = halfloop_cli::commands::tweak::run(&cli.hex64).map_err(Into::into);
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Format error.");
            let code = err
                .downcast_ref::<halfloop_core::HalfloopError>()
                .map_or(1, halfloop_core::HalfloopError::exit_code);
            ExitCode::from(code as u8)
        }
    }
}
