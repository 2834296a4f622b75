//! `halfloop-attack` — runs the full key-recovery pipeline against a file
//! of observed `(plaintext, ciphertext, tweak)` tuples.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "halfloop-attack")]
#[command(about = "Recover a HALFLOOP-24 key from observed tuples", long_about = None)]
#[command(version)]
struct Cli {
    /// Worker-pool size for the brute-force stage (defaults to the number
    /// of available processors).
    #[arg(short = 't', long = "threads")]
    threads: Option<usize>,

    /// File of `pt ct tweak` tuples, one per line.
    #[arg(value_name = "TUPLES_FILE")]
    tuples_file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome: anyhow::Result<()> = halfloop_cli::commands::attack::run(&cli.tuples_file, cli.threads).map_err(Into::into);
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
