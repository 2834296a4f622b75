//! `halfloop-generate` — demo binary, not part of the externally-specified
//! interface. Synthesizes a random key and emits chosen-plaintext good
//! pairs in tuple-file format, for feeding back into `halfloop-attack`.

use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "halfloop-generate")]
#[command(about = "Generate a tuple file of good pairs for a random key", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of good pairs to emit.
    #[arg(short = 'n', long = "num-pairs", default_value_t = 3)]
    num_pairs: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome: anyhow::Result<()> = halfloop_cli::commands::generate::run(cli.num_pairs).map_err(Into::into);
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
