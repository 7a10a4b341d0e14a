use std::process::ExitCode;

use clap::Parser;
use temple_app::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match temple_app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
