//! Binary entrypoint for the `picpush` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match picpush::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
