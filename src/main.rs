//! Binary entrypoint for the `todos` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match todos::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
