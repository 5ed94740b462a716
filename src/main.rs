//! depcheck - task dependency analyzer

use std::process::ExitCode;

fn main() -> ExitCode {
    match depcheck::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
