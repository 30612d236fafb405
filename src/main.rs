//! archsmith - cloud architecture synthesis CLI

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = archsmith::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
