//! invaudit CLI entry point
//!
//! Parses arguments and runs through `cli::run`. Errors go to stderr and
//! set a nonzero exit code; all logic lives in the library.

use invaudit::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}
