//! statsdelta CLI
//!
//! Compares two delimited statistics files keyed by one field and writes the
//! delta table to stdout.

use statsdelta_core::logging_facility;
use statsdelta_core::{ErrorCategory, ExError};

mod args;

use args::Cli;

fn main() {
    let cli = Cli::parse_args(std::env::args_os());
    logging_facility::init(cli.log_format.profile());

    if let Err(e) = execute(&cli) {
        eprintln!("Error: {}", e);
        if e.category() == ErrorCategory::Configuration {
            eprintln!("Run 'statsdelta --help' for usage.");
        }
        std::process::exit(exit_code(&e));
    }
}

fn execute(cli: &Cli) -> Result<(), ExError> {
    let request = cli.to_request()?;
    let stdout = std::io::stdout();
    statsdelta_core::run(&request, stdout.lock())?;
    Ok(())
}

/// Configuration errors share the argument parser's usage exit code
fn exit_code(err: &ExError) -> i32 {
    match err.category() {
        ErrorCategory::Configuration => 2,
        ErrorCategory::DataFormat | ErrorCategory::Io => 1,
    }
}
