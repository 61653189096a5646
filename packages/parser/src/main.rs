//! CLI entry point for the parser.

use std::process::ExitCode;

use console::style;
use iati_parser::cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // WARN by default, RUST_LOG overrides; stdout is reserved for records
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").for_stderr().red().bold());
            ExitCode::FAILURE
        }
    }
}
