//! depstamp CLI entry point
//!
//! Parses arguments, runs the command, and maps the outcome to an exit
//! status: 0 when the output was written or deliberately left alone, 1 when
//! component versions could not be listed or any step failed.

use clap::Parser;
use depstamp::cli;
use depstamp::core::{Reporter, user_friendly_error};

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(outcome) if outcome.is_failure() => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            // Errors are shown even with --silent
            Reporter::default().report_error(&user_friendly_error(e));
            std::process::exit(1);
        }
    }
}
