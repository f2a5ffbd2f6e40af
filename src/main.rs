//! afx CLI entry point
//!
//! Parses arguments, sets up logging on stderr, runs the subcommand and
//! renders any error with context and suggestions.

use afx::cli;
use afx::core::user_friendly_error;
use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    cli.init_logging();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        // Convert to user-friendly error with context and suggestions
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
